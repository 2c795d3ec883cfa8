use super::low_level::LowLevel;
use super::timing;

/// Block-level command assembly on top of the bit writer.
pub trait BlockOperations: LowLevel {
	/// Program one 32-bit block.
	///
	/// Atomic with respect to its own timing: no early return, no partial
	/// emission. Finishes with a reset so the tag is back in read mode;
	/// sequencing multiple blocks is the caller's job.
	///
	/// An out-of-range page or block is a caller bug, not a runtime
	/// condition; both fail before anything is emitted.
	fn write_block(&mut self, page: u8, block: u8, lock_bit: bool, data: u32) {
		assert!(page < 2, "invalid page {} (T5577 has pages 0 and 1)", page);
		assert!(block < 8, "invalid block {} (a page holds blocks 0..7)", block);

		// settle after whatever came before
		self.wait(timing::WAIT_TIME);

		self.write_gap(timing::START_GAP);

		// opcode
		match page {
			0 => {
				self.write_bit(true);
				self.write_bit(false);
			},
			1 => {
				self.write_bit(true);
				self.write_bit(true);
			},
			_ => unreachable!(),
		}

		self.write_bit(lock_bit);

		// data, most significant bit first
		for i in 0..32 {
			self.write_bit(0 != (data >> (31 - i)) & 1);
		}

		// block address, most significant bit first
		self.write_bit(0 != (block >> 2) & 1);
		self.write_bit(0 != (block >> 1) & 1);
		self.write_bit(0 != block & 1);

		// tag programs its EEPROM now; the field must stay on
		self.wait(timing::PROGRAM);

		self.wait(timing::WAIT_TIME);
		self.write_reset();
	}

	/// Return the tag to regular read mode.
	fn write_reset(&mut self) {
		self.write_gap(timing::START_GAP);
		self.write_bit(true);
		self.write_bit(false);
	}
}

impl<H: LowLevel + ?Sized> BlockOperations for H {}
