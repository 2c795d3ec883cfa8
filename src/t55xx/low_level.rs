use std::ops::{
	Deref,
	DerefMut,
};

use crate::field::FieldHardware;

use super::timing;

/// Interrupt gate around a multi-block write sequence.
///
/// Interrupts are disabled when the guard is created and re-enabled when
/// it drops, on every exit path.
pub struct CriticalSection<'a, H: ?Sized + FieldHardware + 'a>(&'a mut H);

impl<'a, H: ?Sized + FieldHardware> Drop for CriticalSection<'a, H> {
	fn drop(&mut self) {
		self.0.interrupts_enable();
	}
}

impl<'a, H: ?Sized + FieldHardware> Deref for CriticalSection<'a, H> {
	type Target = H;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl<'a, H: ?Sized + FieldHardware> DerefMut for CriticalSection<'a, H> {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.0
	}
}

/// Bit-level field modulation on top of any `FieldHardware`.
///
/// These are the only operations that spend wall-clock time; every higher
/// layer is expressed in bit, byte and gap counts.
pub trait LowLevel: FieldHardware {
	// delay with the carrier untouched
	fn wait(&mut self, field_clocks: u32) {
		self.delay_us(timing::field_clocks_us(field_clocks));
	}

	// pause the carrier; the tag sees gaps as command phase delimiters
	fn write_gap(&mut self, field_clocks: u32) {
		self.carrier_stop();
		self.delay_us(timing::field_clocks_us(field_clocks));
		self.carrier_start();
	}

	/// Emit one bit: carrier on for the data-0 or data-1 width, then a
	/// write gap. Blocks for the full duration.
	fn write_bit(&mut self, value: bool) {
		if value {
			self.wait(timing::DATA_1);
		} else {
			self.wait(timing::DATA_0);
		}
		self.write_gap(timing::WRITE_GAP);
	}

	/// Emit 8 bits, least significant first.
	fn write_byte(&mut self, value: u8) {
		for i in 0..8 {
			self.write_bit(0 != (value >> i) & 1);
		}
	}

	fn critical_section(&mut self) -> CriticalSection<Self> {
		self.interrupts_disable();
		CriticalSection(self)
	}
}

impl<H: FieldHardware + ?Sized> LowLevel for H {}
