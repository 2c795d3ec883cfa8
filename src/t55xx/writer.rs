use crate::AResult;
use crate::field::FieldHardware;
use crate::protocols::{
	self,
	MAX_ENCODED_WORDS,
	Protocol,
};

use super::low_level::LowLevel;
use super::operations::BlockOperations;
use super::timing;

/// Session controller: owns the field hardware and sequences full
/// credential writes.
///
/// `start` and `stop` bracket a programming session; any number of
/// `write_*` calls may happen in between. One physical antenna means one
/// writer, so there is no internal locking.
pub struct RfidWriter<H: FieldHardware> {
	hardware: H,
	started: bool,
}

impl<H: FieldHardware> RfidWriter<H> {
	pub fn new(hardware: H) -> Self {
		RfidWriter {
			hardware,
			started: false,
		}
	}

	pub fn hardware(&self) -> &H {
		&self.hardware
	}

	pub fn into_hardware(self) -> H {
		self.hardware
	}

	/// Arm the field: 125 kHz carrier, pins in read mode, antenna pull
	/// released (the antenna must not be grounded between sessions).
	pub fn start(&mut self) -> AResult<()> {
		ensure!(!self.started, "writer already started");

		self.hardware.carrier_configure(timing::CARRIER_FREQUENCY, timing::CARRIER_DUTY_CYCLE);
		self.hardware.pins_read_mode();
		self.hardware.carrier_start();

		// do not ground the antenna
		self.hardware.pin_pull_release();

		self.started = true;
		Ok(())
	}

	pub fn stop(&mut self) -> AResult<()> {
		ensure!(self.started, "writer not started");

		self.hardware.carrier_stop();
		self.hardware.carrier_reset();
		self.hardware.pins_reset();

		self.started = false;
		Ok(())
	}

	/// Program a credential: config block to block 0, the encoded words to
	/// the following blocks, then a trailing reset.
	///
	/// The whole sequence runs with interrupts disabled; preemption in the
	/// middle of a block stretches a bit or gap and corrupts the write.
	/// Once started the sequence runs to completion, there is no
	/// cancellation.
	pub fn write_credential(&mut self, protocol: &dyn Protocol, data: &[u8]) -> AResult<()> {
		ensure!(self.started, "writer not started");

		let mut words = [0u32; MAX_ENCODED_WORDS];
		with_context!(
			("encoding {} credential", protocol.name()),
			protocol.encode(data, &mut words)
		)?;

		debug!(
			"{}: config block 0x{:08x}, {} data words",
			protocol.name(),
			protocol.config_block(),
			protocol.encoded_words()
		);

		let mut hw = self.hardware.critical_section();
		hw.write_block(0, 0, false, protocol.config_block());
		for (i, word) in words[..protocol.encoded_words()].iter().enumerate() {
			hw.write_block(0, (i + 1) as u8, false, *word);
		}
		hw.write_reset();

		Ok(())
	}

	pub fn write_em(&mut self, data: &[u8; 5]) -> AResult<()> {
		self.write_credential(&protocols::EmMarin, data)
	}

	pub fn write_hid(&mut self, data: &[u8; 3]) -> AResult<()> {
		self.write_credential(&protocols::HidH10301, data)
	}

	pub fn write_indala(&mut self, data: &[u8; 3]) -> AResult<()> {
		self.write_credential(&protocols::Indala40134, data)
	}
}
