use std::fmt;

use super::FieldHardware;

/// One recorded hardware call.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum FieldEvent {
	CarrierConfigure { frequency: u32, duty_cycle: f32 },
	CarrierStart,
	CarrierStop,
	CarrierReset,
	PinsReadMode,
	PinsReset,
	PinPullRelease,
	InterruptsDisable,
	InterruptsEnable,
	Delay { us: u32 },
}

impl fmt::Display for FieldEvent {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			FieldEvent::CarrierConfigure { frequency, duty_cycle } => {
				write!(f, "carrier configure: {} Hz, duty {}", frequency, duty_cycle)
			},
			FieldEvent::CarrierStart => write!(f, "carrier start"),
			FieldEvent::CarrierStop => write!(f, "carrier stop"),
			FieldEvent::CarrierReset => write!(f, "carrier reset"),
			FieldEvent::PinsReadMode => write!(f, "pins to read mode"),
			FieldEvent::PinsReset => write!(f, "pins reset"),
			FieldEvent::PinPullRelease => write!(f, "antenna pull released"),
			FieldEvent::InterruptsDisable => write!(f, "interrupts disabled"),
			FieldEvent::InterruptsEnable => write!(f, "interrupts enabled"),
			FieldEvent::Delay { us } => write!(f, "delay {} us", us),
		}
	}
}

/// In-memory `FieldHardware` backend.
///
/// Records every call and advances a virtual clock instead of sleeping, so
/// a full write session can run in tests and in the trace tool without an
/// antenna attached.
#[derive(Default)]
pub struct SimulatedField {
	events: Vec<FieldEvent>,
	elapsed_us: u64,
	carrier_running: bool,
}

impl SimulatedField {
	pub fn new() -> Self {
		SimulatedField::default()
	}

	pub fn events(&self) -> &[FieldEvent] {
		&self.events
	}

	/// Virtual time spent in `delay_us` calls.
	pub fn elapsed_us(&self) -> u64 {
		self.elapsed_us
	}

	pub fn carrier_running(&self) -> bool {
		self.carrier_running
	}

	/// Events paired with the virtual timestamp at which they happened.
	pub fn timeline(&self) -> Vec<(u64, FieldEvent)> {
		let mut at = 0u64;
		let mut timeline = Vec::with_capacity(self.events.len());
		for event in &self.events {
			timeline.push((at, *event));
			if let FieldEvent::Delay { us } = *event {
				at += u64::from(us);
			}
		}
		timeline
	}
}

impl FieldHardware for SimulatedField {
	fn carrier_configure(&mut self, frequency: u32, duty_cycle: f32) {
		self.events.push(FieldEvent::CarrierConfigure { frequency, duty_cycle });
	}

	fn carrier_start(&mut self) {
		self.carrier_running = true;
		self.events.push(FieldEvent::CarrierStart);
	}

	fn carrier_stop(&mut self) {
		self.carrier_running = false;
		self.events.push(FieldEvent::CarrierStop);
	}

	fn carrier_reset(&mut self) {
		self.carrier_running = false;
		self.events.push(FieldEvent::CarrierReset);
	}

	fn pins_read_mode(&mut self) {
		self.events.push(FieldEvent::PinsReadMode);
	}

	fn pins_reset(&mut self) {
		self.events.push(FieldEvent::PinsReset);
	}

	fn pin_pull_release(&mut self) {
		self.events.push(FieldEvent::PinPullRelease);
	}

	fn interrupts_disable(&mut self) {
		self.events.push(FieldEvent::InterruptsDisable);
	}

	fn interrupts_enable(&mut self) {
		self.events.push(FieldEvent::InterruptsEnable);
	}

	fn delay_us(&mut self, us: u32) {
		self.elapsed_us += u64::from(us);
		self.events.push(FieldEvent::Delay { us });
	}
}
