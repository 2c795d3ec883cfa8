use std::thread;
use std::time::{
	Duration,
	Instant,
};

pub fn reliable_sleep(mut duration: Duration) {
	loop {
		let now = Instant::now();
		thread::sleep(duration);
		let elapsed = now.elapsed();
		if elapsed >= duration {
			return;
		}
		duration -= elapsed;
	}
}

/// Access to the field coupling peripheral: carrier timer, antenna pins,
/// blocking delay and interrupt gating.
///
/// All write timing is driven through `delay_us`; implementations must not
/// return early, a short delay stretches a gap or bit width and the tag
/// misreads the command.
pub trait FieldHardware {
	/// Configure the carrier timer; the writer asks for 125 kHz at 50% duty.
	fn carrier_configure(&mut self, frequency: u32, duty_cycle: f32);
	fn carrier_start(&mut self);
	fn carrier_stop(&mut self);
	fn carrier_reset(&mut self);

	/// Put the antenna pins into read (field generating) mode.
	fn pins_read_mode(&mut self);
	fn pins_reset(&mut self);
	/// Release the antenna pull so the antenna is not grounded while idle.
	fn pin_pull_release(&mut self);

	fn interrupts_disable(&mut self);
	fn interrupts_enable(&mut self);

	// blocking, microsecond granularity
	fn delay_us(&mut self, us: u32) {
		reliable_sleep(Duration::from_micros(u64::from(us)));
	}
}
