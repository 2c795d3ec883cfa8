/// Hardware seam for the 125 kHz field coupling peripheral.
///
/// The write engine never touches timers or pins directly; everything goes
/// through the `FieldHardware` trait so a host platform (or a simulation)
/// can be plugged in underneath.
mod hardware;
mod sim;

pub use self::hardware::{
	FieldHardware,
	reliable_sleep,
};

pub use self::sim::{
	FieldEvent,
	SimulatedField,
};
