// Fixed write timing table, in field clocks. These constants are part of
// the tag's wire contract; they are never computed at runtime.

/// One cycle of the 125 kHz carrier.
pub const FIELD_CLOCK_US: u32 = 8;

pub const CARRIER_FREQUENCY: u32 = 125_000;
pub const CARRIER_DUTY_CYCLE: f32 = 0.5;

/// Settle time before and after a block write.
pub const WAIT_TIME: u32 = 400;
/// Gap announcing the start of a command.
pub const START_GAP: u32 = 30;
/// Gap between two bits.
pub const WRITE_GAP: u32 = 18;
/// Carrier-on width of a 0 bit.
pub const DATA_0: u32 = 24;
/// Carrier-on width of a 1 bit.
pub const DATA_1: u32 = 56;
/// Internal EEPROM programming time after the block address.
pub const PROGRAM: u32 = 700;

pub const fn field_clocks_us(field_clocks: u32) -> u32 {
	field_clocks * FIELD_CLOCK_US
}
