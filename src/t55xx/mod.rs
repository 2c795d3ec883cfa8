/// Write protocol for T5577-class 125 kHz transponders.
///
/// The tag has no digital bus; commands are timed modulation of the reader
/// field. All timings are counted in field clocks (one 125 kHz carrier
/// cycle, 8 us).
///
/// A write-block command:
/// - start gap (carrier off)
/// - 2-bit opcode (0b10 = page 0, 0b11 = page 1)
/// - lock bit
/// - 32 data bits, most significant first
/// - 3-bit block address, most significant first
///
/// Each bit is a carrier-on period (short = 0, long = 1) followed by a
/// write gap. After the address the tag programs its EEPROM, which takes
/// a fixed time during which the field must stay on. A 2-bit reset
/// command (0b00, sent as bits 1 then 0) returns the tag to read mode.
mod low_level;
mod operations;
mod writer;

pub mod timing;

pub use self::low_level::{
	CriticalSection,
	LowLevel,
};

pub use self::operations::{
	BlockOperations,
};

pub use self::writer::{
	RfidWriter,
};

use crate::field::FieldEvent;

/// Recover the command bit values from a recorded hardware trace.
///
/// Only delays matching a data-0 or data-1 width count; gaps, settle and
/// program waits use other durations.
pub fn modulation_bits(events: &[FieldEvent]) -> Vec<bool> {
	let data_0 = timing::field_clocks_us(timing::DATA_0);
	let data_1 = timing::field_clocks_us(timing::DATA_1);

	events
		.iter()
		.filter_map(|event| match *event {
			FieldEvent::Delay { us } if us == data_0 => Some(false),
			FieldEvent::Delay { us } if us == data_1 => Some(true),
			_ => None,
		})
		.collect()
}
