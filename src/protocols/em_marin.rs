use crate::AResult;

use super::Protocol;

/// EM4100 / EM-Marin, a fixed 64-bit manchester frame:
///
/// - 9 header bits, all set
/// - 10 data nibbles (two per id byte, high nibble first), each followed
///   by an even row-parity bit
/// - 4 even column-parity bits over the 10 nibbles
/// - stop bit 0
pub struct EmMarin;

const DATA_LEN: usize = 5;
const ENCODED_WORDS: usize = 2;

// manchester, RF/64, 2 data blocks
const CONFIG_BLOCK: u32 = 0b00000000_00010100_10000000_01000000;

fn push_bit(frame: &mut u64, value: bool) {
	*frame = (*frame << 1) | value as u64;
}

fn push_nibble(frame: &mut u64, nibble: u8) {
	let mut parity = 0u8;
	for i in (0..4).rev() {
		let bit = (nibble >> i) & 1;
		push_bit(frame, 0 != bit);
		parity ^= bit;
	}
	push_bit(frame, 0 != parity);
}

impl Protocol for EmMarin {
	fn name(&self) -> &'static str {
		"em4100"
	}

	fn data_len(&self) -> usize {
		DATA_LEN
	}

	fn encoded_words(&self) -> usize {
		ENCODED_WORDS
	}

	fn config_block(&self) -> u32 {
		CONFIG_BLOCK
	}

	fn encode(&self, data: &[u8], words: &mut [u32]) -> AResult<()> {
		ensure!(
			data.len() >= DATA_LEN,
			"em4100 id needs {} bytes, got {}",
			DATA_LEN,
			data.len()
		);
		ensure!(
			words.len() >= ENCODED_WORDS,
			"em4100 needs room for {} words, got {}",
			ENCODED_WORDS,
			words.len()
		);

		let mut frame = 0u64;

		// header
		for _ in 0..9 {
			push_bit(&mut frame, true);
		}

		// data rows, each with its parity bit
		for byte in &data[..DATA_LEN] {
			push_nibble(&mut frame, byte >> 4);
			push_nibble(&mut frame, byte & 0x0f);
		}

		// column parity over all ten nibbles
		for column in (0..4).rev() {
			let mut parity = 0u8;
			for byte in &data[..DATA_LEN] {
				parity ^= (byte >> (4 + column)) & 1;
				parity ^= (byte >> column) & 1;
			}
			push_bit(&mut frame, 0 != parity);
		}

		// stop bit
		push_bit(&mut frame, false);

		// block 1 carries the low half; the frame repeats on air, so
		// readers lock onto the header wherever it starts
		words[0] = frame as u32;
		words[1] = (frame >> 32) as u32;

		Ok(())
	}
}

#[cfg(test)]
mod test {
	use crate::protocols::Protocol;

	use super::EmMarin;

	fn encode(data: &[u8; 5]) -> [u32; 2] {
		let mut words = [0u32; 2];
		EmMarin.encode(data, &mut words).unwrap();
		words
	}

	fn frame(words: [u32; 2]) -> u64 {
		(u64::from(words[1]) << 32) | u64::from(words[0])
	}

	fn parity(bits: u8) -> u8 {
		(bits.count_ones() & 1) as u8
	}

	// checks the header, every parity law and the stop bit, then
	// reassembles the id
	fn decode(words: [u32; 2]) -> [u8; 5] {
		let frame = frame(words);

		assert_eq!(frame >> 55, 0x1ff, "header must be nine set bits");
		assert_eq!(frame & 1, 0, "stop bit must be clear");

		let mut nibbles = [0u8; 10];
		for row in 0..10 {
			let chunk = ((frame >> (50 - 5 * row)) & 0x1f) as u8;
			let nibble = chunk >> 1;
			assert_eq!(chunk & 1, parity(nibble), "row {} parity", row);
			nibbles[row] = nibble;
		}

		let columns = ((frame >> 1) & 0xf) as u8;
		for column in 0..4 {
			let mut expected = 0u8;
			for nibble in nibbles.iter() {
				expected ^= (nibble >> (3 - column)) & 1;
			}
			assert_eq!((columns >> (3 - column)) & 1, expected, "column {} parity", column);
		}

		let mut data = [0u8; 5];
		for i in 0..5 {
			data[i] = (nibbles[2 * i] << 4) | nibbles[2 * i + 1];
		}
		data
	}

	#[test]
	fn all_zero_id() {
		// header only, everything else is zero
		assert_eq!(encode(&[0; 5]), [0x0000_0000, 0xff80_0000]);
	}

	#[test]
	fn deterministic() {
		let data = [0x01, 0x23, 0x45, 0x67, 0x89];
		assert_eq!(encode(&data), encode(&data));
	}

	#[test]
	fn round_trip_and_parity_laws() {
		for data in &[
			[0x12, 0x34, 0x56, 0x78, 0x9a],
			[0xff, 0xff, 0xff, 0xff, 0xff],
			[0x01, 0x23, 0x45, 0x67, 0x89],
			[0x80, 0x00, 0x00, 0x00, 0x01],
			[0xde, 0xad, 0xbe, 0xef, 0x42],
		] {
			assert_eq!(decode(encode(data)), *data);
		}
	}

	#[test]
	fn known_reference_frame() {
		// 0x0102030405:
		// header, then rows 0/1 0/2 0/3 0/4 0/5 with their parities
		let frame = frame(encode(&[0x01, 0x02, 0x03, 0x04, 0x05]));
		// rows for 0x01: 0000 p0, 0001 p1
		assert_eq!((frame >> 45) & 0x3ff, 0b00000_00011);
	}
}
