use crate::AResult;

use super::Protocol;

/// HID H10301 (26-bit wiegand), 86 raw bits across three words:
///
/// - 8 raw preamble bits 0b00011101
/// - every following logical bit is sent as a complementary pair
/// - logical content: 7 zero OEM bits, 6 header bits with only the last
///   one set, even parity over the high 12 payload bits, 24 payload bits
///   (facility code byte then 16-bit card number, most significant
///   first), odd parity over the low 12 payload bits
pub struct HidH10301;

const DATA_LEN: usize = 3;
const ENCODED_WORDS: usize = 3;

// FSK2a, RF/50, 3 data blocks
const CONFIG_BLOCK: u32 = 0b00000000_00010000_01110000_01100000;

const PREAMBLE: [bool; 8] = [false, false, false, true, true, true, false, true];

fn set_raw_bit(words: &mut [u32], position: usize, value: bool) {
	if value {
		words[position / 32] |= 1 << (31 - position % 32);
	} else {
		words[position / 32] &= !(1 << (31 - position % 32));
	}
}

// one logical bit as a complementary raw pair
fn set_pair(words: &mut [u32], position: usize, value: bool) {
	set_raw_bit(words, position, value);
	set_raw_bit(words, position + 1, !value);
}

impl Protocol for HidH10301 {
	fn name(&self) -> &'static str {
		"hid26"
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
			"hid26 id needs {} bytes, got {}",
			DATA_LEN,
			data.len()
		);
		ensure!(
			words.len() >= ENCODED_WORDS,
			"hid26 needs room for {} words, got {}",
			ENCODED_WORDS,
			words.len()
		);

		let payload = (u32::from(data[0]) << 16) | (u32::from(data[1]) << 8) | u32::from(data[2]);

		let mut even_parity = 0u32;
		for i in 12..24 {
			even_parity ^= (payload >> i) & 1;
		}
		let mut odd_parity = 1u32;
		for i in 0..12 {
			odd_parity ^= (payload >> i) & 1;
		}

		for word in &mut words[..ENCODED_WORDS] {
			*word = 0;
		}

		for (i, bit) in PREAMBLE.iter().enumerate() {
			set_raw_bit(words, i, *bit);
		}

		// OEM code, seven zero bits
		for i in 0..7 {
			set_pair(words, 8 + 2 * i, false);
		}

		// format header, only the last bit set
		for i in 0..6 {
			set_pair(words, 22 + 2 * i, i == 5);
		}

		set_pair(words, 34, 0 != even_parity);

		// payload, most significant bit first
		for i in 0..24 {
			set_pair(words, 36 + 2 * i, 0 != (payload >> (23 - i)) & 1);
		}

		set_pair(words, 84, 0 != odd_parity);

		Ok(())
	}
}

#[cfg(test)]
mod test {
	use crate::protocols::Protocol;

	use super::HidH10301;

	fn encode(data: &[u8; 3]) -> [u32; 3] {
		let mut words = [0u32; 3];
		HidH10301.encode(data, &mut words).unwrap();
		words
	}

	fn raw(words: &[u32; 3], position: usize) -> bool {
		0 != words[position / 32] & (1 << (31 - position % 32))
	}

	fn pair(words: &[u32; 3], position: usize) -> bool {
		let bit = raw(words, position);
		assert_ne!(bit, raw(words, position + 1), "pair at {} must be complementary", position);
		bit
	}

	// validates preamble, header and both parity laws, then recovers the
	// facility code and card number
	fn decode(words: &[u32; 3]) -> (u8, u16) {
		let preamble = (0..8).fold(0u8, |acc, i| (acc << 1) | raw(words, i) as u8);
		assert_eq!(preamble, 0x1d);

		for i in 0..7 {
			assert!(!pair(words, 8 + 2 * i), "oem bit {} must be zero", i);
		}
		for i in 0..6 {
			assert_eq!(pair(words, 22 + 2 * i), i == 5, "header bit {}", i);
		}

		let even = pair(words, 34);
		let payload = (0..24).fold(0u32, |acc, i| (acc << 1) | pair(words, 36 + 2 * i) as u32);
		let odd = pair(words, 84);

		let even_expected = (12..24).fold(0u32, |acc, i| acc ^ ((payload >> i) & 1));
		assert_eq!(even as u32, even_expected, "even parity law");
		let odd_expected = (0..12).fold(1u32, |acc, i| acc ^ ((payload >> i) & 1));
		assert_eq!(odd as u32, odd_expected, "odd parity law");

		// nothing after the odd parity pair
		assert_eq!(words[2] & 0x3ff, 0, "tail must stay clear");

		((payload >> 16) as u8, payload as u16)
	}

	#[test]
	fn all_zero_id() {
		assert_eq!(encode(&[0; 3]), [0x1d55_5555, 0x9555_5555, 0x5555_5800]);
	}

	#[test]
	fn round_trip() {
		for &(facility, card) in &[
			(0x01u8, 0x0001u16),
			(0x7b, 0x3039),
			(0xff, 0xffff),
			(0x80, 0x8000),
			(0x42, 0xbeef),
		] {
			let data = [facility, (card >> 8) as u8, card as u8];
			assert_eq!(decode(&encode(&data)), (facility, card));
		}
	}

	#[test]
	fn deterministic() {
		let data = [0x7b, 0x30, 0x39];
		assert_eq!(encode(&data), encode(&data));
	}
}
