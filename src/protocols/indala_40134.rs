use crate::AResult;

use super::Protocol;

/// Indala 40134, a 64-bit PSK frame in two words.
///
/// The payload is not laid out sequentially: each of the 8 facility-code
/// bits and 16 card-number bits has a fixed slot scattered through the
/// frame. Around them sit three preamble bits, one parity bit per payload
/// half and a 2-bit checksum at the end; the remaining slots stay clear.
pub struct Indala40134;

const DATA_LEN: usize = 3;
const ENCODED_WORDS: usize = 2;

// PSK1, RF/32, 2 data blocks
const CONFIG_BLOCK: u32 = 0b00000000_00001000_00010000_01000000;

const PREAMBLE_SLOTS: [usize; 3] = [0, 2, 32];

// frame slot of facility-code bit i
const FC_SLOTS: [usize; 8] = [51, 57, 49, 44, 47, 48, 53, 39];

// frame slot of card-number bit i
const CN_SLOTS: [usize; 16] = [
	42, 45, 43, 40, 58, 41, 33, 35,
	36, 37, 50, 54, 56, 59, 60, 61,
];

// even parity of the facility code / odd parity of the card number
const FC_PARITY_SLOT: usize = 34;
const CN_PARITY_SLOT: usize = 38;

const CHECKSUM_SLOTS: [usize; 2] = [62, 63];

fn set_bit(words: &mut [u32], position: usize, value: bool) {
	if value {
		words[position / 32] |= 1 << (31 - position % 32);
	} else {
		words[position / 32] &= !(1 << (31 - position % 32));
	}
}

// number of set odd-indexed bits, the checksum input
fn odd_indexed_ones(value: u32, bits: usize) -> u32 {
	let mut sum = 0;
	let mut i = 1;
	while i < bits {
		sum += (value >> i) & 1;
		i += 2;
	}
	sum
}

impl Protocol for Indala40134 {
	fn name(&self) -> &'static str {
		"indala-40134"
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
			"indala-40134 id needs {} bytes, got {}",
			DATA_LEN,
			data.len()
		);
		ensure!(
			words.len() >= ENCODED_WORDS,
			"indala-40134 needs room for {} words, got {}",
			ENCODED_WORDS,
			words.len()
		);

		let facility = data[0];
		let card = (u16::from(data[1]) << 8) | u16::from(data[2]);

		for word in &mut words[..ENCODED_WORDS] {
			*word = 0;
		}

		for &slot in PREAMBLE_SLOTS.iter() {
			set_bit(words, slot, true);
		}

		for (i, &slot) in FC_SLOTS.iter().enumerate() {
			set_bit(words, slot, 0 != (facility >> i) & 1);
		}
		for (i, &slot) in CN_SLOTS.iter().enumerate() {
			set_bit(words, slot, 0 != (card >> i) & 1);
		}

		set_bit(words, FC_PARITY_SLOT, 0 != facility.count_ones() & 1);
		set_bit(words, CN_PARITY_SLOT, 0 == card.count_ones() & 1);

		// checksum, one of two complementary tail patterns
		let checksum = odd_indexed_ones(u32::from(facility), 8)
			+ odd_indexed_ones(u32::from(card), 16);
		if 0 == checksum & 1 {
			set_bit(words, CHECKSUM_SLOTS[0], true);
			set_bit(words, CHECKSUM_SLOTS[1], false);
		} else {
			set_bit(words, CHECKSUM_SLOTS[0], false);
			set_bit(words, CHECKSUM_SLOTS[1], true);
		}

		Ok(())
	}
}
