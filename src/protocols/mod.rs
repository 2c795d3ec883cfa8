/// Credential encoders: pure transforms from a raw id to the 32-bit words
/// programmed into the tag's data blocks. Nothing in here touches timing
/// or hardware.
mod em_marin;
mod hid_h10301;
mod indala_40134;

pub use self::em_marin::EmMarin;
pub use self::hid_h10301::HidH10301;
pub use self::indala_40134::Indala40134;

use crate::AResult;

/// Most words any supported protocol encodes into.
pub const MAX_ENCODED_WORDS: usize = 3;

/// A credential format the writer can put on a T5577 tag.
pub trait Protocol {
	fn name(&self) -> &'static str;

	/// Raw id length in bytes.
	fn data_len(&self) -> usize;

	/// Number of data blocks the encoded credential occupies.
	fn encoded_words(&self) -> usize;

	/// Block 0 configuration word selecting modulation and bit rate for
	/// this format.
	fn config_block(&self) -> u32;

	/// Encode `data` into `words`.
	///
	/// Deterministic; fails if `data` is shorter than `data_len` or
	/// `words` shorter than `encoded_words`, before writing anything.
	fn encode(&self, data: &[u8], words: &mut [u32]) -> AResult<()>;
}

pub const ALL: [&dyn Protocol; 3] = [&EmMarin, &HidH10301, &Indala40134];

pub fn by_name(name: &str) -> Option<&'static dyn Protocol> {
	match name {
		"em" | "em4100" | "em-marin" => Some(&EmMarin),
		"hid" | "h10301" | "hid26" => Some(&HidH10301),
		"indala" | "indala-40134" | "i40134" => Some(&Indala40134),
		_ => None,
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn lookup_by_name() {
		for protocol in ALL.iter() {
			let found = by_name(protocol.name()).expect("canonical name must resolve");
			assert_eq!(found.name(), protocol.name());
		}
		assert!(by_name("t5577").is_none());
	}

	#[test]
	fn table_fits_word_buffer() {
		for protocol in ALL.iter() {
			assert!(protocol.encoded_words() <= MAX_ENCODED_WORDS, "{}", protocol.name());
		}
	}

	#[test]
	fn capacity_and_length_are_checked() {
		for protocol in ALL.iter() {
			let data = vec![0u8; protocol.data_len()];

			let mut short = vec![0u32; protocol.encoded_words() - 1];
			assert!(
				protocol.encode(&data, &mut short).is_err(),
				"{}: short output must fail",
				protocol.name()
			);

			let mut words = vec![0u32; protocol.encoded_words()];
			assert!(
				protocol.encode(&data[..data.len() - 1], &mut words).is_err(),
				"{}: short input must fail",
				protocol.name()
			);
			assert!(protocol.encode(&data, &mut words).is_ok());
		}
	}
}
