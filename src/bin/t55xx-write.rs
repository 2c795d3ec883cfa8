#[macro_use]
extern crate clap;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

extern crate t55xx_writer;
use t55xx_writer::*;

use std::process::exit;

use t55xx_writer::field::SimulatedField;
use t55xx_writer::t55xx::{
	self,
	RfidWriter,
};

fn parse_id(hex: &str, len: usize) -> AResult<Vec<u8>> {
	let digits: String = hex
		.chars()
		.filter(|c| !c.is_ascii_whitespace() && *c != ':')
		.collect();
	ensure!(
		digits.len() == 2 * len,
		"id must be {} hex bytes, got {} digits",
		len,
		digits.len()
	);

	let mut data = Vec::with_capacity(len);
	for i in 0..len {
		let byte = u8::from_str_radix(&digits[2 * i..2 * i + 2], 16).map_err(|e| {
			format_err!("invalid hex byte {:?}: {}", &digits[2 * i..2 * i + 2], e)
		})?;
		data.push(byte);
	}
	Ok(data)
}

fn supported_protocols() -> String {
	let names: Vec<&str> = protocols::ALL.iter().map(|p| p.name()).collect();
	names.join(", ")
}

fn main_app() -> AResult<()> {
	let matches = clap_app!(t55xx_write =>
		(version: crate_version!())
		(about: "Encode a credential and run the T5577 write sequence against simulated field hardware")
		(@arg protocol: +required "Credential protocol (em4100, hid26, indala-40134)")
		(@arg id: +required "Credential id as hex bytes (5 for em4100, 3 for the others)")
		(@arg trace: --trace "Print every hardware event with its virtual timestamp")
	).get_matches();

	let name = matches.value_of("protocol").unwrap_or("");
	let protocol = match protocols::by_name(name) {
		Some(p) => p,
		None => bail!("unknown protocol {:?} (supported: {})", name, supported_protocols()),
	};
	let data = parse_id(matches.value_of("id").unwrap_or(""), protocol.data_len())?;

	let mut words = [0u32; protocols::MAX_ENCODED_WORDS];
	protocol.encode(&data, &mut words)?;
	info!("{}: config block 0: 0x{:08x}", protocol.name(), protocol.config_block());
	for (i, word) in words[..protocol.encoded_words()].iter().enumerate() {
		info!("{}: data block {}: 0x{:08x}", protocol.name(), i + 1, word);
	}

	let mut writer = RfidWriter::new(SimulatedField::new());
	writer.start()?;
	writer.write_credential(protocol, &data)?;
	writer.stop()?;

	let sim = writer.into_hardware();
	let bits = t55xx::modulation_bits(sim.events());
	info!("session: {} command bits, {} us of field time", bits.len(), sim.elapsed_us());

	if matches.is_present("trace") {
		for (at, event) in sim.timeline() {
			println!("{:>9} us  {}", at, event);
		}
	}

	Ok(())
}

fn main() {
	env_logger::from_env(env_logger::Env::default().default_filter_or("info")).init();

	if let Err(e) = main_app() {
		error!("Error: {}", e);
		exit(1);
	}
}
