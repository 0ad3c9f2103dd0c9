#![no_main]

use arbitrary::Arbitrary;
use ldapctl::ber;
use libfuzzer_sys::fuzz_target;

// Formats used by the response decoders, plus whatever the fuzzer invents.
const FORMATS: &[&str] = &["{iO}", "{e}", "{iiO}", "{ea}", "{iieO}", "{iie}", "{{s}{ststb}}"];

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    format: FuzzFormat,
    bytes: Vec<u8>,
}

#[derive(Arbitrary, Debug)]
enum FuzzFormat {
    Known(u8),
    Random(String),
}

fuzz_target!(|input: FuzzInput| {
    let format = match &input.format {
        FuzzFormat::Known(index) => FORMATS[*index as usize % FORMATS.len()],
        FuzzFormat::Random(format) => format.as_str(),
    };

    let _ = ber::decode(format, &input.bytes);
    let _ = ber::try_decode(format, &input.bytes);
});
