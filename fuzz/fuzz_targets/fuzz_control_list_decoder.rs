#![no_main]

use bytes::BytesMut;
use ldapctl::wire::ControlListCodec;
use libfuzzer_sys::fuzz_target;
use tokio_util::codec::Decoder;

fuzz_target!(|data: &[u8]| {
    let mut buf = BytesMut::from(data);
    let mut codec = ControlListCodec;

    // Malformed input must surface as an error, never a panic.
    if let Ok(Some(controls)) = codec.decode(&mut buf) {
        let _ = ldapctl::controls::transform(controls);
    }
});
