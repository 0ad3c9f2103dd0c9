#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use ldapctl::controls::{oid, transform_controls};
use ldapctl::{DirectoryControl, ResponseControl};
use libfuzzer_sys::fuzz_target;

const OIDS: &[&str] = &[
    oid::PAGE_RESULT,
    oid::ASQ,
    oid::DIR_SYNC,
    oid::SORT_RESPONSE,
    oid::VLV_RESPONSE,
    "1.2.3.4",
];

#[derive(Arbitrary, Debug)]
struct FuzzControl {
    oid: u8,
    critical: bool,
    value: Option<Vec<u8>>,
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(fuzz_controls) = Vec::<FuzzControl>::arbitrary(&mut u) else {
        return;
    };

    let mut controls: Vec<ResponseControl> = fuzz_controls
        .iter()
        .filter_map(|c| {
            DirectoryControl::raw(
                OIDS[c.oid as usize % OIDS.len()],
                c.critical,
                c.value.as_deref(),
            )
            .ok()
        })
        .map(ResponseControl::from)
        .collect();
    let before = controls.clone();

    // A failed dispatch leaves the input untouched.
    if transform_controls(&mut controls).is_err() {
        assert_eq!(controls, before);
    }
});
