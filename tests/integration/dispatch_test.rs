use ldapctl::ber::{self, BerValue};
use ldapctl::controls::{oid, transform};
use ldapctl::{transform_controls, ControlError, DirectoryControl, ResponseControl, ResultCode};

fn raw(oid: &str, format: &str, values: &[BerValue]) -> DirectoryControl {
    let bytes = ber::encode(format, values).unwrap();
    DirectoryControl::raw(oid, false, Some(&bytes)).unwrap()
}

#[test]
fn test_page_and_unknown() {
    let unknown = DirectoryControl::raw("1.2.3.4.5", true, Some(b"opaque")).unwrap();
    let controls = transform(vec![
        raw(
            oid::PAGE_RESULT,
            "{io}",
            &[BerValue::Integer(120), BerValue::Octets(b"next".to_vec())],
        ),
        unknown.clone(),
    ])
    .unwrap();

    match &controls[0] {
        ResponseControl::PageResult(page) => {
            assert_eq!(page.total_count(), 120);
            assert_eq!(page.cookie(), b"next".to_vec());
        }
        other => panic!("Expected PageResult, got {:?}", other),
    }
    assert_eq!(controls[1], ResponseControl::Raw(unknown));
}

#[test]
fn test_exhausted_page_cookie_is_empty() {
    let controls = transform(vec![raw(
        oid::PAGE_RESULT,
        "{io}",
        &[BerValue::Integer(0), BerValue::Octets(Vec::new())],
    )])
    .unwrap();

    match &controls[0] {
        ResponseControl::PageResult(page) => assert!(page.cookie().is_empty()),
        other => panic!("Expected PageResult, got {:?}", other),
    }
}

#[test]
fn test_dir_sync_more_data() {
    for (flag, expected) in [(0, false), (7, true)] {
        let controls = transform(vec![raw(
            oid::DIR_SYNC,
            "{iio}",
            &[
                BerValue::Integer(flag),
                BerValue::Integer(250),
                BerValue::Octets(b"ck".to_vec()),
            ],
        )])
        .unwrap();

        match &controls[0] {
            ResponseControl::DirSync(sync) => {
                assert_eq!(sync.more_data(), expected);
                assert_eq!(sync.result_size(), 250);
                assert_eq!(sync.cookie(), b"ck".to_vec());
            }
            other => panic!("Expected DirSync, got {:?}", other),
        }
    }
}

#[test]
fn test_sort_response_with_and_without_attribute() {
    let with_attribute = raw(
        oid::SORT_RESPONSE,
        "{ets}",
        &[
            BerValue::Enumerated(16),
            BerValue::Tag(0x80),
            BerValue::String("cn".to_string()),
        ],
    );
    let without_attribute = raw(oid::SORT_RESPONSE, "{e}", &[BerValue::Enumerated(53)]);

    let controls = transform(vec![with_attribute, without_attribute]).unwrap();

    match &controls[0] {
        ResponseControl::Sort(sort) => {
            assert_eq!(sort.result(), ResultCode::NoSuchAttribute);
            assert_eq!(sort.attribute_name(), Some("cn"));
        }
        other => panic!("Expected Sort, got {:?}", other),
    }
    match &controls[1] {
        ResponseControl::Sort(sort) => {
            assert_eq!(sort.result(), ResultCode::UnwillingToPerform);
            assert_eq!(sort.attribute_name(), None);
        }
        other => panic!("Expected Sort, got {:?}", other),
    }
}

#[test]
fn test_sort_request_oid_is_not_decoded() {
    let request_oid = raw(oid::SORT_REQUEST, "{e}", &[BerValue::Enumerated(0)]);
    let controls = transform(vec![request_oid.clone()]).unwrap();
    assert_eq!(controls[0], ResponseControl::Raw(request_oid));
}

#[test]
fn test_vlv_response_context_optional() {
    let with_context = raw(
        oid::VLV_RESPONSE,
        "{iieo}",
        &[
            BerValue::Integer(3),
            BerValue::Integer(1000),
            BerValue::Enumerated(0),
            BerValue::Octets(b"ctx".to_vec()),
        ],
    );
    let without_context = raw(
        oid::VLV_RESPONSE,
        "{iie}",
        &[
            BerValue::Integer(1),
            BerValue::Integer(0),
            BerValue::Enumerated(61),
        ],
    );

    let controls = transform(vec![with_context, without_context]).unwrap();

    match &controls[0] {
        ResponseControl::Vlv(vlv) => {
            assert_eq!(vlv.target_position(), 3);
            assert_eq!(vlv.content_count(), 1000);
            assert_eq!(vlv.result(), ResultCode::Success);
            assert_eq!(vlv.context_id(), b"ctx".to_vec());
        }
        other => panic!("Expected Vlv, got {:?}", other),
    }
    match &controls[1] {
        ResponseControl::Vlv(vlv) => {
            assert_eq!(vlv.result(), ResultCode::OffsetRangeError);
            assert!(vlv.context_id().is_empty());
        }
        other => panic!("Expected Vlv, got {:?}", other),
    }
}

#[test]
fn test_asq_unrecognized_result_code() {
    let controls = transform(vec![raw(oid::ASQ, "{e}", &[BerValue::Enumerated(4242)])]).unwrap();
    match &controls[0] {
        ResponseControl::Asq(asq) => {
            assert_eq!(asq.result(), ResultCode::Unrecognized(4242));
            assert_eq!(asq.result().code(), 4242);
        }
        other => panic!("Expected Asq, got {:?}", other),
    }
}

#[test]
fn test_response_keeps_raw_control() {
    let control = DirectoryControl::raw(oid::ASQ, true, Some(&[0x30, 0x03, 0x0a, 0x01, 0x00]))
        .unwrap();
    let controls = transform(vec![control.clone()]).unwrap();

    let typed = &controls[0];
    assert!(!typed.is_raw());
    assert_eq!(typed.oid(), oid::ASQ);
    assert!(typed.control().critical());
    assert_eq!(typed.control().value(), control.value());
}

#[test]
fn test_malformed_known_control_aborts() {
    let good = raw(oid::ASQ, "{e}", &[BerValue::Enumerated(0)]);
    let bad = DirectoryControl::raw(oid::VLV_RESPONSE, false, Some(&[0x30, 0x03, 0x02, 0x01]))
        .unwrap();

    let mut controls = vec![ResponseControl::from(good), ResponseControl::from(bad)];
    let before = controls.clone();

    assert!(matches!(
        transform_controls(&mut controls),
        Err(ControlError::Decode(_))
    ));
    assert_eq!(controls, before);
}

#[test]
fn test_missing_value_on_known_oid_is_error() {
    let empty = DirectoryControl::raw(oid::PAGE_RESULT, false, None).unwrap();
    assert!(matches!(
        transform(vec![empty]),
        Err(ControlError::Decode(_))
    ));
}

#[test]
fn test_trailing_bytes_after_known_value_abort() {
    let corrupted = DirectoryControl::raw(
        oid::ASQ,
        false,
        Some(&[0x30, 0x03, 0x0a, 0x01, 0x00, 0xde, 0xad, 0xbe, 0xef]),
    )
    .unwrap();
    let mut controls = vec![ResponseControl::from(corrupted)];
    let before = controls.clone();

    assert!(matches!(
        transform_controls(&mut controls),
        Err(ControlError::Decode(_))
    ));
    assert_eq!(controls, before);

    let page = DirectoryControl::raw(
        oid::PAGE_RESULT,
        false,
        Some(&[0x30, 0x05, 0x02, 0x01, 0x05, 0x04, 0x00, 0x30, 0x99]),
    )
    .unwrap();
    assert!(matches!(
        transform(vec![page]),
        Err(ControlError::Decode(_))
    ));
}
