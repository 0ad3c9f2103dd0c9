use ldapctl::ber::{self, BerValue};
use ldapctl::controls::{
    oid, AsqRequest, CrossDomainMoveRequest, DirSyncOptions, DirSyncRequest, ExtendedDnFlag,
    ExtendedDnRequest, PageResultRequest, QuotaRequest, SearchOption, SearchOptionsRequest,
    SecurityDescriptorFlagRequest, SecurityMasks, SortRequest, VerifyNameRequest, VlvRequest,
};
use ldapctl::{ControlError, RequestControl, SortKey};

#[test]
fn test_default_page_request_encodes_512() {
    let mut page = PageResultRequest::new();
    let bytes = page.encode().unwrap();

    assert_eq!(bytes, vec![0x30, 0x06, 0x02, 0x02, 0x02, 0x00, 0x04, 0x00]);
    assert_eq!(
        ber::decode("{io}", &bytes).unwrap(),
        vec![BerValue::Integer(512), BerValue::Octets(Vec::new())]
    );
    assert!(page.critical());
    assert!(page.control().server_side());
}

#[test]
fn test_negative_page_size_rejected_without_side_effects() {
    let mut page = PageResultRequest::with_page_size(25).unwrap();
    page.encode().unwrap();
    let before = page.value();

    let result = page.set_page_size(-1);
    assert!(matches!(result, Err(ControlError::Validation(_))));
    assert_eq!(page.page_size(), 25);
    assert_eq!(page.value(), before);
}

#[test]
fn test_sort_keys_encoded_in_order() {
    let mut sort = SortRequest::new(vec![
        SortKey::new("cn", None, false).unwrap(),
        SortKey::new("sn", Some("caseIgnoreMatch"), true).unwrap(),
    ]);
    let bytes = sort.encode().unwrap();

    let values = ber::decode("{{s}{ststb}}", &bytes).unwrap();
    assert_eq!(
        values,
        vec![
            BerValue::String("cn".to_string()),
            BerValue::String("sn".to_string()),
            BerValue::Tag(0x80),
            BerValue::String("caseIgnoreMatch".to_string()),
            BerValue::Tag(0x81),
            BerValue::Boolean(true),
        ]
    );
    assert_eq!(sort.oid(), oid::SORT_REQUEST);
}

#[test]
fn test_sort_keys_accessor_returns_copy() {
    let mut sort = SortRequest::single("cn", None, false).unwrap();
    let mut keys = sort.sort_keys();
    keys[0].set_reverse_order(true);
    keys.push(SortKey::new("sn", None, false).unwrap());

    assert_eq!(sort.sort_keys().len(), 1);
    assert!(!sort.sort_keys()[0].reverse_order());

    sort.set_sort_keys(keys);
    assert_eq!(sort.sort_keys().len(), 2);
}

#[test]
fn test_empty_sort_key_name_rejected() {
    assert!(matches!(
        SortKey::new("", None, false),
        Err(ControlError::Validation(_))
    ));
}

#[test]
fn test_vlv_forms_are_exclusive() {
    let mut by_offset = VlvRequest::by_offset(0, 9, 1).unwrap();
    by_offset.set_estimate_count(50).unwrap();
    let offset_bytes = by_offset.encode().unwrap();
    assert_eq!(
        ber::decode("{iit{ii}}", &offset_bytes).unwrap(),
        vec![
            BerValue::Integer(0),
            BerValue::Integer(9),
            BerValue::Tag(0xa0),
            BerValue::Integer(1),
            BerValue::Integer(50),
        ]
    );

    let mut by_target = VlvRequest::by_target(0, 9, b"m").unwrap();
    by_target.set_offset(1).unwrap();
    by_target.set_estimate_count(50).unwrap();
    let target_bytes = by_target.encode().unwrap();
    assert_eq!(
        ber::decode("{iito}", &target_bytes).unwrap(),
        vec![
            BerValue::Integer(0),
            BerValue::Integer(9),
            BerValue::Tag(0x81),
            BerValue::Octets(b"m".to_vec()),
        ]
    );
}

#[test]
fn test_vlv_context_id_appended() {
    let mut vlv = VlvRequest::by_offset(2, 2, 10).unwrap();
    vlv.set_context_id(Some(b"ctx"));
    let bytes = vlv.encode().unwrap();

    let values = ber::decode("{iit{ii}o}", &bytes).unwrap();
    assert_eq!(values.last(), Some(&BerValue::Octets(b"ctx".to_vec())));
}

#[test]
fn test_dir_sync_request_shape() {
    let mut sync = DirSyncRequest::new(
        Some(b"cookie"),
        DirSyncOptions::OBJECT_SECURITY | DirSyncOptions::INCREMENTAL_VALUES,
    );
    let bytes = sync.encode().unwrap();

    assert_eq!(
        ber::decode("{iio}", &bytes).unwrap(),
        vec![
            BerValue::Integer(0x8000_0001u32 as i32),
            BerValue::Integer(1_048_576),
            BerValue::Octets(b"cookie".to_vec()),
        ]
    );
}

#[test]
fn test_verify_name_is_utf16() {
    let mut verify = VerifyNameRequest::new("dc");
    let bytes = verify.encode().unwrap();

    assert_eq!(
        ber::decode("{io}", &bytes).unwrap(),
        vec![
            BerValue::Integer(0),
            BerValue::Octets(vec![b'd', 0x00, b'c', 0x00]),
        ]
    );
}

#[test]
fn test_single_integer_controls() {
    let mut sd = SecurityDescriptorFlagRequest::new(SecurityMasks::OWNER | SecurityMasks::DACL);
    assert_eq!(
        ber::decode("{i}", &sd.encode().unwrap()).unwrap(),
        vec![BerValue::Integer(5)]
    );

    let mut options = SearchOptionsRequest::new(SearchOption::DomainScope);
    assert!(options.set_option_value(3).is_err());
    assert_eq!(options.option(), SearchOption::DomainScope);
    assert_eq!(
        ber::decode("{i}", &options.encode().unwrap()).unwrap(),
        vec![BerValue::Integer(1)]
    );

    let mut extended = ExtendedDnRequest::new(ExtendedDnFlag::StandardString);
    assert_eq!(
        ber::decode("{i}", &extended.encode().unwrap()).unwrap(),
        vec![BerValue::Integer(1)]
    );
}

#[test]
fn test_quota_and_cross_domain_move() {
    let mut quota = QuotaRequest::new(&[0x01, 0x05]);
    assert_eq!(
        ber::decode("{o}", &quota.encode().unwrap()).unwrap(),
        vec![BerValue::Octets(vec![0x01, 0x05])]
    );

    let mut moved = CrossDomainMoveRequest::new(Some("dc2".to_string()));
    assert_eq!(moved.encode().unwrap(), b"dc2\0\0".to_vec());

    let mut unset = CrossDomainMoveRequest::new(None);
    assert!(unset.encode().unwrap().is_empty());
    assert!(!unset.control().has_value());
}

#[test]
fn test_value_copies_do_not_alias() {
    let mut asq: RequestControl = AsqRequest::new("member").into();
    asq.encode().unwrap();

    let mut first = asq.control().value();
    let second = asq.control().value();
    assert_eq!(first, second);

    first.clear();
    assert_eq!(asq.control().value(), second);
}
