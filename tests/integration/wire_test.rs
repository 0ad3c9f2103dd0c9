use bytes::BytesMut;
use ldapctl::ber::{self, BerValue};
use ldapctl::controls::registry::encode_all;
use ldapctl::controls::{oid, MarkerKind, MarkerRequest, PageResultRequest, VlvRequest};
use ldapctl::wire::ControlListCodec;
use ldapctl::{transform_controls, DirectoryControl, RequestControl, ResponseControl, SortKey};
use tokio_util::codec::{Decoder, Encoder};

#[test]
fn test_request_controls_survive_framing() {
    let mut requests: Vec<RequestControl> = vec![
        PageResultRequest::with_page_size(50).unwrap().into(),
        ldapctl::controls::SortRequest::new(vec![SortKey::new("sn", None, true).unwrap()]).into(),
        VlvRequest::by_target(0, 5, b"j").unwrap().into(),
        MarkerRequest::new(MarkerKind::TreeDelete).into(),
    ];
    let wire = encode_all(&mut requests).unwrap();

    let mut codec = ControlListCodec;
    let mut buf = BytesMut::new();
    codec.encode(wire.clone(), &mut buf).unwrap();

    let decoded = codec.decode(&mut buf).unwrap().unwrap();
    assert_eq!(decoded.len(), wire.len());
    for (sent, received) in wire.iter().zip(decoded.iter()) {
        assert_eq!(sent.oid(), received.oid());
        assert_eq!(sent.critical(), received.critical());
        assert_eq!(sent.value(), received.value());
        assert_eq!(sent.has_value(), received.has_value());
    }
}

#[test]
fn test_byte_by_byte_feed() {
    let page = ber::encode(
        "{io}",
        &[BerValue::Integer(7), BerValue::Octets(b"abc".to_vec())],
    )
    .unwrap();
    let controls = vec![DirectoryControl::raw(oid::PAGE_RESULT, false, Some(&page)).unwrap()];
    let bytes = ControlListCodec::encode_list(&controls).unwrap();

    let mut codec = ControlListCodec;
    let mut buf = BytesMut::new();
    let mut result = None;
    for (i, byte) in bytes.iter().enumerate() {
        buf.extend_from_slice(&[*byte]);
        let decoded = codec.decode(&mut buf).unwrap();
        if i + 1 < bytes.len() {
            assert!(decoded.is_none());
        } else {
            result = decoded;
        }
    }

    let decoded = result.unwrap();
    assert_eq!(decoded, controls);
}

#[test]
fn test_two_frames_in_one_buffer() {
    let first = vec![MarkerRequest::new(MarkerKind::ShowDeleted).into_control()];
    let second = vec![MarkerRequest::new(MarkerKind::LazyCommit).into_control()];

    let mut buf = BytesMut::new();
    buf.extend_from_slice(&ControlListCodec::encode_list(&first).unwrap());
    buf.extend_from_slice(&ControlListCodec::encode_list(&second).unwrap());

    let mut codec = ControlListCodec;
    let a = codec.decode(&mut buf).unwrap().unwrap();
    let b = codec.decode(&mut buf).unwrap().unwrap();
    assert_eq!(a[0].oid(), oid::SHOW_DELETED);
    assert_eq!(b[0].oid(), oid::LAZY_COMMIT);
    assert!(buf.is_empty());
    assert!(codec.decode(&mut buf).unwrap().is_none());
}

#[test]
fn test_wire_to_dispatch() {
    let sort = ber::encode("{e}", &[BerValue::Enumerated(0)]).unwrap();
    let controls = vec![
        DirectoryControl::raw(oid::SORT_RESPONSE, false, Some(&sort)).unwrap(),
        DirectoryControl::raw("1.3.6.1.4.1.1466.29539.12", false, None).unwrap(),
    ];
    let mut buf = BytesMut::from(&ControlListCodec::encode_list(&controls).unwrap()[..]);

    let received = ControlListCodec.decode(&mut buf).unwrap().unwrap();
    let mut responses: Vec<ResponseControl> = received.into_iter().map(Into::into).collect();
    transform_controls(&mut responses).unwrap();

    assert!(matches!(responses[0], ResponseControl::Sort(_)));
    assert!(responses[1].is_raw());
}
