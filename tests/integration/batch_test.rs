use ldapctl::batch::{ControlBatch, ControlSummary};
use ldapctl::ControlError;
use std::fs;

fn write_batch(content: &str) -> tempfile::NamedTempFile {
    let temp_file = tempfile::NamedTempFile::new().unwrap();
    fs::write(temp_file.path(), content).unwrap();
    temp_file
}

#[test]
fn test_load_and_transform() {
    // DirSync response: more data, 3 entries, cookie "ck"
    let temp_file = write_batch(
        r#"
controls:
  - oid: 1.2.840.113556.1.4.841
    value: MAoCAQECAQMEAmNr
  - oid: 2.16.840.1.113730.3.4.10
    value: MAkCAQECAQoKAQA=
"#,
    );

    let controls = ControlBatch::load(temp_file.path())
        .unwrap()
        .transform()
        .unwrap();
    let summaries: Vec<ControlSummary> = controls.iter().map(ControlSummary::from).collect();

    assert_eq!(
        summaries[0],
        ControlSummary::DirSync {
            oid: "1.2.840.113556.1.4.841".to_string(),
            critical: false,
            more_data: true,
            result_size: 3,
            cookie: "Y2s=".to_string(),
        }
    );
    assert_eq!(
        summaries[1],
        ControlSummary::Vlv {
            oid: "2.16.840.1.113730.3.4.10".to_string(),
            critical: false,
            target_position: 1,
            content_count: 10,
            result: 0,
            context_id: String::new(),
        }
    );
}

#[test]
fn test_empty_batch() {
    let temp_file = write_batch("controls: []\n");
    let controls = ControlBatch::load(temp_file.path())
        .unwrap()
        .transform()
        .unwrap();
    assert!(controls.is_empty());
}

#[test]
fn test_missing_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let result = ControlBatch::load(&dir.path().join("missing.yaml"));
    assert!(matches!(result, Err(ControlError::Io(_))));
}

#[test]
fn test_malformed_known_control_in_batch() {
    let temp_file = write_batch(
        r#"
controls:
  - oid: 1.2.840.113556.1.4.319
    value: /w==
"#,
    );
    let result = ControlBatch::load(temp_file.path()).unwrap().transform();
    assert!(matches!(result, Err(ControlError::Decode(_))));
}

#[test]
fn test_blank_oid_rejected() {
    let batch = ControlBatch::from_yaml_str("controls:\n  - oid: ''\n").unwrap();
    assert!(matches!(
        batch.into_controls(),
        Err(ControlError::Validation(_))
    ));
}
