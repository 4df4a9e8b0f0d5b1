use std::fs;

use mqmon::broker::replay::ReplayClient;
use mqmon::broker::{AdminClient, Query, SessionError};
use tempfile::tempdir;

#[test]
fn test_replay_fixture_serves_canned_rows() {
    // Purpose: Verify the pipeline can run off a JSON fixture
    // Validates:
    // - Rows decode with their untagged value types
    // - Queries absent from the fixture return empty, not an error
    let dir = tempdir().unwrap();
    let path = dir.path().join("fixture.json");
    fs::write(
        &path,
        r#"{
            "responses": {
                "queue_inquire": [
                    {"qName": "Q1", "qDepth": 5, "qDepthMax": 10}
                ]
            }
        }"#,
    )
    .unwrap();

    let mut client = ReplayClient::from_file(&path).unwrap();
    let mut session = client.connect().unwrap();

    let rows = session.query(&Query::QueueInquire).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].text("qName"), Some("Q1"));
    assert_eq!(rows[0].number("qDepth"), Some(5));

    let rows = session.query(&Query::ChannelStatus).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn test_replay_fixture_can_script_a_connect_failure() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fixture.json");
    fs::write(&path, r#"{"fail_connect": 2059}"#).unwrap();

    let mut client = ReplayClient::from_file(&path).unwrap();
    match client.connect() {
        Err(SessionError::Unavailable { reason_code }) => assert_eq!(reason_code, 2059),
        other => panic!("expected unavailable error, got {:?}", other.map(|_| ())),
    };
}

#[test]
fn test_malformed_fixture_is_a_load_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fixture.json");
    fs::write(&path, "not json").unwrap();
    assert!(ReplayClient::from_file(&path).is_err());
}
