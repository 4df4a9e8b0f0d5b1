use mqmon::metrics::MetricSet;
use mqmon::reporting::{JsonLineReporter, Reporter};

fn lines(out: Vec<u8>) -> Vec<serde_json::Value> {
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn test_one_json_document_per_record() {
    let mut reporter = JsonLineReporter::new(Vec::new());

    let mut set = MetricSet::new();
    set.add_attr("provider", "IBM");
    set.add_gauge("qDepth", 5.0);
    reporter.report("MQQueueSample", set, Some("Q1"));

    let mut set = MetricSet::new();
    set.add_attr("queueManager", "QM1");
    reporter.report("MQEventSample", set, None);

    let records = lines(reporter.into_inner());
    assert_eq!(records.len(), 2);

    assert_eq!(records[0]["sampleKind"], "MQQueueSample");
    assert_eq!(records[0]["entityKey"], "Q1");
    assert_eq!(
        records[0]["metrics"],
        serde_json::json!([
            {"name": "provider", "type": "attribute", "value": "IBM"},
            {"name": "qDepth", "type": "gauge", "value": 5.0},
        ])
    );

    // No entity key: the field is omitted entirely.
    assert_eq!(records[1]["sampleKind"], "MQEventSample");
    assert!(records[1].get("entityKey").is_none());
}
