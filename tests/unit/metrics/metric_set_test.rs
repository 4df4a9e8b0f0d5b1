use mqmon::metrics::{AttributeValue, MetricSet, MetricValue};

#[test]
fn test_insertion_order_is_preserved() {
    let mut set = MetricSet::new();
    set.add_attr("provider", "IBM");
    set.add_gauge("qDepth", 5.0);
    set.add_rate("msgsRate", 120.0);

    let names: Vec<&str> = set.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["provider", "qDepth", "msgsRate"]);
}

#[test]
fn test_duplicate_names_are_tolerated() {
    // Independent queries may contribute the same field name before the
    // merge step; the set keeps both.
    let mut set = MetricSet::new();
    set.add_attr("statusType", "topicStatus");
    set.add_attr("statusType", "topicSub");
    assert_eq!(set.count("statusType"), 2);
    assert_eq!(
        set.get("statusType"),
        Some(&MetricValue::Attribute(AttributeValue::Text(
            "topicStatus".to_string()
        )))
    );
}

#[test]
fn test_json_shape() {
    // Purpose: Verify the reporting-sink JSON shape: an ordered array of
    // tagged entries, attributes untagged by payload type
    let mut set = MetricSet::new();
    set.add_attr("provider", "IBM");
    set.add_gauge("qDepth", 5.0);
    set.add_rate("msgsRate", 120.0);
    set.add_attr_number("error", 0);

    let json = serde_json::to_value(&set).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"name": "provider", "type": "attribute", "value": "IBM"},
            {"name": "qDepth", "type": "gauge", "value": 5.0},
            {"name": "msgsRate", "type": "rate", "value": 120.0},
            {"name": "error", "type": "attribute", "value": 0},
        ])
    );
}
