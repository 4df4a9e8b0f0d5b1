pub mod merger;
pub mod names;

use serde::ser::{Serialize, Serializer};

/// A single normalized metric value. Immutable once constructed.
///
/// `Rate` carries the current raw count; the reporting sink computes the
/// delta-per-second from the prior sample.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum MetricValue {
    Gauge(f64),
    Rate(f64),
    Attribute(AttributeValue),
}

/// Payload of an attribute metric: text, number, or raw bytes.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Number(i64),
    Bytes(Vec<u8>),
}

/// An ordered sequence of named metric values.
///
/// Insertion order is preserved; name uniqueness is not enforced because
/// independent queries may legitimately contribute duplicate names before
/// the merge step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSet(Vec<(String, MetricValue)>);

impl MetricSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: MetricValue) {
        self.0.push((name.into(), value));
    }

    pub fn add_gauge(&mut self, name: impl Into<String>, value: f64) {
        self.push(name, MetricValue::Gauge(value));
    }

    pub fn add_rate(&mut self, name: impl Into<String>, value: f64) {
        self.push(name, MetricValue::Rate(value));
    }

    pub fn add_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.push(name, MetricValue::Attribute(AttributeValue::Text(value.into())));
    }

    pub fn add_attr_number(&mut self, name: impl Into<String>, value: i64) {
        self.push(name, MetricValue::Attribute(AttributeValue::Number(value)));
    }

    pub fn add_attr_bytes(&mut self, name: impl Into<String>, value: Vec<u8>) {
        self.push(name, MetricValue::Attribute(AttributeValue::Bytes(value)));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, MetricValue)> {
        self.0.iter()
    }

    /// First value recorded under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Number of entries recorded under `name`.
    pub fn count(&self, name: &str) -> usize {
        self.0.iter().filter(|(n, _)| n == name).count()
    }
}

impl Serialize for MetricSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(serde::Serialize)]
        struct Entry<'a> {
            name: &'a str,
            #[serde(flatten)]
            value: &'a MetricValue,
        }

        serializer.collect_seq(self.0.iter().map(|(name, value)| Entry { name, value }))
    }
}
