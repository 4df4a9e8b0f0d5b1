use std::io::{self, Write};

use serde::Serialize;
use tracing::error;

use crate::metrics::MetricSet;

/// The reporting sink. Fire-and-forget: the collection core never consumes
/// a return value from the sink.
pub trait Reporter {
    fn report(&mut self, sample_kind: &str, metrics: MetricSet, entity_key: Option<&str>);
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SampleRecord<'a> {
    sample_kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    entity_key: Option<&'a str>,
    metrics: &'a MetricSet,
}

/// Writes one JSON document per record, newline-delimited.
pub struct JsonLineReporter<W: Write> {
    out: W,
}

impl JsonLineReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> JsonLineReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for JsonLineReporter<W> {
    fn report(&mut self, sample_kind: &str, metrics: MetricSet, entity_key: Option<&str>) {
        let record = SampleRecord {
            sample_kind,
            entity_key,
            metrics: &metrics,
        };
        match serde_json::to_string(&record) {
            Ok(line) => {
                if let Err(e) = writeln!(self.out, "{line}") {
                    error!("failed to write sample record: {}", e);
                }
            }
            Err(e) => error!("failed to serialize sample record: {}", e),
        }
    }
}
