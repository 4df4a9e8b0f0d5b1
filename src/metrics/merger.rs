use std::collections::HashMap;

use super::names;
use super::MetricSet;

/// Merges partial metric sets contributed by independent administrative
/// queries into one record per object name.
///
/// Records live for a single poll cycle. The first contribution for a name
/// seeds the record with the common-attribute prefix (provider, object kind,
/// queue-manager name, queue-manager host, object name) exactly once;
/// later contributions append their fields in query-execution order. A name
/// first seen by a later query still gets a fully prefixed record, so query
/// ordering can never silently drop objects.
#[derive(Debug)]
pub struct RecordMerger {
    object_kind: &'static str,
    name_attribute: &'static str,
    manager_name: String,
    manager_host: String,
    // Keyed by the case-normalized name; insertion order preserved for
    // deterministic emission.
    index: HashMap<String, usize>,
    records: Vec<(String, MetricSet)>,
}

impl RecordMerger {
    pub fn new(
        object_kind: &'static str,
        name_attribute: &'static str,
        manager_name: &str,
        manager_host: &str,
    ) -> Self {
        Self {
            object_kind,
            name_attribute,
            manager_name: manager_name.to_string(),
            manager_host: manager_host.to_string(),
            index: HashMap::new(),
            records: Vec::new(),
        }
    }

    /// The record for `name`, created and prefixed on first sighting.
    ///
    /// Names are trimmed and keyed case-insensitively; the emitted name
    /// attribute keeps the trimmed original spelling.
    pub fn record_mut(&mut self, name: &str) -> &mut MetricSet {
        let display = name.trim();
        let key = display.to_uppercase();

        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let mut set = MetricSet::new();
                set.add_attr(names::PROVIDER, names::IBM_PROVIDER);
                set.add_attr(names::OBJECT_ATTRIBUTE, self.object_kind);
                set.add_attr(names::Q_MANAGER_NAME, self.manager_name.clone());
                set.add_attr(names::Q_MANAGER_HOST, self.manager_host.clone());
                set.add_attr(self.name_attribute, display);

                let slot = self.records.len();
                self.records.push((display.to_string(), set));
                self.index.insert(key, slot);
                slot
            }
        };

        &mut self.records[slot].1
    }

    /// Drain all accumulated records in first-sighting order.
    pub fn into_records(self) -> impl Iterator<Item = (String, MetricSet)> {
        self.records.into_iter()
    }
}
