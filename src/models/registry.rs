//! Self-learning registry of detail titles and their known values.
//!
//! Tracks which detail titles ("Eye Color", "Allegiance") have been used across
//! entries. Enumerated titles also remember every value recorded for them, so
//! an editor can offer suggestions without a fixed schema.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::entry::Entry;

/// How values of a detail type are suggested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailKind {
    /// Any text; values are not remembered.
    #[default]
    Freeform,
    /// Values are remembered and offered as choices.
    Enumerated,
}

impl DetailKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailKind::Freeform => "freeform",
            DetailKind::Enumerated => "enumerated",
        }
    }
}

impl std::str::FromStr for DetailKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "freeform" => Ok(DetailKind::Freeform),
            "enumerated" => Ok(DetailKind::Enumerated),
            other => Err(format!(
                "unknown detail kind '{}' (expected 'freeform' or 'enumerated')",
                other
            )),
        }
    }
}

impl std::fmt::Display for DetailKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A known detail title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailType {
    pub title: String,
    pub kind: DetailKind,
    /// Non-empty, trimmed values. Always empty for freeform types that were
    /// never enumerated.
    pub known_values: BTreeSet<String>,
}

/// Persisted shape of one registry type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailTypeRecord {
    pub value_kind: DetailKind,
    #[serde(default)]
    pub known_values: Vec<String>,
}

/// Registry keyed by exact (trimmed, case-sensitive) detail title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, DetailTypeRecord>",
    into = "BTreeMap<String, DetailTypeRecord>"
)]
pub struct DetailRegistry {
    types: BTreeMap<String, DetailType>,
}

impl DetailRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the type if absent, otherwise adjust its kind.
    ///
    /// Switching to enumerated is always allowed. Switching an enumerated type
    /// back to freeform is refused while it still has known values.
    pub fn register_type(&mut self, title: &str, kind: DetailKind) {
        let title = title.trim();
        if title.is_empty() {
            return;
        }

        match self.types.get_mut(title) {
            None => {
                self.types.insert(
                    title.to_string(),
                    DetailType {
                        title: title.to_string(),
                        kind,
                        known_values: BTreeSet::new(),
                    },
                );
            }
            Some(existing) => {
                if existing.kind == DetailKind::Enumerated
                    && kind == DetailKind::Freeform
                    && !existing.known_values.is_empty()
                {
                    tracing::debug!(
                        "Keeping '{}' enumerated: {} known values",
                        title,
                        existing.known_values.len()
                    );
                    return;
                }
                existing.kind = kind;
            }
        }
    }

    /// Remember a value for an enumerated type. No-op for unknown titles,
    /// freeform types and blank values.
    pub fn record_value(&mut self, title: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        if let Some(detail_type) = self.types.get_mut(title.trim()) {
            if detail_type.kind == DetailKind::Enumerated {
                detail_type.known_values.insert(value.to_string());
            }
        }
    }

    /// All known titles, sorted.
    pub fn titles(&self) -> Vec<String> {
        self.types.keys().cloned().collect()
    }

    /// Known values for a title, sorted. Empty for unknown titles.
    pub fn values_for(&self, title: &str) -> Vec<String> {
        self.types
            .get(title.trim())
            .map(|t| t.known_values.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn get(&self, title: &str) -> Option<&DetailType> {
        self.types.get(title.trim())
    }

    pub fn kind_of(&self, title: &str) -> Option<DetailKind> {
        self.get(title).map(|t| t.kind)
    }

    pub fn remove_type(&mut self, title: &str) -> Option<DetailType> {
        self.types.remove(title.trim())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DetailType> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Learn from the details of existing entries: unknown titles are
    /// registered as freeform, values are recorded for enumerated ones.
    pub fn learn_from_entries<'a>(&mut self, entries: impl IntoIterator<Item = &'a Entry>) {
        for entry in entries {
            for detail in &entry.details {
                if self.get(&detail.title).is_none() {
                    self.register_type(&detail.title, DetailKind::Freeform);
                }
                self.record_value(&detail.title, &detail.value);
            }
        }
    }

    /// Snapshot keyed by title with values as sorted lists.
    pub fn export(&self) -> BTreeMap<String, DetailTypeRecord> {
        self.types
            .iter()
            .map(|(title, t)| {
                (
                    title.clone(),
                    DetailTypeRecord {
                        value_kind: t.kind,
                        known_values: t.known_values.iter().cloned().collect(),
                    },
                )
            })
            .collect()
    }

    /// Rebuild a registry from a snapshot. Titles and values are normalized
    /// the same way `register_type` and `record_value` normalize them. Records
    /// whose titles trim to the same key are merged: values are unioned and
    /// the type is enumerated if either record is.
    pub fn import(snapshot: BTreeMap<String, DetailTypeRecord>) -> Self {
        let mut registry = Self::new();
        for (title, record) in snapshot {
            let title = title.trim();
            if title.is_empty() {
                continue;
            }
            let known_values = record
                .known_values
                .iter()
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from);

            // Keys that differ only by padding collapse into one type.
            let detail_type = registry
                .types
                .entry(title.to_string())
                .or_insert_with(|| DetailType {
                    title: title.to_string(),
                    kind: record.value_kind,
                    known_values: BTreeSet::new(),
                });
            if record.value_kind == DetailKind::Enumerated {
                detail_type.kind = DetailKind::Enumerated;
            }
            detail_type.known_values.extend(known_values);
        }
        registry
    }
}

impl From<BTreeMap<String, DetailTypeRecord>> for DetailRegistry {
    fn from(snapshot: BTreeMap<String, DetailTypeRecord>) -> Self {
        Self::import(snapshot)
    }
}

impl From<DetailRegistry> for BTreeMap<String, DetailTypeRecord> {
    fn from(registry: DetailRegistry) -> Self {
        registry.export()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = DetailRegistry::new();
        registry.register_type("Eye Color", DetailKind::Freeform);
        registry.register_type("Eye Color", DetailKind::Freeform);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.kind_of("Eye Color"), Some(DetailKind::Freeform));
    }

    #[test]
    fn test_blank_title_is_ignored() {
        let mut registry = DetailRegistry::new();
        registry.register_type("   ", DetailKind::Enumerated);
        registry.record_value("", "Green");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_import_merges_titles_that_trim_alike() {
        let mut snapshot = BTreeMap::new();
        snapshot.insert(
            "Eye Color".to_string(),
            DetailTypeRecord {
                value_kind: DetailKind::Enumerated,
                known_values: vec!["Green".to_string()],
            },
        );
        snapshot.insert(
            "Eye Color ".to_string(),
            DetailTypeRecord {
                value_kind: DetailKind::Freeform,
                known_values: vec![],
            },
        );
        snapshot.insert(
            " Eye Color".to_string(),
            DetailTypeRecord {
                value_kind: DetailKind::Enumerated,
                known_values: vec![" Blue ".to_string()],
            },
        );

        let registry = DetailRegistry::import(snapshot);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.kind_of("Eye Color"), Some(DetailKind::Enumerated));
        assert_eq!(registry.values_for("Eye Color"), vec!["Blue", "Green"]);
    }

    #[test]
    fn test_titles_are_case_sensitive() {
        let mut registry = DetailRegistry::new();
        registry.register_type("Eye Color", DetailKind::Freeform);
        registry.register_type("eye color", DetailKind::Freeform);
        assert_eq!(registry.titles(), vec!["Eye Color", "eye color"]);
    }

    #[test]
    fn test_record_value_only_for_enumerated() {
        let mut registry = DetailRegistry::new();
        registry.register_type("Age", DetailKind::Freeform);
        registry.register_type("Eye Color", DetailKind::Enumerated);

        registry.record_value("Age", "31");
        registry.record_value("Eye Color", "  Green ");
        registry.record_value("Eye Color", "Green");
        registry.record_value("Eye Color", "   ");
        registry.record_value("Eye Color", "Amber");
        registry.record_value("Unknown", "x");

        assert!(registry.values_for("Age").is_empty());
        assert_eq!(registry.values_for("Eye Color"), vec!["Amber", "Green"]);
        assert!(registry.values_for("Unknown").is_empty());
        assert!(registry.get("Unknown").is_none());
    }

    #[test]
    fn test_upgrade_to_enumerated() {
        let mut registry = DetailRegistry::new();
        registry.register_type("Allegiance", DetailKind::Freeform);
        registry.register_type("Allegiance", DetailKind::Enumerated);
        assert_eq!(registry.kind_of("Allegiance"), Some(DetailKind::Enumerated));
    }

    #[test]
    fn test_downgrade_refused_with_known_values() {
        let mut registry = DetailRegistry::new();
        registry.register_type("Allegiance", DetailKind::Enumerated);
        registry.record_value("Allegiance", "Crown");
        registry.register_type("Allegiance", DetailKind::Freeform);

        assert_eq!(registry.kind_of("Allegiance"), Some(DetailKind::Enumerated));
        assert_eq!(registry.values_for("Allegiance"), vec!["Crown"]);
    }

    #[test]
    fn test_downgrade_allowed_without_values() {
        let mut registry = DetailRegistry::new();
        registry.register_type("Allegiance", DetailKind::Enumerated);
        registry.register_type("Allegiance", DetailKind::Freeform);
        assert_eq!(registry.kind_of("Allegiance"), Some(DetailKind::Freeform));
    }

    #[test]
    fn test_titles_sorted() {
        let mut registry = DetailRegistry::new();
        for title in ["Zodiac", "Age", "Hair"] {
            registry.register_type(title, DetailKind::Freeform);
        }
        assert_eq!(registry.titles(), vec!["Age", "Hair", "Zodiac"]);
    }

    #[test]
    fn test_learn_from_entries() {
        let mut registry = DetailRegistry::new();
        registry.register_type("Eye Color", DetailKind::Enumerated);

        let entries = vec![
            Entry::new("Mira", "Character")
                .with_detail("Eye Color", "Green")
                .with_detail("Age", "31"),
            Entry::new("Tomas", "Character").with_detail("Eye Color", "Brown"),
        ];
        registry.learn_from_entries(&entries);

        assert_eq!(registry.titles(), vec!["Age", "Eye Color"]);
        assert_eq!(registry.kind_of("Age"), Some(DetailKind::Freeform));
        assert_eq!(registry.values_for("Eye Color"), vec!["Brown", "Green"]);
    }

    #[test]
    fn test_import_normalizes_values() {
        let mut snapshot = BTreeMap::new();
        snapshot.insert(
            " Eye Color ".to_string(),
            DetailTypeRecord {
                value_kind: DetailKind::Enumerated,
                known_values: vec!["Green ".into(), "".into(), "Amber".into(), "Green".into()],
            },
        );
        snapshot.insert(
            "  ".to_string(),
            DetailTypeRecord {
                value_kind: DetailKind::Freeform,
                known_values: vec![],
            },
        );

        let registry = DetailRegistry::import(snapshot);
        assert_eq!(registry.titles(), vec!["Eye Color"]);
        assert_eq!(registry.values_for("Eye Color"), vec!["Amber", "Green"]);
    }

    #[test]
    fn test_serde_shape() {
        let mut registry = DetailRegistry::new();
        registry.register_type("Eye Color", DetailKind::Enumerated);
        registry.record_value("Eye Color", "Green");

        let json = serde_json::to_value(&registry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Eye Color": {"value_kind": "enumerated", "known_values": ["Green"]}
            })
        );
        let back: DetailRegistry = serde_json::from_value(json).unwrap();
        assert_eq!(back, registry);
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("Enumerated".parse::<DetailKind>(), Ok(DetailKind::Enumerated));
        assert_eq!(" freeform".parse::<DetailKind>(), Ok(DetailKind::Freeform));
        assert!("list".parse::<DetailKind>().is_err());
    }

    // -- Property-based tests --

    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_registry() -> impl Strategy<Value = DetailRegistry> {
            proptest::collection::vec(
                (
                    "[A-Z][a-z]{1,8}( [A-Z][a-z]{1,8})?",
                    any::<bool>(),
                    proptest::collection::vec(" ?[a-z]{0,6} ?", 0..6),
                ),
                0..8,
            )
            .prop_map(|types| {
                let mut registry = DetailRegistry::new();
                for (title, enumerated, values) in types {
                    let kind = if enumerated {
                        DetailKind::Enumerated
                    } else {
                        DetailKind::Freeform
                    };
                    registry.register_type(&title, kind);
                    for value in values {
                        registry.record_value(&title, &value);
                    }
                }
                registry
            })
        }

        proptest! {
            #[test]
            fn prop_import_export_roundtrip(registry in arb_registry()) {
                let restored = DetailRegistry::import(registry.export());
                prop_assert_eq!(restored.titles(), registry.titles());
                for title in registry.titles() {
                    prop_assert_eq!(restored.values_for(&title), registry.values_for(&title));
                    prop_assert_eq!(restored.kind_of(&title), registry.kind_of(&title));
                }
            }

            #[test]
            fn prop_known_values_trimmed_and_non_empty(registry in arb_registry()) {
                for detail_type in registry.iter() {
                    for value in &detail_type.known_values {
                        prop_assert!(!value.is_empty());
                        prop_assert_eq!(value.trim(), value.as_str());
                    }
                }
            }

            #[test]
            fn prop_values_sorted(registry in arb_registry()) {
                for title in registry.titles() {
                    let values = registry.values_for(&title);
                    let mut sorted = values.clone();
                    sorted.sort();
                    prop_assert_eq!(values, sorted);
                }
            }
        }
    }
}
