// src/model/suggestion.rs
use serde::{Deserialize, Serialize};

/// Picker entry at position 0, meaning "no suggestion chosen".
pub const NO_SUGGESTION_LABEL: &str = "(No shape suggestion)";

/// Label used for a suggestion record without a description.
pub const UNNAMED_SHAPE_LABEL: &str = "(unnamed shape)";

/// Table-scoped request for shape suggestions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeIntent {
    pub include_tables: Vec<String>,
}

impl ShapeIntent {
    pub fn for_table(table: impl Into<String>) -> Self {
        Self {
            include_tables: vec![table.into()],
        }
    }
}

/// A report shape proposed by the suggestion collaborator.
///
/// Only `description` is interpreted; every other field is carried through
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SuggestionRecord {
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            extra: serde_json::Map::new(),
        }
    }
}

/// Display form of one suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionDescriptor {
    /// Position in the original record list.
    pub index: usize,
    pub label: String,
}

/// Suggestions for one table, ready for display.
///
/// Choice indexes are picker positions: `0` is the [`NO_SUGGESTION_LABEL`]
/// sentinel and `n` maps to record `n - 1`.
#[derive(Debug, Clone, Default)]
pub struct SuggestionAdapter {
    records: Vec<SuggestionRecord>,
    descriptors: Vec<SuggestionDescriptor>,
}

impl SuggestionAdapter {
    pub fn from_raw(records: Vec<SuggestionRecord>) -> Self {
        let descriptors = records
            .iter()
            .enumerate()
            .map(|(index, record)| SuggestionDescriptor {
                index,
                label: record
                    .description
                    .clone()
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| UNNAMED_SHAPE_LABEL.to_string()),
            })
            .collect();

        Self {
            records,
            descriptors,
        }
    }

    pub fn descriptors(&self) -> &[SuggestionDescriptor] {
        &self.descriptors
    }

    pub fn records(&self) -> &[SuggestionRecord] {
        &self.records
    }

    /// Picker labels: the sentinel first, then one per descriptor.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        std::iter::once(NO_SUGGESTION_LABEL).chain(self.descriptors.iter().map(|d| d.label.as_str()))
    }

    /// Map a picker position back to its record.
    pub fn resolve(&self, choice: usize) -> Option<&SuggestionRecord> {
        choice.checked_sub(1).and_then(|i| self.records.get(i))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
