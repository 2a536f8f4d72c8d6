//! Content catalog - the pre-authored text the dossier can display.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::{DossierError, Result};

/// One displayable page of lore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    pub title: String,
    pub body: String,
}

impl ContentEntry {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Named, ordered sequences of content entries. Every sequence holds at least one
/// entry, so any of them can back a cycling selection.
#[derive(Debug, Clone, Default)]
pub struct ContentCatalog {
    sequences: HashMap<String, Vec<ContentEntry>>,
}

impl ContentCatalog {
    /// Build a catalog, rejecting empty sequences.
    pub fn from_sequences(sequences: BTreeMap<String, Vec<ContentEntry>>) -> Result<Self> {
        if let Some((name, _)) = sequences.iter().find(|(_, entries)| entries.is_empty()) {
            return Err(DossierError::EmptySequence {
                sequence: name.clone(),
            });
        }

        Ok(Self {
            sequences: sequences.into_iter().collect(),
        })
    }

    /// Entry `index` of `sequence`.
    pub fn entry(&self, sequence: &str, index: usize) -> Option<&ContentEntry> {
        self.sequences.get(sequence).and_then(|entries| entries.get(index))
    }

    /// Number of entries in `sequence`.
    pub fn len(&self, sequence: &str) -> Option<usize> {
        self.sequences.get(sequence).map(Vec::len)
    }

    pub fn contains(&self, sequence: &str) -> bool {
        self.sequences.contains_key(sequence)
    }

    /// Number of sequences.
    pub fn sequence_count(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BTreeMap<String, Vec<ContentEntry>> {
        let mut sequences = BTreeMap::new();
        sequences.insert(
            "files".to_string(),
            vec![
                ContentEntry::new("Subject 01", "Recovered from the lower archive."),
                ContentEntry::new("Subject 02", "Redacted."),
            ],
        );
        sequences
    }

    #[test]
    fn test_lookup() {
        let catalog = ContentCatalog::from_sequences(sample()).unwrap();

        assert_eq!(catalog.len("files"), Some(2));
        assert_eq!(catalog.entry("files", 1).unwrap().title, "Subject 02");
        assert!(catalog.entry("files", 2).is_none());
        assert!(catalog.entry("missing", 0).is_none());
        assert!(catalog.contains("files"));
        assert_eq!(catalog.sequence_count(), 1);
    }

    #[test]
    fn test_empty_sequence_rejected() {
        let mut sequences = sample();
        sequences.insert("void".to_string(), Vec::new());

        let err = ContentCatalog::from_sequences(sequences).unwrap_err();
        assert!(matches!(err, DossierError::EmptySequence { sequence } if sequence == "void"));
    }
}
