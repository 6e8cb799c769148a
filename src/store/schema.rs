use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::progress::WordRecord;
use crate::store::StoreError;

/// Records for one list, keyed by each word's source-language form.
pub type ListProgress = BTreeMap<String, WordRecord>;

/// The persisted blob: list id -> word -> per-direction records.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressData {
    pub lists: BTreeMap<String, ListProgress>,
}

impl ProgressData {
    pub fn from_json(blob: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(blob)?)
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_legacy_blob_shape() {
        let blob = r#"{"spanish-1": {"gato": {
            "es_en": {"correct": 3, "incorrect": 1, "streak": 3, "comfortable": true},
            "en_es": {"correct": 0, "incorrect": 2, "streak": 0, "comfortable": false}
        }}}"#;
        let data = ProgressData::from_json(blob).unwrap();
        let rec = &data.lists["spanish-1"]["gato"];
        assert_eq!(rec.forward.correct, 3);
        assert!(rec.forward.comfortable);
        assert_eq!(rec.reverse.incorrect, 2);
    }

    #[test]
    fn test_writes_forward_reverse_keys() {
        let mut data = ProgressData::default();
        data.lists
            .entry("l".to_string())
            .or_default()
            .insert("w".to_string(), WordRecord::default());
        let json = data.to_json().unwrap();
        assert!(json.contains("\"forward\""));
        assert!(json.contains("\"reverse\""));
        assert!(json.contains("\"comfortable\":false"));
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(ProgressData::from_json("{not json").is_err());
        assert!(ProgressData::from_json("[1, 2]").is_err());
    }
}
