use serde::{Deserialize, Serialize};

use crate::session::Direction;
use crate::store::schema::{ListProgress, ProgressData};
use crate::store::{MemoryBackend, ProgressBackend};

/// Consecutive correct answers needed before a direction counts as comfortable.
pub const COMFORT_STREAK: u32 = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionRecord {
    #[serde(default, alias = "correctCount")]
    pub correct: u32,
    #[serde(default, alias = "incorrectCount")]
    pub incorrect: u32,
    #[serde(default)]
    pub streak: u32,
    /// Sticky: a miss resets `streak` but never clears this.
    #[serde(default)]
    pub comfortable: bool,
}

impl DirectionRecord {
    pub fn attempts(&self) -> u32 {
        self.correct + self.incorrect
    }

    pub fn apply(&mut self, correct: bool) {
        if correct {
            self.correct += 1;
            self.streak += 1;
            if self.streak >= COMFORT_STREAK {
                self.comfortable = true;
            }
        } else {
            self.incorrect += 1;
            self.streak = 0;
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    #[serde(default, alias = "es_en")]
    pub forward: DirectionRecord,
    #[serde(default, alias = "en_es")]
    pub reverse: DirectionRecord,
}

impl WordRecord {
    pub fn direction(&self, direction: Direction) -> &DirectionRecord {
        match direction {
            Direction::Forward => &self.forward,
            Direction::Reverse => &self.reverse,
        }
    }

    pub fn direction_mut(&mut self, direction: Direction) -> &mut DirectionRecord {
        match direction {
            Direction::Forward => &mut self.forward,
            Direction::Reverse => &mut self.reverse,
        }
    }
}

/// Per-list, per-word performance history with write-through persistence.
///
/// Persistence failures are logged and otherwise ignored: the in-memory
/// records stay authoritative for the rest of the process.
pub struct ProgressStore {
    data: ProgressData,
    backend: Box<dyn ProgressBackend>,
}

impl ProgressStore {
    /// Read the whole store from `backend`. A missing, unreadable or corrupt
    /// blob yields an empty store.
    pub fn load(backend: Box<dyn ProgressBackend>) -> Self {
        let data = match backend.load() {
            Ok(Some(blob)) => match ProgressData::from_json(&blob) {
                Ok(data) => {
                    log::info!("progress loaded: {} lists", data.lists.len());
                    data
                }
                Err(e) => {
                    log::warn!("progress blob unreadable, starting fresh: {e}");
                    ProgressData::default()
                }
            },
            Ok(None) => {
                log::info!("no saved progress, starting fresh");
                ProgressData::default()
            }
            Err(e) => {
                log::warn!("progress storage unavailable, keeping progress in memory: {e}");
                ProgressData::default()
            }
        };
        Self { data, backend }
    }

    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryBackend::new()))
    }

    /// Existing record, or a fresh zeroed one inserted in its place. The new
    /// record becomes durable with the next `record` call.
    pub fn get(&mut self, list_id: &str, word: &str) -> &WordRecord {
        self.data
            .lists
            .entry(list_id.to_string())
            .or_default()
            .entry(word.to_string())
            .or_default()
    }

    /// Read-only access; never creates.
    pub fn lookup(&self, list_id: &str, word: &str) -> Option<&WordRecord> {
        self.data.lists.get(list_id)?.get(word)
    }

    /// Like `lookup`, defaulting to a zeroed record.
    pub fn record_or_default(&self, list_id: &str, word: &str) -> WordRecord {
        self.lookup(list_id, word).copied().unwrap_or_default()
    }

    pub fn list(&self, list_id: &str) -> Option<&ListProgress> {
        self.data.lists.get(list_id)
    }

    pub fn data(&self) -> &ProgressData {
        &self.data
    }

    pub fn record(&mut self, list_id: &str, word: &str, direction: Direction, correct: bool) {
        self.data
            .lists
            .entry(list_id.to_string())
            .or_default()
            .entry(word.to_string())
            .or_default()
            .direction_mut(direction)
            .apply(correct);
        self.flush();
    }

    fn flush(&self) {
        let result = self
            .data
            .to_json()
            .and_then(|blob| self.backend.save(&blob));
        if let Err(e) = result {
            log::warn!("failed to persist progress: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::store::StoreError;

    struct BrokenBackend;

    impl ProgressBackend for BrokenBackend {
        fn load(&self) -> Result<Option<String>, StoreError> {
            Err(StoreError::Io(std::io::Error::other("unavailable")))
        }

        fn save(&self, _blob: &str) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("unavailable")))
        }
    }

    #[test]
    fn test_comfortable_after_three_in_a_row() {
        let mut rec = DirectionRecord::default();
        rec.apply(true);
        rec.apply(true);
        assert!(!rec.comfortable);
        rec.apply(true);
        assert!(rec.comfortable);
        assert_eq!(rec.streak, 3);
    }

    #[test]
    fn test_miss_resets_streak_but_comfortable_sticks() {
        let mut rec = DirectionRecord::default();
        for _ in 0..3 {
            rec.apply(true);
        }
        rec.apply(false);
        assert_eq!(rec.streak, 0);
        assert!(rec.comfortable);
        assert_eq!(rec.correct, 3);
        assert_eq!(rec.incorrect, 1);
        rec.apply(false);
        assert!(rec.comfortable);
    }

    #[test]
    fn test_interrupted_streak_does_not_unlock() {
        let mut rec = DirectionRecord::default();
        rec.apply(true);
        rec.apply(true);
        rec.apply(false);
        rec.apply(true);
        rec.apply(true);
        assert!(!rec.comfortable);
        rec.apply(true);
        assert!(rec.comfortable);
    }

    #[test]
    fn test_get_creates_zeroed_record() {
        let mut store = ProgressStore::in_memory();
        assert!(store.lookup("l", "gato").is_none());
        let rec = *store.get("l", "gato");
        assert_eq!(rec, WordRecord::default());
        assert!(store.lookup("l", "gato").is_some());
    }

    #[test]
    fn test_record_persists_every_mutation() {
        let backend = Rc::new(MemoryBackend::new());
        let mut store = ProgressStore::load(Box::new(backend.clone()));
        store.record("l", "gato", Direction::Forward, true);
        let saved = ProgressData::from_json(&backend.contents().unwrap()).unwrap();
        assert_eq!(saved.lists["l"]["gato"].forward.correct, 1);

        store.record("l", "gato", Direction::Reverse, false);
        let saved = ProgressData::from_json(&backend.contents().unwrap()).unwrap();
        assert_eq!(saved.lists["l"]["gato"].reverse.incorrect, 1);
    }

    #[test]
    fn test_reload_sees_saved_records() {
        let backend = Rc::new(MemoryBackend::new());
        {
            let mut store = ProgressStore::load(Box::new(backend.clone()));
            for _ in 0..3 {
                store.record("l", "perro", Direction::Forward, true);
            }
        }
        let store = ProgressStore::load(Box::new(backend));
        assert!(store.lookup("l", "perro").unwrap().forward.comfortable);
    }

    #[test]
    fn test_corrupt_blob_yields_empty_store() {
        let store = ProgressStore::load(Box::new(MemoryBackend::with_blob("{oops")));
        assert!(store.data().lists.is_empty());
    }

    #[test]
    fn test_unavailable_backend_keeps_working_in_memory() {
        let mut store = ProgressStore::load(Box::new(BrokenBackend));
        store.record("l", "gato", Direction::Forward, true);
        store.record("l", "gato", Direction::Forward, true);
        assert_eq!(store.lookup("l", "gato").unwrap().forward.streak, 2);
    }
}
