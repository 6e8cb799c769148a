use std::cmp::Ordering;

use crate::catalog::{WordList, WordPair};
use crate::engine::progress::ProgressStore;

/// Share of a list's words whose forward direction is comfortable, 0..=100.
pub fn list_progress_percent(store: &ProgressStore, list_id: &str, word_count: usize) -> u32 {
    if word_count == 0 {
        return 0;
    }
    let Some(records) = store.list(list_id) else {
        return 0;
    };
    let comfortable = records.values().filter(|r| r.forward.comfortable).count();
    ((comfortable as f64 / word_count as f64) * 100.0).round() as u32
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListStats {
    pub words: usize,
    pub comfortable_forward: usize,
    pub comfortable_reverse: usize,
}

pub fn list_stats(store: &ProgressStore, list: &WordList) -> ListStats {
    let mut stats = ListStats {
        words: list.pairs.len(),
        ..ListStats::default()
    };
    for pair in &list.pairs {
        let record = store.record_or_default(&list.id, &pair.source);
        if record.forward.comfortable {
            stats.comfortable_forward += 1;
        }
        if record.reverse.comfortable {
            stats.comfortable_reverse += 1;
        }
    }
    stats
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatsSort {
    #[default]
    Missed,
    Correct,
    Alphabetical,
}

impl StatsSort {
    pub fn label(self) -> &'static str {
        match self {
            StatsSort::Missed => "most missed",
            StatsSort::Correct => "most correct",
            StatsSort::Alphabetical => "A-Z",
        }
    }

    pub fn next(self) -> Self {
        match self {
            StatsSort::Missed => StatsSort::Correct,
            StatsSort::Correct => StatsSort::Alphabetical,
            StatsSort::Alphabetical => StatsSort::Missed,
        }
    }
}

/// Both directions combined for one word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordStats {
    pub pair: WordPair,
    pub correct: u32,
    pub incorrect: u32,
}

impl WordStats {
    pub fn total(&self) -> u32 {
        self.correct + self.incorrect
    }

    /// Rounded percent correct; `None` for unseen words.
    pub fn accuracy(&self) -> Option<u32> {
        let total = self.total();
        (total > 0).then(|| ((self.correct as f64 / total as f64) * 100.0).round() as u32)
    }
}

pub fn word_stats(store: &ProgressStore, list: &WordList, sort: StatsSort) -> Vec<WordStats> {
    let mut rows: Vec<WordStats> = list
        .pairs
        .iter()
        .map(|pair| {
            let record = store.record_or_default(&list.id, &pair.source);
            WordStats {
                pair: pair.clone(),
                correct: record.forward.correct + record.reverse.correct,
                incorrect: record.forward.incorrect + record.reverse.incorrect,
            }
        })
        .collect();

    match sort {
        StatsSort::Missed => rows.sort_by(|a, b| seen_first(a, b, |r| r.incorrect)),
        StatsSort::Correct => rows.sort_by(|a, b| seen_first(a, b, |r| r.correct)),
        StatsSort::Alphabetical => rows.sort_by(|a, b| a.pair.source.cmp(&b.pair.source)),
    }
    rows
}

/// Unseen words sink to the bottom; seen words by `key` descending, then A-Z.
fn seen_first(a: &WordStats, b: &WordStats, key: impl Fn(&WordStats) -> u32) -> Ordering {
    match (a.total() == 0, b.total() == 0) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => key(b)
            .cmp(&key(a))
            .then_with(|| a.pair.source.cmp(&b.pair.source)),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrowseColumn {
    Source,
    Target,
}

/// Word-list browser ordering. Picking the active column again flips it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BrowseSort {
    pub column: Option<BrowseColumn>,
    pub descending: bool,
}

impl BrowseSort {
    pub fn toggle(self, column: BrowseColumn) -> Self {
        if self.column == Some(column) {
            Self {
                column: self.column,
                descending: !self.descending,
            }
        } else {
            Self {
                column: Some(column),
                descending: false,
            }
        }
    }

    pub fn apply(self, pairs: &[WordPair]) -> Vec<WordPair> {
        let mut pairs = pairs.to_vec();
        if let Some(column) = self.column {
            pairs.sort_by(|a, b| {
                let ord = match column {
                    BrowseColumn::Source => a.source.cmp(&b.source),
                    BrowseColumn::Target => a.target.cmp(&b.target),
                };
                if self.descending { ord.reverse() } else { ord }
            });
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Direction;

    fn make_list() -> WordList {
        WordList {
            id: "l".to_string(),
            subject: "Spanish".to_string(),
            name: "Test".to_string(),
            pairs: vec![
                WordPair::new("gato", "cat"),
                WordPair::new("perro", "dog"),
                WordPair::new("ave", "bird"),
                WordPair::new("pez", "fish"),
            ],
        }
    }

    fn seeded_store() -> ProgressStore {
        let mut store = ProgressStore::in_memory();
        for _ in 0..3 {
            store.record("l", "gato", Direction::Forward, true);
        }
        store.record("l", "gato", Direction::Reverse, false);
        store.record("l", "perro", Direction::Forward, false);
        store.record("l", "perro", Direction::Forward, false);
        store.record("l", "ave", Direction::Forward, true);
        store.record("l", "ave", Direction::Forward, false);
        store
    }

    #[test]
    fn test_list_progress_percent() {
        let store = seeded_store();
        assert_eq!(list_progress_percent(&store, "l", 4), 25);
        assert_eq!(list_progress_percent(&store, "l", 0), 0);
        assert_eq!(list_progress_percent(&store, "other", 4), 0);
    }

    #[test]
    fn test_list_stats() {
        let stats = list_stats(&seeded_store(), &make_list());
        assert_eq!(
            stats,
            ListStats {
                words: 4,
                comfortable_forward: 1,
                comfortable_reverse: 0
            }
        );
    }

    #[test]
    fn test_word_stats_sorted_by_missed() {
        let rows = word_stats(&seeded_store(), &make_list(), StatsSort::Missed);
        let order: Vec<&str> = rows.iter().map(|r| r.pair.source.as_str()).collect();
        // perro: 2 missed; ave and gato: 1 each (alphabetical); pez unseen
        assert_eq!(order, vec!["perro", "ave", "gato", "pez"]);
        assert_eq!(rows[2].accuracy(), Some(75));
        assert_eq!(rows[3].accuracy(), None);
    }

    #[test]
    fn test_word_stats_sorted_by_correct() {
        let rows = word_stats(&seeded_store(), &make_list(), StatsSort::Correct);
        let order: Vec<&str> = rows.iter().map(|r| r.pair.source.as_str()).collect();
        assert_eq!(order, vec!["gato", "ave", "perro", "pez"]);
    }

    #[test]
    fn test_browse_sort_toggles() {
        let pairs = make_list().pairs;
        let sort = BrowseSort::default();
        assert_eq!(sort.apply(&pairs), pairs);

        let sort = sort.toggle(BrowseColumn::Target);
        let targets: Vec<String> = sort.apply(&pairs).into_iter().map(|p| p.target).collect();
        assert_eq!(targets, vec!["bird", "cat", "dog", "fish"]);

        let sort = sort.toggle(BrowseColumn::Target);
        assert!(sort.descending);
        assert_eq!(sort.apply(&pairs)[0].target, "fish");

        let sort = sort.toggle(BrowseColumn::Source);
        assert!(!sort.descending);
        assert_eq!(sort.apply(&pairs)[0].source, "ave");
    }
}
