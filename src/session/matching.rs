use std::time::{Duration, Instant};

use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::WordPair;
use crate::session::SESSION_SIZE;
use crate::session::progress::Effect;

/// How long a wrong pairing stays highlighted; input is locked meanwhile.
pub const FLASH_DURATION: Duration = Duration::from_millis(600);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Flash {
    pub source: usize,
    pub target: usize,
    pub started: Instant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchAction {
    SelectSource(usize),
    SelectTarget(usize),
    /// Timer check; clears an expired error flash.
    Tick,
    Done,
}

/// Two-column pairing board. Pair `i` is source `pairs[i].source` matched to
/// target `pairs[i].target`; the target column is displayed in `target_order`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchState {
    pairs: Vec<WordPair>,
    target_order: Vec<usize>,
    matched: Vec<bool>,
    first_attempt: Vec<bool>,
    selected: Option<usize>,
    flash: Option<Flash>,
}

impl MatchState {
    /// Board from a uniform shuffle of `pairs`, capped at the session size.
    pub fn deal<R: Rng + ?Sized>(pairs: &[WordPair], rng: &mut R) -> Self {
        let mut board = pairs.to_vec();
        board.shuffle(rng);
        board.truncate(SESSION_SIZE);
        let mut target_order: Vec<usize> = (0..board.len()).collect();
        target_order.shuffle(rng);
        Self::with_order(board, target_order)
    }

    pub fn with_order(pairs: Vec<WordPair>, target_order: Vec<usize>) -> Self {
        let n = pairs.len();
        Self {
            pairs,
            target_order,
            matched: vec![false; n],
            first_attempt: vec![true; n],
            selected: None,
            flash: None,
        }
    }

    pub fn pairs(&self) -> &[WordPair] {
        &self.pairs
    }

    pub fn target_order(&self) -> &[usize] {
        &self.target_order
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn flash(&self) -> Option<Flash> {
        self.flash
    }

    pub fn is_matched(&self, index: usize) -> bool {
        self.matched.get(index).copied().unwrap_or(false)
    }

    pub fn matched_count(&self) -> usize {
        self.matched.iter().filter(|m| **m).count()
    }

    pub fn is_complete(&self) -> bool {
        self.matched.iter().all(|m| *m)
    }

    fn accepts_input(&self, index: usize) -> bool {
        self.flash.is_none() && index < self.pairs.len() && !self.matched[index]
    }

    pub fn transition(self, action: MatchAction, now: Instant) -> (Self, Vec<Effect>) {
        match action {
            MatchAction::SelectSource(index) => (self.select_source(index), vec![]),
            MatchAction::SelectTarget(index) => self.select_target(index, now),
            MatchAction::Tick => (self.clear_flash(now), vec![]),
            MatchAction::Done => {
                let effects = if self.is_complete() {
                    vec![Effect::Finish]
                } else {
                    vec![]
                };
                (self, effects)
            }
        }
    }

    /// Select a source item; selecting the selected item again deselects it.
    pub fn select_source(mut self, index: usize) -> Self {
        if !self.accepts_input(index) {
            return self;
        }
        self.selected = if self.selected == Some(index) {
            None
        } else {
            Some(index)
        };
        self
    }

    /// Guess the target for the selected source. A completed pair counts as
    /// correct only if no wrong guess was made for that source before.
    pub fn select_target(mut self, index: usize, now: Instant) -> (Self, Vec<Effect>) {
        if !self.accepts_input(index) {
            return (self, vec![]);
        }
        let Some(source) = self.selected else {
            return (self, vec![]);
        };

        if source == index {
            self.selected = None;
            self.matched[index] = true;
            let correct = self.first_attempt[index];
            (self, vec![Effect::ResolvePair { index, correct }])
        } else {
            self.first_attempt[source] = false;
            self.flash = Some(Flash {
                source,
                target: index,
                started: now,
            });
            (self, vec![])
        }
    }

    /// End an expired error flash and drop the selection.
    pub fn clear_flash(mut self, now: Instant) -> Self {
        if let Some(flash) = self.flash
            && now.duration_since(flash.started) >= FLASH_DURATION
        {
            self.flash = None;
            self.selected = None;
        }
        self
    }
}
