use crate::engine::progress::ProgressStore;
use crate::session::{Card, Outcome, Session};

/// Side effects requested by a mode transition; applied by the quiz runner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Grade the current card.
    Resolve { correct: bool },
    /// Move past the current (already resolved) card.
    Advance,
    /// A matching-board pair was completed.
    ResolvePair { index: usize, correct: bool },
    /// Leave the quiz for the results screen.
    Finish,
}

/// Cursor, per-card answered flag and the outcome log of one run.
pub struct SessionProgress {
    list_id: String,
    session: Session,
    cursor: usize,
    answered: bool,
    outcomes: Vec<Outcome>,
}

impl SessionProgress {
    pub fn new(list_id: &str, session: Session) -> Self {
        Self {
            list_id: list_id.to_string(),
            session,
            cursor: 0,
            answered: false,
            outcomes: Vec::new(),
        }
    }

    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current(&self) -> Option<&Card> {
        self.session.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn total(&self) -> usize {
        self.session.len()
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.session.len()
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Grade the current card once. Returns false if there is no current card
    /// or it was already graded.
    pub fn resolve(&mut self, correct: bool, store: &mut ProgressStore) -> bool {
        if self.answered {
            return false;
        }
        let Some(card) = self.current().cloned() else {
            return false;
        };
        self.answered = true;
        self.log_outcome(card, correct, store);
        true
    }

    /// Record an outcome for a card resolved outside the cursor (matching board).
    pub fn resolve_card(&mut self, card: Card, correct: bool, store: &mut ProgressStore) {
        self.log_outcome(card, correct, store);
    }

    /// Step past a graded card. A no-op unless the current card is graded, so a
    /// late timer and a manual advance cannot both move the cursor.
    pub fn advance(&mut self) -> bool {
        if !self.answered {
            return false;
        }
        self.answered = false;
        self.cursor += 1;
        true
    }

    fn log_outcome(&mut self, card: Card, correct: bool, store: &mut ProgressStore) {
        store.record(&self.list_id, card.word(), card.direction, correct);
        self.outcomes.push(Outcome { card, correct });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WordPair;
    use crate::session::Direction;

    fn two_card_session() -> Session {
        Session::new(vec![
            Card::new(WordPair::new("gato", "cat"), Direction::Forward),
            Card::new(WordPair::new("perro", "dog"), Direction::Reverse),
        ])
    }

    #[test]
    fn test_resolve_records_once() {
        let mut store = ProgressStore::in_memory();
        let mut progress = SessionProgress::new("l", two_card_session());
        assert!(progress.resolve(true, &mut store));
        assert!(!progress.resolve(false, &mut store));
        assert_eq!(progress.outcomes().len(), 1);
        assert_eq!(store.lookup("l", "gato").unwrap().forward.correct, 1);
        assert_eq!(store.lookup("l", "gato").unwrap().forward.incorrect, 0);
    }

    #[test]
    fn test_advance_requires_resolution_and_is_idempotent() {
        let mut store = ProgressStore::in_memory();
        let mut progress = SessionProgress::new("l", two_card_session());
        assert!(!progress.advance());
        progress.resolve(false, &mut store);
        assert!(progress.advance());
        assert!(!progress.advance());
        assert_eq!(progress.cursor(), 1);
        assert_eq!(progress.current().unwrap().word(), "perro");
    }

    #[test]
    fn test_reverse_card_writes_reverse_record() {
        let mut store = ProgressStore::in_memory();
        let mut progress = SessionProgress::new("l", two_card_session());
        progress.resolve(true, &mut store);
        progress.advance();
        progress.resolve(false, &mut store);
        progress.advance();
        assert!(progress.is_complete());
        assert!(!progress.resolve(true, &mut store));
        assert_eq!(store.lookup("l", "perro").unwrap().reverse.incorrect, 1);
    }
}
