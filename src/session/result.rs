use crate::session::{Outcome, QuizMode, Session};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub accuracy_percent: u32,
    pub correct: usize,
    pub total: usize,
    /// Missed outcomes in the order they were encountered.
    pub missed: Vec<Outcome>,
}

impl Summary {
    pub fn is_perfect(&self) -> bool {
        self.missed.is_empty()
    }
}

pub fn summarize(outcomes: &[Outcome]) -> Summary {
    let total = outcomes.len();
    let correct = outcomes.iter().filter(|o| o.correct).count();
    let accuracy_percent = if total == 0 {
        0
    } else {
        (100.0 * correct as f64 / total as f64).round() as u32
    };
    Summary {
        accuracy_percent,
        correct,
        total,
        missed: outcomes.iter().filter(|o| !o.correct).cloned().collect(),
    }
}

/// Mode used to retry misses; the matching board has no single-card form.
pub fn retry_mode(mode: QuizMode) -> QuizMode {
    match mode {
        QuizMode::Match => QuizMode::Flashcard,
        other => other,
    }
}

/// Session of exactly the missed cards, in encounter order.
pub fn retry(outcomes: &[Outcome], mode: QuizMode) -> (Session, QuizMode) {
    let cards = outcomes
        .iter()
        .filter(|o| !o.correct)
        .map(|o| o.card.clone())
        .collect();
    (Session::new(cards), retry_mode(mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WordPair;
    use crate::session::{Card, Direction};

    fn outcome(word: &str, correct: bool) -> Outcome {
        Outcome {
            card: Card::new(WordPair::new(word, "x"), Direction::Forward),
            correct,
        }
    }

    #[test]
    fn test_seventy_percent() {
        let mut outcomes: Vec<Outcome> = (0..7).map(|i| outcome(&format!("w{i}"), true)).collect();
        outcomes.extend((7..10).map(|i| outcome(&format!("w{i}"), false)));
        let summary = summarize(&outcomes);
        assert_eq!(summary.accuracy_percent, 70);
        assert_eq!(summary.correct, 7);
        assert_eq!(summary.total, 10);
        assert_eq!(summary.missed.len(), 3);
    }

    #[test]
    fn test_empty_outcomes() {
        let summary = summarize(&[]);
        assert_eq!(summary.accuracy_percent, 0);
        assert_eq!(summary.total, 0);
        assert!(summary.is_perfect());
    }

    #[test]
    fn test_rounding() {
        let outcomes = vec![outcome("a", true), outcome("b", true), outcome("c", false)];
        assert_eq!(summarize(&outcomes).accuracy_percent, 67);
    }

    #[test]
    fn test_retry_keeps_missed_order() {
        let outcomes = vec![
            outcome("a", false),
            outcome("b", true),
            outcome("c", false),
        ];
        let (session, mode) = retry(&outcomes, QuizMode::Typed);
        let words: Vec<&str> = session.cards().iter().map(|c| c.word()).collect();
        assert_eq!(words, vec!["a", "c"]);
        assert_eq!(mode, QuizMode::Typed);
    }

    #[test]
    fn test_retry_after_match_uses_flashcards() {
        let (_, mode) = retry(&[outcome("a", false)], QuizMode::Match);
        assert_eq!(mode, QuizMode::Flashcard);
    }
}
