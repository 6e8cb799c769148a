pub mod choice;
pub mod flashcard;
pub mod matching;
pub mod progress;
pub mod quiz;
pub mod result;
pub mod typed;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::WordPair;

/// Maximum number of cards in one session.
pub const SESSION_SIZE: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Source-language prompt, target-language answer.
    Forward,
    /// Target-language prompt, source-language answer.
    Reverse,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Direction::Forward => "source \u{2192} target",
            Direction::Reverse => "target \u{2192} source",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub pair: WordPair,
    pub direction: Direction,
}

impl Card {
    pub fn new(pair: WordPair, direction: Direction) -> Self {
        Self { pair, direction }
    }

    /// Scheduling key: the source-language form.
    pub fn word(&self) -> &str {
        &self.pair.source
    }

    pub fn prompt(&self) -> &str {
        match self.direction {
            Direction::Forward => &self.pair.source,
            Direction::Reverse => &self.pair.target,
        }
    }

    pub fn answer(&self) -> &str {
        match self.direction {
            Direction::Forward => &self.pair.target,
            Direction::Reverse => &self.pair.source,
        }
    }
}

/// Ordered cards for one run, consumed front to back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    cards: Vec<Card>,
}

impl Session {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub card: Card,
    pub correct: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizMode {
    Flashcard,
    Typed,
    Choice,
    /// Multiple choice with every card forced to the reverse direction.
    ReverseChoice,
    Match,
}

impl QuizMode {
    pub const ALL: [QuizMode; 5] = [
        QuizMode::Flashcard,
        QuizMode::Typed,
        QuizMode::Choice,
        QuizMode::ReverseChoice,
        QuizMode::Match,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QuizMode::Flashcard => "flashcard",
            QuizMode::Typed => "typed",
            QuizMode::Choice => "choice",
            QuizMode::ReverseChoice => "reverse-choice",
            QuizMode::Match => "match",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }

    pub fn title(self) -> &'static str {
        match self {
            QuizMode::Flashcard => "Flashcards",
            QuizMode::Typed => "Type It",
            QuizMode::Choice => "Multiple Choice",
            QuizMode::ReverseChoice => "Multiple Choice (reverse only)",
            QuizMode::Match => "Match",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("no words to study in this list")]
    EmptySession,
    #[error("{} cannot run a prepared session", .0.title())]
    UnsupportedMode(QuizMode),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_prompt_and_answer_follow_direction() {
        let pair = WordPair::new("gato", "cat");
        let fwd = Card::new(pair.clone(), Direction::Forward);
        let rev = Card::new(pair, Direction::Reverse);
        assert_eq!((fwd.prompt(), fwd.answer()), ("gato", "cat"));
        assert_eq!((rev.prompt(), rev.answer()), ("cat", "gato"));
        assert_eq!(rev.word(), "gato");
    }

    #[test]
    fn test_mode_names() {
        for mode in QuizMode::ALL {
            assert_eq!(QuizMode::from_name(mode.as_str()), Some(mode));
        }
        assert_eq!(QuizMode::from_name("nope"), None);
    }
}
