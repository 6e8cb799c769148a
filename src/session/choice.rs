use std::collections::HashSet;
use std::time::{Duration, Instant};

use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::WordPair;
use crate::engine::normalize::normalize;
use crate::session::progress::Effect;
use crate::session::{Card, Direction};

pub const CHOICE_COUNT: usize = 4;
/// Delay before a graded question moves on by itself.
pub const AUTO_ADVANCE: Duration = Duration::from_millis(1000);

/// The expected answer plus up to three distractors from the same side of the
/// list, in shuffled display order. No two choices normalize alike.
pub fn build_choices<R: Rng + ?Sized>(card: &Card, pairs: &[WordPair], rng: &mut R) -> Vec<String> {
    let correct = card.answer().to_string();
    let mut seen = HashSet::from([normalize(&correct)]);

    let mut wrong_pool: Vec<&str> = pairs
        .iter()
        .map(|p| match card.direction {
            Direction::Forward => p.target.as_str(),
            Direction::Reverse => p.source.as_str(),
        })
        .collect();
    wrong_pool.shuffle(rng);

    let mut choices = vec![correct];
    for answer in wrong_pool {
        if choices.len() >= CHOICE_COUNT {
            break;
        }
        if seen.insert(normalize(answer)) {
            choices.push(answer.to_string());
        }
    }
    choices.shuffle(rng);
    choices
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChoiceState {
    AwaitingSelection {
        choices: Vec<String>,
    },
    Resolved {
        choices: Vec<String>,
        selected: usize,
        correct: bool,
        resolved_at: Instant,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChoiceAction {
    Select(usize),
    Advance,
    /// Timer check; advances once `AUTO_ADVANCE` has elapsed since grading.
    Tick,
}

impl ChoiceState {
    pub fn new(choices: Vec<String>) -> Self {
        ChoiceState::AwaitingSelection { choices }
    }

    pub fn choices(&self) -> &[String] {
        match self {
            ChoiceState::AwaitingSelection { choices } | ChoiceState::Resolved { choices, .. } => {
                choices
            }
        }
    }

    /// When the pending automatic advance fires, if one is pending.
    pub fn advance_deadline(&self) -> Option<Instant> {
        match self {
            ChoiceState::Resolved { resolved_at, .. } => Some(*resolved_at + AUTO_ADVANCE),
            ChoiceState::AwaitingSelection { .. } => None,
        }
    }

    pub fn transition(self, action: ChoiceAction, expected: &str, now: Instant) -> (Self, Vec<Effect>) {
        match self {
            ChoiceState::AwaitingSelection { choices } => match action {
                ChoiceAction::Select(index) if index < choices.len() => {
                    let correct = normalize(&choices[index]) == normalize(expected);
                    (
                        ChoiceState::Resolved {
                            choices,
                            selected: index,
                            correct,
                            resolved_at: now,
                        },
                        vec![Effect::Resolve { correct }],
                    )
                }
                _ => (ChoiceState::AwaitingSelection { choices }, vec![]),
            },
            resolved @ ChoiceState::Resolved { .. } => {
                let fire = match action {
                    ChoiceAction::Select(_) | ChoiceAction::Advance => true,
                    ChoiceAction::Tick => resolved
                        .advance_deadline()
                        .is_some_and(|deadline| now >= deadline),
                };
                let effects = if fire { vec![Effect::Advance] } else { vec![] };
                (resolved, effects)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn pairs() -> Vec<WordPair> {
        vec![
            WordPair::new("gato", "cat"),
            WordPair::new("perro", "dog"),
            WordPair::new("pájaro", "bird"),
            WordPair::new("pez", "fish"),
            WordPair::new("caballo", "horse"),
            WordPair::new("felino", "Cat"),
            WordPair::new("can", "dog "),
        ]
    }

    #[test]
    fn test_four_distinct_choices_with_answer() {
        let pairs = pairs();
        let card = Card::new(pairs[0].clone(), Direction::Forward);
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..100 {
            let choices = build_choices(&card, &pairs, &mut rng);
            assert_eq!(choices.len(), CHOICE_COUNT);
            assert!(choices.iter().any(|c| c == "cat"));
            let normalized: HashSet<String> = choices.iter().map(|c| normalize(c)).collect();
            assert_eq!(normalized.len(), CHOICE_COUNT);
        }
    }

    #[test]
    fn test_reverse_card_uses_source_side() {
        let pairs = pairs();
        let card = Card::new(pairs[1].clone(), Direction::Reverse);
        let mut rng = SmallRng::seed_from_u64(8);
        let choices = build_choices(&card, &pairs, &mut rng);
        let sources: Vec<&str> = pairs.iter().map(|p| p.source.as_str()).collect();
        assert!(choices.iter().all(|c| sources.contains(&c.as_str())));
        assert!(choices.iter().any(|c| c == "perro"));
    }

    #[test]
    fn test_tiny_list_gives_fewer_choices() {
        let pairs = vec![WordPair::new("sí", "yes"), WordPair::new("no", "no")];
        let card = Card::new(pairs[0].clone(), Direction::Forward);
        let mut rng = SmallRng::seed_from_u64(2);
        assert_eq!(build_choices(&card, &pairs, &mut rng).len(), 2);
    }

    fn awaiting() -> ChoiceState {
        ChoiceState::new(vec!["dog".into(), "cat".into(), "fish".into(), "bird".into()])
    }

    #[test]
    fn test_select_grades_by_normalized_match() {
        let now = Instant::now();
        let (state, effects) = awaiting().transition(ChoiceAction::Select(1), "Cat", now);
        assert_eq!(effects, vec![Effect::Resolve { correct: true }]);
        assert!(matches!(state, ChoiceState::Resolved { correct: true, selected: 1, .. }));

        let (_, effects) = awaiting().transition(ChoiceAction::Select(0), "cat", now);
        assert_eq!(effects, vec![Effect::Resolve { correct: false }]);
    }

    #[test]
    fn test_out_of_range_selection_ignored() {
        let (state, effects) = awaiting().transition(ChoiceAction::Select(9), "cat", Instant::now());
        assert_eq!(state, awaiting());
        assert!(effects.is_empty());
    }

    #[test]
    fn test_selection_after_grading_advances() {
        let now = Instant::now();
        let (state, _) = awaiting().transition(ChoiceAction::Select(1), "cat", now);
        let (_, effects) = state.transition(ChoiceAction::Select(2), "cat", now);
        assert_eq!(effects, vec![Effect::Advance]);
    }

    #[test]
    fn test_tick_advances_only_after_delay() {
        let now = Instant::now();
        let (state, _) = awaiting().transition(ChoiceAction::Select(1), "cat", now);
        let (state, effects) =
            state.transition(ChoiceAction::Tick, "cat", now + Duration::from_millis(400));
        assert!(effects.is_empty());
        let (_, effects) = state.transition(ChoiceAction::Tick, "cat", now + AUTO_ADVANCE);
        assert_eq!(effects, vec![Effect::Advance]);
    }

    #[test]
    fn test_tick_while_awaiting_is_noop() {
        let (_, effects) = awaiting().transition(
            ChoiceAction::Tick,
            "cat",
            Instant::now() + Duration::from_secs(5),
        );
        assert!(effects.is_empty());
    }
}
