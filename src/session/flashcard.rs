use crate::session::progress::Effect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashcardState {
    Prompt,
    Revealed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashcardAction {
    Reveal,
    Missed,
    GotIt,
}

impl FlashcardState {
    /// Self-graded card: reveal first, then grade. Revealing an already
    /// revealed card grades it as known.
    pub fn transition(self, action: FlashcardAction) -> (Self, Vec<Effect>) {
        use FlashcardAction::*;
        use FlashcardState::*;

        match (self, action) {
            (Prompt, Reveal) => (Revealed, vec![]),
            (Prompt, Missed | GotIt) => (Prompt, vec![]),
            (Revealed, Reveal | GotIt) => (
                Prompt,
                vec![Effect::Resolve { correct: true }, Effect::Advance],
            ),
            (Revealed, Missed) => (
                Prompt,
                vec![Effect::Resolve { correct: false }, Effect::Advance],
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grading_requires_reveal() {
        let (state, effects) = FlashcardState::Prompt.transition(FlashcardAction::GotIt);
        assert_eq!(state, FlashcardState::Prompt);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_reveal_then_missed() {
        let (state, effects) = FlashcardState::Prompt.transition(FlashcardAction::Reveal);
        assert_eq!(state, FlashcardState::Revealed);
        assert!(effects.is_empty());

        let (state, effects) = state.transition(FlashcardAction::Missed);
        assert_eq!(state, FlashcardState::Prompt);
        assert_eq!(
            effects,
            vec![Effect::Resolve { correct: false }, Effect::Advance]
        );
    }

    #[test]
    fn test_second_reveal_counts_as_got_it() {
        let (_, effects) = FlashcardState::Revealed.transition(FlashcardAction::Reveal);
        assert_eq!(
            effects,
            vec![Effect::Resolve { correct: true }, Effect::Advance]
        );
    }
}
