use crate::engine::normalize::answers_match;
use crate::session::progress::Effect;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypedState {
    AwaitingInput,
    Resolved { correct: bool, given: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypedAction {
    Submit(String),
    Next,
}

impl TypedState {
    pub fn transition(self, action: TypedAction, expected: &str) -> (Self, Vec<Effect>) {
        match (self, action) {
            (TypedState::AwaitingInput, TypedAction::Submit(input)) => {
                if input.trim().is_empty() {
                    return (TypedState::AwaitingInput, vec![]);
                }
                let correct = answers_match(&input, expected);
                (
                    TypedState::Resolved {
                        correct,
                        given: input,
                    },
                    vec![Effect::Resolve { correct }],
                )
            }
            (TypedState::AwaitingInput, TypedAction::Next) => (TypedState::AwaitingInput, vec![]),
            // Submitting again after grading moves on.
            (resolved @ TypedState::Resolved { .. }, _) => (resolved, vec![Effect::Advance]),
        }
    }
}
