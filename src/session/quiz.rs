use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::catalog::{WordList, WordPair};
use crate::engine::progress::ProgressStore;
use crate::engine::session_builder;
use crate::session::choice::{self, ChoiceAction, ChoiceState};
use crate::session::flashcard::{FlashcardAction, FlashcardState};
use crate::session::matching::{MatchAction, MatchState};
use crate::session::progress::{Effect, SessionProgress};
use crate::session::result::{self, Summary};
use crate::session::typed::{TypedAction, TypedState};
use crate::session::{Card, Direction, Outcome, QuizError, QuizMode, Session};

/// Display state of the active mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModeState {
    Flashcard(FlashcardState),
    Typed(TypedState),
    Choice(ChoiceState),
    Match(MatchState),
}

/// Learner input (plus the timer tick) routed to whichever mode is active.
/// Actions that mean nothing to the active mode are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizAction {
    Reveal,
    Missed,
    GotIt,
    Submit(String),
    Select(usize),
    Next,
    SelectSource(usize),
    SelectTarget(usize),
    Done,
    Tick,
}

/// One run of a quiz mode over a session.
pub struct Quiz {
    mode: QuizMode,
    pairs: Vec<WordPair>,
    progress: SessionProgress,
    state: ModeState,
    finished: bool,
    rng: SmallRng,
}

impl Quiz {
    /// Build a fresh session for `mode` and start it.
    pub fn start(
        list: &WordList,
        mode: QuizMode,
        store: &ProgressStore,
        mut rng: SmallRng,
    ) -> Result<Self, QuizError> {
        if mode == QuizMode::Match {
            let board = MatchState::deal(&list.pairs, &mut rng);
            let session = Session::new(
                board
                    .pairs()
                    .iter()
                    .map(|p| Card::new(p.clone(), Direction::Forward))
                    .collect(),
            );
            return Self::launch(list, mode, session, Some(board), rng);
        }

        let session = match mode {
            QuizMode::ReverseChoice => session_builder::build_reverse(list, &mut rng),
            _ => session_builder::build(list, store, &mut rng),
        };
        Self::launch(list, mode, session, None, rng)
    }

    /// Run a prepared session card by card. The matching board is only dealt
    /// by `start`, so `QuizMode::Match` is refused here.
    pub fn with_session(
        list: &WordList,
        mode: QuizMode,
        session: Session,
        rng: SmallRng,
    ) -> Result<Self, QuizError> {
        Self::launch(list, mode, session, None, rng)
    }

    fn launch(
        list: &WordList,
        mode: QuizMode,
        session: Session,
        board: Option<MatchState>,
        rng: SmallRng,
    ) -> Result<Self, QuizError> {
        if session.is_empty() {
            log::info!("refusing empty {} session for {}", mode.as_str(), list.id);
            return Err(QuizError::EmptySession);
        }
        log::info!(
            "starting {} session for {}: {} cards",
            mode.as_str(),
            list.id,
            session.len()
        );
        let mut quiz = Self {
            mode,
            pairs: list.pairs.clone(),
            progress: SessionProgress::new(&list.id, session),
            state: ModeState::Flashcard(FlashcardState::Prompt),
            finished: false,
            rng,
        };
        quiz.state = match board {
            Some(board) => ModeState::Match(board),
            None => quiz
                .card_state()
                .ok_or(QuizError::UnsupportedMode(mode))?,
        };
        Ok(quiz)
    }

    /// Follow-up run over the cards missed so far. Never started implicitly.
    pub fn retry_missed(&mut self, list: &WordList) -> Result<Self, QuizError> {
        let (session, mode) = result::retry(self.outcomes(), self.mode);
        log::info!("retrying {} missed cards as {}", session.len(), mode.as_str());
        let rng = SmallRng::from_rng(&mut self.rng).unwrap_or_else(|_| SmallRng::from_entropy());
        Self::with_session(list, mode, session, rng)
    }

    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    pub fn state(&self) -> &ModeState {
        &self.state
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.progress.current()
    }

    pub fn outcomes(&self) -> &[Outcome] {
        self.progress.outcomes()
    }

    pub fn summary(&self) -> Summary {
        result::summarize(self.outcomes())
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// `(done, total)` for the progress bar.
    pub fn position(&self) -> (usize, usize) {
        match &self.state {
            ModeState::Match(board) => (board.matched_count(), board.pairs().len()),
            _ => (self.progress.cursor(), self.progress.total()),
        }
    }

    pub fn handle(&mut self, action: QuizAction, store: &mut ProgressStore, now: Instant) {
        if self.finished {
            return;
        }
        let expected = self
            .progress
            .current()
            .map(|c| c.answer().to_string())
            .unwrap_or_default();
        let state = std::mem::replace(
            &mut self.state,
            ModeState::Flashcard(FlashcardState::Prompt),
        );

        let (state, effects) = match (state, action) {
            (ModeState::Flashcard(s), QuizAction::Reveal) => {
                wrap(ModeState::Flashcard, s.transition(FlashcardAction::Reveal))
            }
            (ModeState::Flashcard(s), QuizAction::Missed) => {
                wrap(ModeState::Flashcard, s.transition(FlashcardAction::Missed))
            }
            (ModeState::Flashcard(s), QuizAction::GotIt) => {
                wrap(ModeState::Flashcard, s.transition(FlashcardAction::GotIt))
            }

            (ModeState::Typed(s), QuizAction::Submit(input)) => {
                wrap(ModeState::Typed, s.transition(TypedAction::Submit(input), &expected))
            }
            (ModeState::Typed(s), QuizAction::Next) => {
                wrap(ModeState::Typed, s.transition(TypedAction::Next, &expected))
            }

            (ModeState::Choice(s), QuizAction::Select(i)) => {
                wrap(ModeState::Choice, s.transition(ChoiceAction::Select(i), &expected, now))
            }
            (ModeState::Choice(s), QuizAction::Next) => {
                wrap(ModeState::Choice, s.transition(ChoiceAction::Advance, &expected, now))
            }
            (ModeState::Choice(s), QuizAction::Tick) => {
                wrap(ModeState::Choice, s.transition(ChoiceAction::Tick, &expected, now))
            }

            (ModeState::Match(s), QuizAction::SelectSource(i)) => {
                wrap(ModeState::Match, s.transition(MatchAction::SelectSource(i), now))
            }
            (ModeState::Match(s), QuizAction::SelectTarget(i)) => {
                wrap(ModeState::Match, s.transition(MatchAction::SelectTarget(i), now))
            }
            (ModeState::Match(s), QuizAction::Tick) => {
                wrap(ModeState::Match, s.transition(MatchAction::Tick, now))
            }
            (ModeState::Match(s), QuizAction::Done) => {
                wrap(ModeState::Match, s.transition(MatchAction::Done, now))
            }

            (state, _) => (state, vec![]),
        };

        self.state = state;
        for effect in effects {
            self.apply(effect, store);
        }
    }

    fn apply(&mut self, effect: Effect, store: &mut ProgressStore) {
        match effect {
            Effect::Resolve { correct } => {
                self.progress.resolve(correct, store);
            }
            Effect::Advance => {
                if self.progress.advance() {
                    if self.progress.is_complete() {
                        self.finish();
                    } else if let Some(state) = self.card_state() {
                        self.state = state;
                    }
                }
            }
            Effect::ResolvePair { index, correct } => {
                if let ModeState::Match(board) = &self.state
                    && let Some(pair) = board.pairs().get(index)
                {
                    let card = Card::new(pair.clone(), Direction::Forward);
                    self.progress.resolve_card(card, correct, store);
                }
            }
            Effect::Finish => self.finish(),
        }
    }

    fn finish(&mut self) {
        self.finished = true;
        let summary = self.summary();
        log::info!(
            "{} session finished: {}/{} correct ({}%)",
            self.mode.as_str(),
            summary.correct,
            summary.total,
            summary.accuracy_percent
        );
    }

    /// Mode state for the card under the cursor; `None` for the matching
    /// board, which is dealt once and never replaced.
    fn card_state(&mut self) -> Option<ModeState> {
        let state = match self.mode {
            QuizMode::Flashcard => ModeState::Flashcard(FlashcardState::Prompt),
            QuizMode::Typed => ModeState::Typed(TypedState::AwaitingInput),
            QuizMode::Choice | QuizMode::ReverseChoice => {
                let choices = match self.progress.current() {
                    Some(card) => choice::build_choices(card, &self.pairs, &mut self.rng),
                    None => Vec::new(),
                };
                ModeState::Choice(ChoiceState::new(choices))
            }
            QuizMode::Match => return None,
        };
        Some(state)
    }
}

fn wrap<S>(
    ctor: fn(S) -> ModeState,
    (state, effects): (S, Vec<Effect>),
) -> (ModeState, Vec<Effect>) {
    (ctor(state), effects)
}
