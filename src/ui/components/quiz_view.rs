use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::engine::normalize::normalize;
use crate::session::choice::ChoiceState;
use crate::session::flashcard::FlashcardState;
use crate::session::quiz::{ModeState, Quiz};
use crate::session::typed::TypedState;
use crate::ui::theme::Theme;

/// Card view for the single-card modes. The matching board has its own widget.
pub struct QuizView<'a> {
    quiz: &'a Quiz,
    input: &'a str,
    theme: &'a Theme,
}

impl<'a> QuizView<'a> {
    pub fn new(quiz: &'a Quiz, input: &'a str, theme: &'a Theme) -> Self {
        Self { quiz, input, theme }
    }

    fn body(&self) -> Vec<Line<'a>> {
        let colors = &self.theme.colors;
        let Some(card) = self.quiz.current_card() else {
            return vec![];
        };
        let answer = card.answer().to_string();
        let answer_style = Style::default()
            .fg(colors.success())
            .add_modifier(Modifier::BOLD);

        match self.quiz.state() {
            ModeState::Flashcard(FlashcardState::Prompt) => vec![Line::from(Span::styled(
                "?",
                Style::default().fg(colors.text_pending()),
            ))],
            ModeState::Flashcard(FlashcardState::Revealed) => {
                vec![Line::from(Span::styled(answer, answer_style))]
            }
            ModeState::Typed(TypedState::AwaitingInput) => vec![Line::from(vec![
                Span::styled("> ", Style::default().fg(colors.accent())),
                Span::styled(self.input.to_string(), Style::default().fg(colors.fg())),
                Span::styled(
                    "_",
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::SLOW_BLINK),
                ),
            ])],
            ModeState::Typed(TypedState::Resolved { correct: true, given }) => vec![
                Line::from(Span::styled(given.clone(), answer_style)),
                Line::from(""),
                Line::from(Span::styled("Correct!", Style::default().fg(colors.success()))),
            ],
            ModeState::Typed(TypedState::Resolved { correct: false, given }) => vec![
                Line::from(Span::styled(
                    given.clone(),
                    Style::default()
                        .fg(colors.error())
                        .add_modifier(Modifier::CROSSED_OUT),
                )),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Answer: ", Style::default().fg(colors.text_pending())),
                    Span::styled(answer, answer_style),
                ]),
            ],
            ModeState::Choice(state) => self.choice_lines(state),
            ModeState::Match(_) => vec![],
        }
    }

    fn choice_lines(&self, state: &ChoiceState) -> Vec<Line<'a>> {
        let colors = &self.theme.colors;
        let (selected, correct) = match state {
            ChoiceState::Resolved {
                selected, correct, ..
            } => (Some(*selected), *correct),
            ChoiceState::AwaitingSelection { .. } => (None, false),
        };
        let answer = self
            .quiz
            .current_card()
            .map(|c| normalize(c.answer()))
            .unwrap_or_default();

        state
            .choices()
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                let is_answer = normalize(choice) == answer;
                let style = match selected {
                    Some(_) if is_answer => Style::default()
                        .fg(colors.success())
                        .add_modifier(Modifier::BOLD),
                    Some(s) if s == i && !correct => Style::default().fg(colors.error()),
                    Some(_) => Style::default().fg(colors.text_pending()),
                    None => Style::default().fg(colors.fg()),
                };
                Line::from(vec![
                    Span::styled(format!("[{}] ", i + 1), Style::default().fg(colors.accent())),
                    Span::styled(choice.clone(), style),
                ])
            })
            .collect()
    }
}

impl Widget for QuizView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.quiz.mode().title()))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(card) = self.quiz.current_card() else {
            return;
        };

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(inner);

        Paragraph::new(Line::from(Span::styled(
            card.direction.label(),
            Style::default().fg(colors.text_pending()),
        )))
        .alignment(Alignment::Center)
        .render(layout[0], buf);

        Paragraph::new(Line::from(Span::styled(
            card.prompt().to_string(),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(layout[2], buf);

        let alignment = if matches!(self.quiz.state(), ModeState::Choice(_)) {
            Alignment::Left
        } else {
            Alignment::Center
        };
        let body_area = if alignment == Alignment::Left {
            crate::ui::layout::centered_rect(50, 100, layout[3])
        } else {
            layout[3]
        };
        Paragraph::new(self.body())
            .alignment(alignment)
            .wrap(Wrap { trim: false })
            .render(body_area, buf);
    }
}

/// Key hints for the footer, matching the active state.
pub fn hints(quiz: &Quiz) -> &'static str {
    match quiz.state() {
        ModeState::Flashcard(FlashcardState::Prompt) => " [Space] Reveal  [Esc] Menu ",
        ModeState::Flashcard(FlashcardState::Revealed) => {
            " [m/\u{2190}] Missed it  [g/\u{2192}/Space] Got it  [Esc] Menu "
        }
        ModeState::Typed(TypedState::AwaitingInput) => " [Enter] Check  [Esc] Menu ",
        ModeState::Typed(TypedState::Resolved { .. }) => " [Enter] Next  [Esc] Menu ",
        ModeState::Choice(ChoiceState::AwaitingSelection { .. }) => " [1-4] Choose  [Esc] Menu ",
        ModeState::Choice(ChoiceState::Resolved { .. }) => " [Enter] Next  [Esc] Menu ",
        ModeState::Match(board) if board.is_complete() => " [Enter] Finish  [Esc] Menu ",
        ModeState::Match(_) => {
            " [\u{2191}\u{2193}] Move  [Tab] Switch column  [Enter] Select  [Esc] Menu "
        }
    }
}
