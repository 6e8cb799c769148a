use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::QuizMode;
use crate::session::result::Summary;
use crate::ui::theme::{Theme, ThemeColors};

/// End-of-session results.
pub struct Dashboard<'a> {
    pub summary: &'a Summary,
    pub mode: QuizMode,
    pub theme: &'a Theme,
}

impl<'a> Dashboard<'a> {
    pub fn new(summary: &'a Summary, mode: QuizMode, theme: &'a Theme) -> Self {
        Self {
            summary,
            mode,
            theme,
        }
    }
}

fn accuracy_color(colors: &ThemeColors, percent: u32) -> Color {
    if percent >= 90 {
        colors.success()
    } else if percent >= 70 {
        colors.warning()
    } else {
        colors.error()
    }
}

impl Widget for Dashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Session Complete ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(inner);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "Results",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({})", self.mode.title()),
                Style::default().fg(colors.text_pending()),
            ),
        ]))
        .alignment(Alignment::Center);
        title.render(layout[0], buf);

        let percent = self.summary.accuracy_percent;
        let acc_text = format!("{percent}%");
        let acc_detail = format!(
            "  ({} of {} correct)",
            self.summary.correct, self.summary.total
        );
        let acc_line = Line::from(vec![
            Span::styled("  Accuracy: ", Style::default().fg(colors.fg())),
            Span::styled(
                &*acc_text,
                Style::default()
                    .fg(accuracy_color(colors, percent))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(&*acc_detail, Style::default().fg(colors.text_pending())),
        ]);
        Paragraph::new(acc_line).render(layout[1], buf);

        let missed_header = if self.summary.is_perfect() {
            Line::from(Span::styled(
                "  Perfect! Nothing missed.",
                Style::default().fg(colors.success()),
            ))
        } else {
            Line::from(Span::styled(
                format!("  Missed ({}):", self.summary.missed.len()),
                Style::default().fg(colors.fg()),
            ))
        };
        Paragraph::new(missed_header).render(layout[2], buf);

        let missed_lines: Vec<Line> = self
            .summary
            .missed
            .iter()
            .map(|o| {
                Line::from(vec![
                    Span::styled(
                        format!("    {}", o.card.prompt()),
                        Style::default().fg(colors.error()),
                    ),
                    Span::styled(" \u{2192} ", Style::default().fg(colors.text_pending())),
                    Span::styled(o.card.answer().to_string(), Style::default().fg(colors.fg())),
                ])
            })
            .collect();
        Paragraph::new(missed_lines).render(layout[3], buf);

        let mut help = Vec::new();
        if !self.summary.is_perfect() {
            help.push(Span::styled(
                "  [r] Retry missed  ",
                Style::default().fg(colors.accent()),
            ));
        }
        help.push(Span::styled(
            "  [n/Enter] New session  ",
            Style::default().fg(colors.accent()),
        ));
        help.push(Span::styled("[q] Menu", Style::default().fg(colors.accent())));
        Paragraph::new(Line::from(help)).render(layout[4], buf);
    }
}
