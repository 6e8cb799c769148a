use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::matching::MatchState;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchColumn {
    #[default]
    Source,
    Target,
}

/// Keyboard cursor over the two columns; `row` is a display row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchCursor {
    pub column: MatchColumn,
    pub row: usize,
}

impl MatchCursor {
    pub fn up(&mut self) {
        self.row = self.row.saturating_sub(1);
    }

    pub fn down(&mut self, rows: usize) {
        if self.row + 1 < rows {
            self.row += 1;
        }
    }

    pub fn switch_column(&mut self) {
        self.column = match self.column {
            MatchColumn::Source => MatchColumn::Target,
            MatchColumn::Target => MatchColumn::Source,
        };
    }
}

pub struct MatchBoard<'a> {
    board: &'a MatchState,
    cursor: MatchCursor,
    theme: &'a Theme,
}

impl<'a> MatchBoard<'a> {
    pub fn new(board: &'a MatchState, cursor: MatchCursor, theme: &'a Theme) -> Self {
        Self {
            board,
            cursor,
            theme,
        }
    }

    fn item_style(&self, pair: usize, column: MatchColumn, row: usize) -> Style {
        let colors = &self.theme.colors;
        let flashed = self.board.flash().is_some_and(|f| match column {
            MatchColumn::Source => f.source == pair,
            MatchColumn::Target => f.target == pair,
        });

        let mut style = if self.board.is_matched(pair) {
            Style::default()
                .fg(colors.matched())
                .add_modifier(Modifier::CROSSED_OUT)
        } else if flashed {
            Style::default()
                .fg(colors.bg())
                .bg(colors.error())
                .add_modifier(Modifier::BOLD)
        } else if column == MatchColumn::Source && self.board.selected() == Some(pair) {
            Style::default()
                .fg(colors.bg())
                .bg(colors.accent())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.fg())
        };

        if self.cursor.column == column && self.cursor.row == row && !flashed {
            style = style.bg(colors.selected_bg());
        }
        style
    }

    fn column_lines(&self, column: MatchColumn) -> Vec<Line<'a>> {
        let pairs = self.board.pairs();
        (0..pairs.len())
            .map(|row| {
                let (pair, text) = match column {
                    MatchColumn::Source => (row, pairs[row].source.as_str()),
                    MatchColumn::Target => {
                        let pair = self.board.target_order()[row];
                        (pair, pairs[pair].target.as_str())
                    }
                };
                let marker = if self.cursor.column == column && self.cursor.row == row {
                    ">"
                } else {
                    " "
                };
                Line::from(Span::styled(
                    format!("{marker} {text}"),
                    self.item_style(pair, column, row),
                ))
            })
            .collect()
    }
}

impl Widget for MatchBoard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let title = format!(
            " Match  {}/{} ",
            self.board.matched_count(),
            self.board.pairs().len()
        );
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(inner);

        let offset = (self.cursor.row + 1).saturating_sub(inner.height as usize) as u16;
        for (column, area) in [(MatchColumn::Source, columns[0]), (MatchColumn::Target, columns[1])] {
            let border = if self.cursor.column == column {
                colors.accent()
            } else {
                colors.border()
            };
            let block = Block::bordered().border_style(Style::default().fg(border));
            let list_area = block.inner(area);
            block.render(area, buf);
            Paragraph::new(self.column_lines(column))
                .scroll((offset, 0))
                .render(list_area, buf);
        }

        if self.board.is_complete() {
            let done = Line::from(Span::styled(
                " All matched! Press Enter ",
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD),
            ));
            let y = inner.y + inner.height.saturating_sub(1);
            buf.set_line(inner.x + 1, y, &done, inner.width.saturating_sub(2));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_stays_on_board() {
        let mut cursor = MatchCursor::default();
        cursor.up();
        assert_eq!(cursor.row, 0);
        cursor.down(2);
        cursor.down(2);
        assert_eq!(cursor.row, 1);
        cursor.switch_column();
        assert_eq!(cursor.column, MatchColumn::Target);
        cursor.switch_column();
        assert_eq!(cursor.column, MatchColumn::Source);
    }
}
