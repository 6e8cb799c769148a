use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Cell, Row, Table, Widget};

use crate::catalog::WordPair;
use crate::engine::stats::{BrowseColumn, BrowseSort, StatsSort, WordStats};
use crate::ui::theme::Theme;

/// Per-word correct/missed counts for one list.
pub struct StatsTable<'a> {
    rows: &'a [WordStats],
    sort: StatsSort,
    scroll: usize,
    theme: &'a Theme,
}

impl<'a> StatsTable<'a> {
    pub fn new(rows: &'a [WordStats], sort: StatsSort, scroll: usize, theme: &'a Theme) -> Self {
        Self {
            rows,
            sort,
            scroll,
            theme,
        }
    }
}

impl Widget for StatsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" Word Stats (sorted by {}) ", self.sort.label()))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));

        let header = Row::new(["Word", "Translation", "Correct", "Missed", "Accuracy"])
            .style(
                Style::default()
                    .fg(colors.header_fg())
                    .bg(colors.header_bg())
                    .add_modifier(Modifier::BOLD),
            );

        let rows = self.rows.iter().skip(self.scroll).map(|r| {
            let (accuracy, acc_style) = match r.accuracy() {
                Some(pct) if pct >= 80 => (format!("{pct}%"), Style::default().fg(colors.success())),
                Some(pct) if pct >= 50 => (format!("{pct}%"), Style::default().fg(colors.warning())),
                Some(pct) => (format!("{pct}%"), Style::default().fg(colors.error())),
                None => ("-".to_string(), Style::default().fg(colors.text_pending())),
            };
            Row::new(vec![
                Cell::from(r.pair.source.clone()),
                Cell::from(r.pair.target.clone()),
                Cell::from(r.correct.to_string()).style(Style::default().fg(colors.success())),
                Cell::from(r.incorrect.to_string()).style(Style::default().fg(colors.error())),
                Cell::from(accuracy).style(acc_style),
            ])
            .style(Style::default().fg(colors.fg()))
        });

        Table::new(
            rows,
            [
                Constraint::Percentage(30),
                Constraint::Percentage(30),
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Length(9),
            ],
        )
        .header(header)
        .block(block)
        .render(area, buf);
    }
}

/// Every pair in a list, sortable by either column.
pub struct BrowseTable<'a> {
    pairs: &'a [WordPair],
    sort: BrowseSort,
    scroll: usize,
    theme: &'a Theme,
}

impl<'a> BrowseTable<'a> {
    pub fn new(pairs: &'a [WordPair], sort: BrowseSort, scroll: usize, theme: &'a Theme) -> Self {
        Self {
            pairs,
            sort,
            scroll,
            theme,
        }
    }

    fn column_title(&self, column: BrowseColumn, name: &'static str) -> Line<'static> {
        let arrow = match self.sort.column {
            Some(c) if c == column && self.sort.descending => " \u{25bc}",
            Some(c) if c == column => " \u{25b2}",
            _ => "",
        };
        Line::from(Span::raw(format!("{name}{arrow}")))
    }
}

impl Widget for BrowseTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" Browse ({} words) ", self.pairs.len()))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));

        let header = Row::new(vec![
            Cell::from(self.column_title(BrowseColumn::Source, "Word")),
            Cell::from(self.column_title(BrowseColumn::Target, "Translation")),
        ])
        .style(
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        );

        let rows = self.pairs.iter().skip(self.scroll).map(|p| {
            Row::new(vec![
                Cell::from(p.source.clone()),
                Cell::from(p.target.clone()),
            ])
            .style(Style::default().fg(colors.fg()))
        });

        Table::new(rows, [Constraint::Percentage(50), Constraint::Percentage(50)])
            .header(header)
            .block(block)
            .render(area, buf);
    }
}
