use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::catalog::{Catalog, ListMeta};
use crate::engine::progress::ProgressStore;
use crate::engine::stats;
use crate::ui::theme::Theme;

/// Lists in picker order: grouped by subject, newest first within a group.
pub fn grouped(catalog: &Catalog) -> Vec<&ListMeta> {
    catalog
        .subjects()
        .into_iter()
        .flat_map(|subject| catalog.lists_for(subject))
        .collect()
}

pub struct ListPicker<'a> {
    catalog: &'a Catalog,
    store: &'a ProgressStore,
    selected: usize,
    theme: &'a Theme,
}

impl<'a> ListPicker<'a> {
    pub fn new(
        catalog: &'a Catalog,
        store: &'a ProgressStore,
        selected: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            catalog,
            store,
            selected,
            theme,
        }
    }
}

impl Widget for ListPicker<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Word Lists ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.catalog.lists.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "  No word lists in this catalog.",
                Style::default().fg(colors.text_pending()),
            )))
            .render(inner, buf);
            return;
        }

        let mut lines = Vec::new();
        let mut selected_line = 0;
        let mut row = 0;
        for subject in self.catalog.subjects() {
            if !lines.is_empty() {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(
                format!(" {subject}"),
                Style::default()
                    .fg(colors.header_fg())
                    .add_modifier(Modifier::BOLD),
            )));

            for meta in self.catalog.lists_for(subject) {
                let is_selected = row == self.selected;
                if is_selected {
                    selected_line = lines.len();
                }
                let percent =
                    stats::list_progress_percent(self.store, &meta.id, meta.word_count);
                let indicator = if is_selected { ">" } else { " " };
                let name_style = if is_selected {
                    Style::default()
                        .fg(colors.accent())
                        .bg(colors.selected_bg())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.fg())
                };
                let percent_color = if percent >= 100 {
                    colors.success()
                } else if percent > 0 {
                    colors.warning()
                } else {
                    colors.text_pending()
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("  {indicator} {:<32}", meta.name), name_style),
                    Span::styled(
                        format!(" {:>4} words ", meta.word_count),
                        Style::default().fg(colors.text_pending()),
                    ),
                    Span::styled(format!("{percent:>3}%"), Style::default().fg(percent_color)),
                ]));
                row += 1;
            }
        }

        let visible = inner.height as usize;
        let offset = (selected_line + 1).saturating_sub(visible) as u16;
        Paragraph::new(lines).scroll((offset, 0)).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSource;

    #[test]
    fn test_grouped_keeps_subjects_together() {
        let catalog = Catalog::load(CatalogSource::Builtin).unwrap();
        let order = grouped(&catalog);
        assert_eq!(order.len(), catalog.lists.len());
        let subjects: Vec<&str> = order.iter().map(|m| m.subject.as_str()).collect();
        let mut collapsed = subjects.clone();
        collapsed.dedup();
        assert_eq!(collapsed, catalog.subjects());
    }
}
