use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::QuizMode;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Start(QuizMode),
    Stats,
    Browse,
}

pub struct MenuItem {
    pub key: char,
    pub label: String,
    pub description: String,
    pub action: MenuAction,
}

/// Mode picker shown once a list is open.
pub struct Menu<'a> {
    pub items: Vec<MenuItem>,
    pub selected: usize,
    pub title: String,
    pub subtitle: String,
    pub theme: &'a Theme,
}

fn describe(mode: QuizMode) -> &'static str {
    match mode {
        QuizMode::Flashcard => "Reveal the answer, then grade yourself",
        QuizMode::Typed => "Type the translation",
        QuizMode::Choice => "Pick the translation from four options",
        QuizMode::ReverseChoice => "Four options, prompted from the target language",
        QuizMode::Match => "Pair up words across two columns",
    }
}

impl<'a> Menu<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        let mut items: Vec<MenuItem> = QuizMode::ALL
            .iter()
            .zip('1'..)
            .map(|(&mode, key)| MenuItem {
                key,
                label: mode.title().to_string(),
                description: describe(mode).to_string(),
                action: MenuAction::Start(mode),
            })
            .collect();
        items.push(MenuItem {
            key: 's',
            label: "Word Stats".to_string(),
            description: "Per-word correct and missed counts".to_string(),
            action: MenuAction::Stats,
        });
        items.push(MenuItem {
            key: 'b',
            label: "Browse".to_string(),
            description: "Every pair in this list".to_string(),
            action: MenuAction::Browse,
        });

        Self {
            items,
            selected: 0,
            title: String::new(),
            subtitle: String::new(),
            theme,
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len() - 1;
        }
    }

    pub fn selected_action(&self) -> Option<MenuAction> {
        self.items.get(self.selected).map(|item| item.action)
    }

    pub fn action_for_key(&self, key: char) -> Option<MenuAction> {
        self.items.iter().find(|item| item.key == key).map(|item| item.action)
    }

    /// Point the cursor at `mode`, e.g. the configured default.
    pub fn select_mode(&mut self, mode: QuizMode) {
        if let Some(i) = self
            .items
            .iter()
            .position(|item| item.action == MenuAction::Start(mode))
        {
            self.selected = i;
        }
    }
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.title.as_str(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.subtitle.as_str(),
                Style::default().fg(colors.text_pending()),
            )),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let menu_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.items
                    .iter()
                    .map(|_| Constraint::Length(2))
                    .collect::<Vec<_>>(),
            )
            .split(layout[2]);

        for (i, item) in self.items.iter().enumerate() {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };

            let label_text = format!(" {indicator} [{}] {}", item.key, item.label);
            let desc_text = format!("       {}", item.description);

            let label_style = if is_selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };

            let lines = vec![
                Line::from(Span::styled(label_text, label_style)),
                Line::from(Span::styled(
                    desc_text,
                    Style::default().fg(colors.text_pending()),
                )),
            ];

            if i < menu_layout.len() {
                Paragraph::new(lines).render(menu_layout[i], buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_keys_start_modes_in_order() {
        let theme = Theme::default();
        let menu = Menu::new(&theme);
        assert_eq!(
            menu.action_for_key('1'),
            Some(MenuAction::Start(QuizMode::Flashcard))
        );
        assert_eq!(
            menu.action_for_key('5'),
            Some(MenuAction::Start(QuizMode::Match))
        );
        assert_eq!(menu.action_for_key('s'), Some(MenuAction::Stats));
        assert_eq!(menu.action_for_key('x'), None);
    }

    #[test]
    fn test_navigation_wraps() {
        let theme = Theme::default();
        let mut menu = Menu::new(&theme);
        menu.prev();
        assert_eq!(menu.selected_action(), Some(MenuAction::Browse));
        menu.next();
        assert_eq!(
            menu.selected_action(),
            Some(MenuAction::Start(QuizMode::Flashcard))
        );
        menu.select_mode(QuizMode::Typed);
        assert_eq!(menu.selected, 1);
    }
}
