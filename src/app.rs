use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::catalog::{Catalog, WordList, WordPair};
use crate::config::Config;
use crate::engine::progress::ProgressStore;
use crate::engine::stats::{self, BrowseColumn, BrowseSort, ListStats, StatsSort, WordStats};
use crate::session::quiz::{ModeState, Quiz, QuizAction};
use crate::session::typed::TypedState;
use crate::session::QuizMode;
use crate::ui::components::list_picker;
use crate::ui::components::match_board::{MatchColumn, MatchCursor};
use crate::ui::components::menu::{Menu, MenuAction};
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Lists,
    Menu,
    Quiz,
    Results,
    Stats,
    Browse,
}

pub struct App {
    pub screen: AppScreen,
    pub catalog: Catalog,
    pub list_selected: usize,
    pub list: Option<WordList>,
    pub quiz: Option<Quiz>,
    /// Mode picked from the menu; a restart reuses it even after a retry
    /// switched modes.
    pub last_mode: QuizMode,
    pub menu: Menu<'static>,
    pub theme: &'static Theme,
    pub config: Config,
    pub store: ProgressStore,
    /// One-line message for the footer, cleared on the next key.
    pub notice: Option<String>,
    pub input: String,
    pub match_cursor: MatchCursor,
    pub stats_sort: StatsSort,
    pub browse_sort: BrowseSort,
    pub scroll: usize,
    pub should_quit: bool,
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config, catalog: Catalog, store: ProgressStore, theme: &'static Theme) -> Self {
        let last_mode = config.mode();
        let mut menu = Menu::new(theme);
        menu.select_mode(last_mode);

        Self {
            screen: AppScreen::Lists,
            catalog,
            list_selected: 0,
            list: None,
            quiz: None,
            last_mode,
            menu,
            theme,
            config,
            store,
            notice: None,
            input: String::new(),
            match_cursor: MatchCursor::default(),
            stats_sort: StatsSort::default(),
            browse_sort: BrowseSort::default(),
            scroll: 0,
            should_quit: false,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Deterministic shuffles, for tests.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    pub fn list_count(&self) -> usize {
        self.catalog.lists.len()
    }

    pub fn next_list(&mut self) {
        if self.list_count() > 0 {
            self.list_selected = (self.list_selected + 1) % self.list_count();
        }
    }

    pub fn prev_list(&mut self) {
        if self.list_count() > 0 {
            self.list_selected = self
                .list_selected
                .checked_sub(1)
                .unwrap_or(self.list_count() - 1);
        }
    }

    pub fn open_selected_list(&mut self) {
        let Some(id) = list_picker::grouped(&self.catalog)
            .get(self.list_selected)
            .map(|meta| meta.id.clone())
        else {
            return;
        };
        self.open_list(&id);
    }

    /// Load a list by id and show its mode menu. Failures become a notice.
    pub fn open_list(&mut self, id: &str) {
        match self.catalog.load_list_by_id(id) {
            Ok(list) => {
                log::info!("opened list {} ({} pairs)", list.id, list.pairs.len());
                if let Some(index) = list_picker::grouped(&self.catalog)
                    .iter()
                    .position(|meta| meta.id == list.id)
                {
                    self.list_selected = index;
                }
                self.config.last_list = Some(list.id.clone());
                self.list = Some(list);
                self.go_to_menu();
            }
            Err(e) => {
                log::error!("failed to open list {id}: {e}");
                self.notice = Some(format!("Could not load list: {e}"));
            }
        }
    }

    fn refresh_menu(&mut self) {
        let Some(list) = &self.list else {
            return;
        };
        let list_stats = stats::list_stats(&self.store, list);
        self.menu.title = format!("{}: {}", list.subject, list.name);
        self.menu.subtitle = list_summary(list_stats);
    }

    pub fn menu_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::Start(mode) => self.start_quiz(mode),
            MenuAction::Stats => {
                self.scroll = 0;
                self.screen = AppScreen::Stats;
            }
            MenuAction::Browse => {
                self.scroll = 0;
                self.screen = AppScreen::Browse;
            }
        }
    }

    pub fn start_quiz(&mut self, mode: QuizMode) {
        let Some(list) = &self.list else {
            return;
        };
        let rng = SmallRng::from_rng(&mut self.rng).unwrap_or_else(|_| SmallRng::from_entropy());
        match Quiz::start(list, mode, &self.store, rng) {
            Ok(quiz) => {
                self.last_mode = mode;
                self.config.default_mode = mode.as_str().to_string();
                self.begin(quiz);
            }
            Err(e) => self.notice = Some(e.to_string()),
        }
    }

    fn begin(&mut self, quiz: Quiz) {
        self.quiz = Some(quiz);
        self.input.clear();
        self.match_cursor = MatchCursor::default();
        self.screen = AppScreen::Quiz;
    }

    pub fn quiz_action(&mut self, action: QuizAction) {
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        let before = quiz.position();
        quiz.handle(action, &mut self.store, Instant::now());
        if quiz.position() != before && quiz.mode() != QuizMode::Match {
            self.input.clear();
        }
        if quiz.is_finished() {
            self.screen = AppScreen::Results;
        }
    }

    pub fn tick(&mut self) {
        if self.screen == AppScreen::Quiz {
            self.quiz_action(QuizAction::Tick);
        }
    }

    /// Enter in typed mode: check the answer, or move on once graded.
    pub fn submit_typed(&mut self) {
        let action = match self.quiz.as_ref().map(Quiz::state) {
            Some(ModeState::Typed(TypedState::AwaitingInput)) => {
                QuizAction::Submit(self.input.clone())
            }
            Some(ModeState::Typed(TypedState::Resolved { .. })) => QuizAction::Next,
            _ => return,
        };
        self.quiz_action(action);
    }

    pub fn type_char(&mut self, ch: char) {
        if matches!(
            self.quiz.as_ref().map(Quiz::state),
            Some(ModeState::Typed(TypedState::AwaitingInput))
        ) {
            self.input.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn match_rows(&self) -> usize {
        match self.quiz.as_ref().map(Quiz::state) {
            Some(ModeState::Match(board)) => board.pairs().len(),
            _ => 0,
        }
    }

    /// Enter on the matching board: pick the item under the cursor, or
    /// finish once everything is paired.
    pub fn match_select(&mut self) {
        let action = match self.quiz.as_ref().map(Quiz::state) {
            Some(ModeState::Match(board)) if board.is_complete() => QuizAction::Done,
            Some(ModeState::Match(board)) => match self.match_cursor.column {
                MatchColumn::Source => QuizAction::SelectSource(self.match_cursor.row),
                MatchColumn::Target => match board.target_order().get(self.match_cursor.row) {
                    Some(&pair) => QuizAction::SelectTarget(pair),
                    None => return,
                },
            },
            _ => return,
        };
        let was_source = self.match_cursor.column == MatchColumn::Source;
        self.quiz_action(action);
        if was_source
            && let Some(ModeState::Match(board)) = self.quiz.as_ref().map(Quiz::state)
            && board.selected().is_some()
        {
            self.match_cursor.switch_column();
        }
    }

    pub fn retry_missed(&mut self) {
        let (Some(quiz), Some(list)) = (self.quiz.as_mut(), self.list.as_ref()) else {
            return;
        };
        if quiz.summary().is_perfect() {
            return;
        }
        match quiz.retry_missed(list) {
            Ok(retry) => self.begin(retry),
            Err(e) => self.notice = Some(e.to_string()),
        }
    }

    /// Fresh session in the last mode picked from the menu.
    pub fn restart(&mut self) {
        self.start_quiz(self.last_mode);
    }

    pub fn go_to_menu(&mut self) {
        self.quiz = None;
        self.input.clear();
        self.refresh_menu();
        self.screen = AppScreen::Menu;
    }

    pub fn go_to_lists(&mut self) {
        self.quiz = None;
        self.screen = AppScreen::Lists;
    }

    pub fn word_stats(&self) -> Vec<WordStats> {
        match &self.list {
            Some(list) => stats::word_stats(&self.store, list, self.stats_sort),
            None => Vec::new(),
        }
    }

    pub fn browse_pairs(&self) -> Vec<WordPair> {
        match &self.list {
            Some(list) => self.browse_sort.apply(&list.pairs),
            None => Vec::new(),
        }
    }

    pub fn cycle_stats_sort(&mut self) {
        self.stats_sort = self.stats_sort.next();
        self.scroll = 0;
    }

    pub fn sort_browse(&mut self, column: BrowseColumn) {
        self.browse_sort = self.browse_sort.toggle(column);
        self.scroll = 0;
    }

    pub fn scroll_down(&mut self) {
        let rows = self.list.as_ref().map_or(0, |l| l.pairs.len());
        if self.scroll + 1 < rows {
            self.scroll += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

/// Menu subtitle: word count and confident words per direction.
fn list_summary(list_stats: ListStats) -> String {
    format!(
        "{} words | {}/{} confident forward | {}/{} confident reverse",
        list_stats.words,
        list_stats.comfortable_forward,
        list_stats.words,
        list_stats.comfortable_reverse,
        list_stats.words,
    )
}
