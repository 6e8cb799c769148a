use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use wordrill::app::{App, AppScreen};
use wordrill::catalog::{Catalog, CatalogSource};
use wordrill::config::{Config, Overrides};
use wordrill::engine::progress::ProgressStore;
use wordrill::engine::stats::BrowseColumn;
use wordrill::event::{AppEvent, EventHandler};
use wordrill::session::QuizMode;
use wordrill::session::choice::ChoiceState;
use wordrill::session::flashcard::FlashcardState;
use wordrill::session::quiz::{ModeState, QuizAction};
use wordrill::store::MemoryBackend;
use wordrill::store::json_store::{JsonStore, default_data_dir};
use wordrill::ui;
use wordrill::ui::components::dashboard::Dashboard;
use wordrill::ui::components::list_picker::ListPicker;
use wordrill::ui::components::match_board::MatchBoard;
use wordrill::ui::components::progress_bar::ProgressBar;
use wordrill::ui::components::quiz_view::{self, QuizView};
use wordrill::ui::components::word_table::{BrowseTable, StatsTable};
use wordrill::ui::layout::AppLayout;
use wordrill::ui::theme::Theme;

#[derive(Parser)]
#[command(name = "wordrill", version, about = "Terminal vocabulary drills with adaptive scheduling")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Catalog directory or URL holding index.json")]
    catalog: Option<String>,

    #[arg(short, long, help = "Open this list id on start")]
    list: Option<String>,

    #[arg(
        short,
        long,
        help = "Default quiz mode (flashcard, typed, choice, reverse-choice, match)"
    )]
    mode: Option<String>,

    #[arg(long, help = "Directory for progress.json and wordrill.log")]
    data_dir: Option<PathBuf>,
}

fn init_logging(data_dir: &Path) {
    let file = std::fs::create_dir_all(data_dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(data_dir.join("wordrill.log"))
    });
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match file {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        // stderr would draw over the alternate screen
        Err(_) => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}

fn open_store(data_dir: PathBuf) -> ProgressStore {
    match JsonStore::with_base_dir(data_dir) {
        Ok(store) => ProgressStore::load(Box::new(store)),
        Err(e) => {
            log::warn!("progress will not be saved this run: {e:#}");
            ProgressStore::load(Box::new(MemoryBackend::new()))
        }
    }
}

/// Configured catalog, falling back to the built-in lists with a notice.
fn open_catalog(location: &str) -> Result<(Catalog, Option<String>)> {
    let source = CatalogSource::parse(location);
    if source == CatalogSource::Builtin {
        return Ok((Catalog::load(source)?, None));
    }
    match Catalog::load(source) {
        Ok(catalog) => Ok((catalog, None)),
        Err(e) => {
            log::error!("catalog {location} unavailable: {e}");
            let catalog = Catalog::load(CatalogSource::Builtin)
                .context("built-in catalog is missing")?;
            Ok((catalog, Some(format!("{e}. Showing built-in lists."))))
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    init_logging(&data_dir);

    let known_themes = Theme::available_themes();
    let mut saved = Config::load().unwrap_or_else(|e| {
        log::warn!("ignoring unreadable config: {e:#}");
        Config::default()
    });
    saved.validate(&known_themes);
    let overrides = Overrides {
        theme: cli.theme,
        catalog: cli.catalog,
        mode: cli.mode,
    };
    let mut config = saved.with_overrides(&overrides)?;
    config.validate(&known_themes);
    let started = config.clone();

    let theme: &'static Theme = Box::leak(Box::new(Theme::load(&config.theme).unwrap_or_default()));
    let (catalog, notice) = open_catalog(&config.catalog)?;
    let store = open_store(data_dir);

    let start_list = cli.list.or_else(|| config.last_list.clone());
    let mut app = App::new(config, catalog, store, theme);
    if let Some(id) = start_list {
        app.open_list(&id);
    }
    if notice.is_some() {
        app.notice = notice;
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    saved.merge_session(&started, &app.config);
    if let Err(e) = saved.save() {
        log::warn!("failed to save config: {e:#}");
    }
    if let Err(err) = result {
        log::error!("exiting on error: {err:#}");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.tick(),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    app.notice = None;
    match app.screen {
        AppScreen::Lists => handle_lists_key(app, key),
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Quiz => handle_quiz_key(app, key),
        AppScreen::Results => handle_result_key(app, key),
        AppScreen::Stats => handle_stats_key(app, key),
        AppScreen::Browse => handle_browse_key(app, key),
    }
}

fn handle_lists_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.prev_list(),
        KeyCode::Down | KeyCode::Char('j') => app.next_list(),
        KeyCode::Enter => app.open_selected_list(),
        _ => {}
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.go_to_lists(),
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => {
            if let Some(action) = app.menu.selected_action() {
                app.menu_action(action);
            }
        }
        KeyCode::Char(ch) => {
            if let Some(action) = app.menu.action_for_key(ch) {
                app.menu_action(action);
            }
        }
        _ => {}
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        app.go_to_menu();
        return;
    }
    let Some(state) = app.quiz.as_ref().map(|q| q.state().clone()) else {
        return;
    };

    match state {
        ModeState::Flashcard(card) => match (card, key.code) {
            (_, KeyCode::Char(' ') | KeyCode::Enter) => app.quiz_action(QuizAction::Reveal),
            (FlashcardState::Revealed, KeyCode::Char('m') | KeyCode::Left) => {
                app.quiz_action(QuizAction::Missed)
            }
            (FlashcardState::Revealed, KeyCode::Char('g') | KeyCode::Right) => {
                app.quiz_action(QuizAction::GotIt)
            }
            _ => {}
        },
        ModeState::Typed(_) => match key.code {
            KeyCode::Enter => app.submit_typed(),
            KeyCode::Backspace => app.backspace(),
            KeyCode::Char(ch) => app.type_char(ch),
            _ => {}
        },
        ModeState::Choice(choice) => match key.code {
            KeyCode::Char(ch @ '1'..='9') => {
                let index = ch as usize - '1' as usize;
                app.quiz_action(QuizAction::Select(index));
            }
            KeyCode::Enter | KeyCode::Char(' ')
                if matches!(choice, ChoiceState::Resolved { .. }) =>
            {
                app.quiz_action(QuizAction::Next)
            }
            _ => {}
        },
        ModeState::Match(_) => match key.code {
            KeyCode::Up | KeyCode::Char('k') => app.match_cursor.up(),
            KeyCode::Down | KeyCode::Char('j') => {
                let rows = app.match_rows();
                app.match_cursor.down(rows);
            }
            KeyCode::Tab | KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
                app.match_cursor.switch_column()
            }
            KeyCode::Enter | KeyCode::Char(' ') => app.match_select(),
            _ => {}
        },
    }
}

fn handle_result_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => app.retry_missed(),
        KeyCode::Char('n') | KeyCode::Enter => app.restart(),
        KeyCode::Char('q') | KeyCode::Esc => app.go_to_menu(),
        _ => {}
    }
}

fn handle_stats_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Tab | KeyCode::Char('s') => app.cycle_stats_sort(),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
        _ => {}
    }
}

fn handle_browse_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Char('1') | KeyCode::Char('w') => app.sort_browse(BrowseColumn::Source),
        KeyCode::Char('2') | KeyCode::Char('t') => app.sort_browse(BrowseColumn::Target),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let layout = AppLayout::new(area);
    render_header(frame, app, layout.header);

    match app.screen {
        AppScreen::Lists => {
            let picker = ListPicker::new(&app.catalog, &app.store, app.list_selected, app.theme);
            frame.render_widget(picker, ui::layout::centered_rect(60, 90, layout.main));
        }
        AppScreen::Menu => {
            frame.render_widget(&app.menu, ui::layout::centered_rect(50, 90, layout.main));
        }
        AppScreen::Quiz => render_quiz(frame, app, layout.main),
        AppScreen::Results => {
            if let Some(quiz) = &app.quiz {
                let summary = quiz.summary();
                let dashboard = Dashboard::new(&summary, quiz.mode(), app.theme);
                frame.render_widget(dashboard, ui::layout::centered_rect(60, 80, layout.main));
            }
        }
        AppScreen::Stats => {
            let rows = app.word_stats();
            let table = StatsTable::new(&rows, app.stats_sort, app.scroll, app.theme);
            frame.render_widget(table, layout.main);
        }
        AppScreen::Browse => {
            let pairs = app.browse_pairs();
            let table = BrowseTable::new(&pairs, app.browse_sort, app.scroll, app.theme);
            frame.render_widget(table, layout.main);
        }
    }

    render_footer(frame, app, layout.footer);
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let colors = &app.theme.colors;
    let context = match &app.list {
        Some(list) if app.screen != AppScreen::Lists => format!(" {} / {}", list.subject, list.name),
        _ => String::new(),
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " wordrill ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            context,
            Style::default()
                .fg(colors.text_pending())
                .bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let colors = &app.theme.colors;
    let footer = match &app.notice {
        Some(notice) => Line::from(Span::styled(
            format!(" {notice} "),
            Style::default().fg(colors.warning()),
        )),
        None => {
            let hints = match app.screen {
                AppScreen::Lists => " [\u{2191}\u{2193}] Select  [Enter] Open  [q] Quit ",
                AppScreen::Menu => " [1-5] Start  [s] Stats  [b] Browse  [Esc] Lists ",
                AppScreen::Quiz => app.quiz.as_ref().map_or("", quiz_view::hints),
                AppScreen::Results => "",
                AppScreen::Stats => " [Tab] Sort  [\u{2191}\u{2193}] Scroll  [Esc] Back ",
                AppScreen::Browse => {
                    " [w] Sort by word  [t] Sort by translation  [\u{2191}\u{2193}] Scroll  [Esc] Back "
                }
            };
            Line::from(Span::styled(hints, Style::default().fg(colors.text_pending())))
        }
    };
    frame.render_widget(Paragraph::new(footer), area);
}

fn render_quiz(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let Some(quiz) = &app.quiz else {
        return;
    };

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(3)])
        .split(area);

    match quiz.state() {
        ModeState::Match(board) => {
            let view = MatchBoard::new(board, app.match_cursor, app.theme);
            frame.render_widget(view, main_layout[0]);
        }
        _ => {
            let view = QuizView::new(quiz, &app.input, app.theme);
            frame.render_widget(view, ui::layout::centered_rect(70, 100, main_layout[0]));
        }
    }

    let (done, total) = quiz.position();
    let label = if quiz.mode() == QuizMode::Match {
        "Matched"
    } else {
        "Progress"
    };
    frame.render_widget(ProgressBar::new(label, done, total, app.theme), main_layout[1]);
}
