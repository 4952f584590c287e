mod ui;

use clap::Parser;
use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{error::Error, io, time::Duration};

use vype::config::{Config, ConfigStore, FileConfigStore, DURATIONS};
use vype::corpus::Corpus;
use vype::runtime::{AppEvent, EventSource, Runner, TerminalEventSource};
use vype::session::{Session, SessionParams, TestMode};
use vype::TICK_RATE_MS;

/// arcade typing tui where the results screen always loves you
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A typing test with real per-letter feedback and a results screen that reports whatever keeps you coming back. Real statistics are computed internally and never shown."
)]
pub struct Cli {
    /// test mode
    #[clap(short = 'm', long, value_enum)]
    mode: Option<TestMode>,

    /// countdown length for time mode
    #[clap(short = 's', long, value_parser = parse_duration)]
    seconds: Option<u64>,

    /// number of words for words mode
    #[clap(short = 'w', long)]
    number_of_words: Option<usize>,
}

fn parse_duration(arg: &str) -> Result<u64, String> {
    let secs: u64 = arg
        .parse()
        .map_err(|_| format!("`{arg}` is not a number of seconds"))?;
    if DURATIONS.contains(&secs) {
        Ok(secs)
    } else {
        Err(format!("duration must be one of {DURATIONS:?}"))
    }
}

impl Cli {
    /// CLI flags override the stored config; anything unset falls back.
    fn resolve(&self, cfg: &Config) -> SessionParams {
        SessionParams {
            mode: self.mode.unwrap_or(cfg.mode),
            duration_secs: self.seconds.unwrap_or(cfg.duration_secs),
            number_of_words: self.number_of_words.unwrap_or(cfg.number_of_words),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Typing,
    Results,
}

pub struct App {
    pub session: Session,
    pub screen: Screen,
}

impl App {
    pub fn new(params: SessionParams) -> Self {
        Self {
            session: Session::new(params, Corpus::new("english")),
            screen: Screen::Typing,
        }
    }

    pub fn on_tick(&mut self) {
        self.session.on_tick();
        if self.session.is_done() {
            self.screen = Screen::Results;
        }
    }

    /// Handle one key press; returns false when the app should exit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        match self.screen {
            Screen::Typing => match (key.code, key.modifiers) {
                (KeyCode::Esc, _) => return false,
                (KeyCode::Char('c'), KeyModifiers::CONTROL) => return false,
                (KeyCode::Char('e'), KeyModifiers::CONTROL) => self.session.finish(),
                (KeyCode::Tab, _) => self.session.restart(),
                (KeyCode::Backspace, _) => self.session.backspace(),
                (KeyCode::Char(' '), m) if char_mods(m) => self.session.commit_space(),
                (KeyCode::Char(c), m) if char_mods(m) => self.session.type_char(c),
                _ => {}
            },
            Screen::Results => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => return false,
                KeyCode::Char('r') | KeyCode::Tab => {
                    self.session.restart();
                    self.screen = Screen::Typing;
                }
                _ => {}
            },
        }
        if self.session.is_done() {
            self.screen = Screen::Results;
        }
        true
    }
}

/// Plain typing input: no modifiers, or just shift.
fn char_mods(m: KeyModifiers) -> bool {
    m.is_empty() || m == KeyModifiers::SHIFT
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let store = FileConfigStore::new();
    let params = cli.resolve(&store.load());
    let mut app = App::new(params);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        TerminalEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );
    let res = run_app(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let _ = store.save(&Config::from(&app.session.params));
    res
}

fn run_app<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                if !app.on_key(key) {
                    break;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vype::session::Status;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn words_app(n: usize) -> App {
        App::new(SessionParams {
            mode: TestMode::Words,
            duration_secs: 30,
            number_of_words: n,
        })
    }

    #[test]
    fn cli_defaults_to_config_values() {
        let cli = Cli::parse_from(["vype"]);
        let cfg = Config::default();
        let params = cli.resolve(&cfg);
        assert_eq!(params.mode, cfg.mode);
        assert_eq!(params.duration_secs, cfg.duration_secs);
        assert_eq!(params.number_of_words, cfg.number_of_words);
    }

    #[test]
    fn cli_flags_override_config() {
        let cli = Cli::parse_from(["vype", "-m", "words", "-w", "50", "-s", "60"]);
        let params = cli.resolve(&Config::default());
        assert_eq!(params.mode, TestMode::Words);
        assert_eq!(params.number_of_words, 50);
        assert_eq!(params.duration_secs, 60);
    }

    #[test]
    fn cli_rejects_unsupported_duration() {
        assert!(Cli::try_parse_from(["vype", "-s", "45"]).is_err());
        assert!(Cli::try_parse_from(["vype", "-s", "120"]).is_ok());
    }

    #[test]
    fn typing_keys_reach_the_session() {
        let mut app = words_app(3);
        assert!(app.on_key(key(KeyCode::Char('a'))));
        assert_eq!(app.session.status, Status::Running);
        assert_eq!(app.session.cursor.letter, 1);

        assert!(app.on_key(key(KeyCode::Backspace)));
        assert_eq!(app.session.cursor.letter, 0);
    }

    #[test]
    fn esc_exits_from_typing() {
        let mut app = words_app(3);
        assert!(!app.on_key(key(KeyCode::Esc)));
    }

    #[test]
    fn ctrl_e_finishes_and_shows_results() {
        let mut app = words_app(3);
        app.on_key(key(KeyCode::Char('a')));
        app.on_key(KeyEvent::new(KeyCode::Char('e'), KeyModifiers::CONTROL));
        assert_eq!(app.session.status, Status::Done);
        assert_eq!(app.screen, Screen::Results);
    }

    #[test]
    fn ctrl_modified_chars_are_not_typed() {
        let mut app = words_app(3);
        app.on_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL));
        assert_eq!(app.session.status, Status::Idle);
        assert_eq!(app.session.cursor.letter, 0);
    }

    #[test]
    fn tab_restarts_mid_test() {
        let mut app = words_app(3);
        app.on_key(key(KeyCode::Char('a')));
        app.on_key(key(KeyCode::Tab));
        assert_eq!(app.session.status, Status::Idle);
        assert!(app.session.keystrokes.is_empty());
    }

    #[test]
    fn results_screen_retry_goes_back_to_typing() {
        let mut app = words_app(3);
        app.on_key(key(KeyCode::Char('a')));
        app.on_key(KeyEvent::new(KeyCode::Char('e'), KeyModifiers::CONTROL));
        assert_eq!(app.screen, Screen::Results);

        assert!(app.on_key(key(KeyCode::Char('r'))));
        assert_eq!(app.screen, Screen::Typing);
        assert_eq!(app.session.status, Status::Idle);

        // and q quits from results
        app.on_key(key(KeyCode::Char('a')));
        app.on_key(KeyEvent::new(KeyCode::Char('e'), KeyModifiers::CONTROL));
        assert!(!app.on_key(key(KeyCode::Char('q'))));
    }
}
