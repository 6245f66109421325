use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    path::PathBuf,
    sync::Mutex,
    time::Duration,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use typeline::{
    app::{App, AppState},
    app_dirs::AppDirs,
    clock::Clock,
    config::{Config, ConfigStore, FileConfigStore},
    engine::Engine,
    error::{AppError, SessionError},
    metrics::AccuracyPolicy,
    runtime::{ChannelEventSource, Runner, TypingEvent},
    vocabulary::Vocabulary,
};

const TICK_RATE_MS: u64 = 100;
const LOG_FILTER_ENV: &str = "TYPELINE_LOG";

/// timed typing test with live wpm, accuracy and a per-second speed graph
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// number of words to use in test
    #[clap(short = 'w', long)]
    number_of_words: Option<usize>,

    /// number of seconds to run test
    #[clap(short = 's', long)]
    number_of_secs: Option<f64>,

    /// built-in vocabulary to pull words from
    #[clap(short = 'l', long, value_enum)]
    language: Option<BuiltinVocabulary>,

    /// json word list ({"name", "words"}) to pull words from instead
    #[clap(short = 'v', long)]
    vocabulary: Option<PathBuf>,

    /// how accuracy is computed
    #[clap(long, value_enum)]
    accuracy: Option<AccuracyPolicy>,

    /// seed the word selection for a repeatable test
    #[clap(long)]
    seed: Option<u64>,

    /// store the resulting settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum BuiltinVocabulary {
    Common,
    English100,
}

impl Cli {
    /// Layers the flags that were given over the stored settings
    fn apply(&self, mut config: Config) -> Config {
        if let Some(words) = self.number_of_words {
            config.number_of_words = words;
        }
        if let Some(secs) = self.number_of_secs {
            config.number_of_secs = secs;
        }
        if let Some(language) = self.language {
            config.language = language.to_string();
            config.vocabulary = None;
        }
        if let Some(path) = &self.vocabulary {
            config.vocabulary = Some(path.clone());
        }
        if let Some(policy) = self.accuracy {
            config.accuracy_policy = policy;
        }
        config
    }
}

fn load_vocabulary(config: &Config) -> Result<Vocabulary, AppError> {
    match &config.vocabulary {
        Some(path) => Vocabulary::from_file(path),
        None => Vocabulary::builtin(&config.language),
    }
}

fn build_app(config: &Config, seed: Option<u64>) -> Result<App, AppError> {
    let vocabulary = load_vocabulary(config)?;
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Ok(App::new(
        Engine::default(),
        vocabulary,
        config.session_config(),
        rng,
    )?)
}

/// Logs go to a file; the terminal belongs to the tui.
fn init_logging() -> Result<PathBuf, AppError> {
    let path = AppDirs::log_path()
        .ok_or_else(|| AppError::LoggingInit("no state directory available".to_string()))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| AppError::LoggingInit(e.to_string()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| AppError::LoggingInit(e.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| AppError::LoggingInit(e.to_string()))?;

    Ok(path)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Err(err) = init_logging() {
        eprintln!("typeline: continuing without logs: {err}");
    }

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "saved settings");
    }

    // bad settings are reported before the terminal is taken over
    let mut app = build_app(&config, cli.seed)?;

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    result
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(ChannelEventSource::terminal(), Duration::from_millis(TICK_RATE_MS));

    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        match runner.step() {
            TypingEvent::Tick => app.on_tick()?,
            TypingEvent::Resize => {}
            TypingEvent::Key(key) => {
                if handle_key(app, key)? == Flow::Quit {
                    info!("quit requested");
                    break;
                }
            }
        }
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    Ok(())
}

fn handle_key<C: Clock>(app: &mut App<C>, key: KeyEvent) -> Result<Flow, SessionError> {
    match key.code {
        KeyCode::Esc => return Ok(Flow::Quit),
        // ctrl+c to quit
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Ok(Flow::Quit)
        }
        KeyCode::Tab => app.restart()?,
        KeyCode::Backspace => app.backspace()?,
        KeyCode::Char('r') if app.state == AppState::Results => app.restart()?,
        KeyCode::Char(c) => app.type_char(c)?,
        _ => {}
    }
    Ok(Flow::Continue)
}
