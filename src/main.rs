mod app;
mod domain;
mod input;
mod persistence;
mod report;
mod ui;

use app::AppState;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{Clock, SystemClock};
use persistence::{
    atomic_write, ensure_data_dir, init_local_data_dir, load_config, load_metadata, Config,
    SqliteStore, CONFIG_FILE_NAME, LOG_FILE_NAME, META_FILE_NAME,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the configured log filter
const LOG_ENV_VAR: &str = "CHECKLIST_LOG";

#[derive(Parser)]
#[command(name = "checklist")]
#[command(about = "A terminal checklist with per-item time tracking and a global pause", long_about = None)]
struct Cli {
    /// Use this data directory instead of a local .checklist or ~/.checklist
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .checklist directory in the current directory
    Init,
    /// Write a markdown summary of every task
    Report {
        /// Output file path. Prints to stdout when omitted.
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let cwd = std::env::current_dir().context("Could not determine current directory")?;
            let dir = init_local_data_dir(&cwd)?;
            let config = serde_json::to_string_pretty(&Config::default())?;
            atomic_write(dir.join(CONFIG_FILE_NAME), &config)?;

            println!("Initialized checklist directory: {}", dir.display());
            println!();
            println!("Run 'checklist' from here to use it.");
            Ok(())
        }
        Some(Commands::Report { output }) => {
            let dir = ensure_data_dir(cli.data_dir.as_deref())?;
            let config = load_config(dir.join(CONFIG_FILE_NAME))?;
            init_logging(&dir, &config)?;

            let store = open_store(&dir, &config)?;
            let pause = load_metadata(dir.join(META_FILE_NAME))?.pause_state();
            let content = report::generate_report(&store, &pause, SystemClock.now())?;

            match output {
                Some(path) => {
                    atomic_write(&path, &content)?;
                    info!(%path, "report written");
                    println!("Report generated: {}", path);
                }
                None => print!("{}", content),
            }
            Ok(())
        }
        None => run_tui(cli.data_dir.as_deref()),
    }
}

/// Send tracing output to checklist.log in the data directory
fn init_logging(dir: &Path, config: &Config) -> Result<()> {
    let filter = match EnvFilter::try_from_env(LOG_ENV_VAR) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("Invalid log_level in config: {}", config.log_level))?,
    };

    let log_path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

fn open_store(dir: &Path, config: &Config) -> Result<SqliteStore> {
    let db_path = dir.join(&config.db_file);
    SqliteStore::open(&db_path)
        .with_context(|| format!("Failed to open database: {}", db_path.display()))
}

fn run_tui(data_dir: Option<&Path>) -> Result<()> {
    let dir = ensure_data_dir(data_dir)?;
    let config = load_config(dir.join(CONFIG_FILE_NAME))?;
    init_logging(&dir, &config)?;

    eprintln!("Using checklist directory: {}", dir.display());
    info!(dir = %dir.display(), "starting");

    let store = open_store(&dir, &config)?;
    let meta_path = dir.join(META_FILE_NAME);
    let pause = load_metadata(&meta_path)?.pause_state();

    let mut app = AppState::load(Box::new(store), Box::new(SystemClock), pause, Some(meta_path))
        .context("Stored checklist data is malformed")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.shutdown();
    info!("exiting");

    if let Err(err) = result {
        error!(error = %err, "event loop failed");
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    config: &Config,
) -> Result<()> {
    let tick_rate = config.tick_duration();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Running timers are derived from the clock, so a timeout only redraws
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key) {
                    return Ok(());
                }
            }
        }
    }
}
