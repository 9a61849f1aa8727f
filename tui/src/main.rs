//! OpenCode Workshop Entry Point
//!
//! Shows the workshop guide, the quick reference cards and the golden
//! retriever in the terminal.
//!
//! Usage:
//!   workshop [OPTIONS]
//!
//! Logs go to `$XDG_CACHE_HOME/opencode-workshop/workshop.log`, filtered by
//! `RUST_LOG` (default `warn`), since stdout belongs to the alternate screen.

use std::fs::{self, OpenOptions};
use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use workshop_core::config::{default_config_path, load_config_from_path};
use workshop_core::{ConfigOverrides, MoodState};
use workshop_tui::guide::load_guide;
use workshop_tui::App;

/// OpenCode Workshop - learn to vibe code with AI, in your terminal
#[derive(Parser, Debug)]
#[command(name = "workshop")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Markdown guide to show in the Workshop Guide tab
    #[arg(short = 'g', long, value_name = "FILE")]
    guide: Option<PathBuf>,

    /// Pin the mascot's mood (idle, happy, excited, sleeping, thinking, love)
    #[arg(short = 'm', long, value_name = "MOOD")]
    mood: Option<MoodState>,

    /// Frames per second
    #[arg(long, value_name = "FPS")]
    fps: Option<u32>,

    /// Start with the speech bubble hidden
    #[arg(long)]
    quiet: bool,

    /// Turn off confetti
    #[arg(long)]
    no_confetti: bool,

    /// Configuration file path
    #[arg(short = 'c', long, env = "WORKSHOP_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Args {
    /// Command line values that sit on top of file and environment
    fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides::new();
        if let Some(guide) = &self.guide {
            overrides = overrides.with_guide_path(guide.clone());
        }
        if let Some(mood) = self.mood {
            overrides = overrides.with_mood(mood);
        }
        if let Some(fps) = self.fps {
            overrides = overrides.with_fps(fps);
        }
        if self.quiet {
            overrides = overrides.with_speech(false);
        }
        if self.no_confetti {
            overrides = overrides.with_confetti(false);
        }
        overrides
    }
}

/// Send tracing output to a file in the cache directory
///
/// Logging is best-effort: without a writable cache directory the
/// workshop simply runs silent.
fn init_logging() {
    let Some(dir) = dirs::cache_dir().map(|d| d.join("opencode-workshop")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("workshop.log"))
    else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging();

    let config_path = args.config.clone().or_else(default_config_path);
    let mut config =
        load_config_from_path(config_path.as_deref()).context("failed to load configuration")?;
    args.overrides().apply(&mut config);
    config.validate().context("invalid configuration")?;
    tracing::info!(source = ?config.source(), guide = %config.guide_path.display(), "configuration resolved");

    // A missing guide is reported before the terminal changes mode
    let guide = load_guide(&config.guide_path)?;

    // Check if we have a TTY before attempting initialization
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: workshop requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means stdin or stdout is piped, or the");
        eprintln!("session is non-interactive (CI, ssh without -t).");
        std::process::exit(1);
    }

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let size = crossterm::terminal::size()?;
    let mut app = App::new(&config, &guide, size);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    // Show goodbye message after the page closes
    if result.is_ok() {
        if let Some(goodbye) = app.goodbye() {
            println!("\n\x1b[33mWorkshop pup:\x1b[0m {}\n", goodbye);
        }
    }

    // Propagate any errors
    result
}
