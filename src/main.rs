// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use tally_board::{Config, Database, Session, VERSION};

fn main() -> Result<()> {
    let config = Config::from_env();

    if let Some(parent) = config.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating data directory {}", parent.display()))?;
    }

    init_logging(&config)?;
    info!(version = VERSION, db = %config.db_path.display(), "Starting tally board");

    let db = Database::open(&config.db_path)
        .with_context(|| format!("opening {}", config.db_path.display()))?;
    let session = Session::load(db);

    run_ui_mode(session)
}

/// The terminal belongs to the board, so logs go to a file
fn init_logging(config: &Config) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
        .with_context(|| format!("opening log file {}", config.log_path.display()))?;

    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(session: Session) -> Result<()> {
    println!("🚗 Loading Tally Board v{}...\n", VERSION);

    let mut app = ui::App::new(session);
    ui::run_ui(&mut app)?;

    println!("\n✅ Board closed, counts saved");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_session: Session) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    std::process::exit(1);
}
