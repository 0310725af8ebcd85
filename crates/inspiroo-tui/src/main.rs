// INSPIRØØ entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config (defaults copied on first run, env overrides applied)
// 3. Open the database and restore the signed-in user
// 4. Build the analyzer
// 5. Create mpsc channels
// 6. Spawn the app logic task
// 7. Run the TUI until the user quits
// 8. Cleanup on exit

use std::time::Duration;

use inspiroo_core::config;
use inspiroo_core::db;
use inspiroo_llm::analyzer::Analyzer;
use inspiroo_tui::{app, tui};

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("INSPIRØØ starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        model = %config.llm.model,
        credential = config.api_key().is_some(),
        "config loaded"
    );

    let db_path = config
        .resolved_db_path()
        .context("failed to resolve database path")?;
    let db = db::Database::open(&db_path.to_string_lossy()).context("failed to open database")?;
    info!("Database opened at {}", db_path.display());

    let analyzer = Analyzer::from_config(&config);

    let (llm_tx, llm_rx) = mpsc::channel(256);
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let inspiration_every = Duration::from_secs(config.ui.inspiration_tick_secs);
    let mut app_state = app::AppState::new(config, db, analyzer, llm_tx);

    match app::recover_session(&mut app_state) {
        Ok(true) => info!("Signed-in user restored from previous session"),
        Ok(false) => info!("Starting as visitor"),
        Err(e) => {
            // A broken user record should not keep the app from starting.
            error!("Session recovery failed: {e:#}");
        }
    }

    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(llm_rx, cmd_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    if let Err(e) = tui::run(ui_rx, cmd_tx, inspiration_every).await {
        error!("TUI error: {}", e);
    }

    let _ = tokio::time::timeout(Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("INSPIRØØ shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("inspiroo.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("inspiroo_tui=info,inspiroo_llm=info,inspiroo_core=info,warn")
        }))
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
