// Application state and orchestration logic.
//
// The central event loop that coordinates user commands from the TUI,
// progress and outcome events from the analysis task, and the online counter
// tick. Owns every piece of mutable state and pushes UI updates to the TUI
// render loop.

use std::time::Duration;

use inspiroo_core::analysis::{AnalysisError, AnalysisMode, AnalysisRequest};
use inspiroo_core::checklist::Checklist;
use inspiroo_core::community::CommunityFeed;
use inspiroo_core::config::Config;
use inspiroo_core::db::Database;
use inspiroo_core::identity::User;
use inspiroo_core::presence;
use inspiroo_core::protocol::{AppSnapshot, LlmEvent, Notice, UiUpdate, UserCommand};
use inspiroo_core::view::{TransitionError, ViewState};
use inspiroo_llm::analyzer::Analyzer;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Status line shown after a spark is shared.
pub const SPARK_SAVED_NOTICE: &str = "★ IDEIA COLADA NO MURAL!";

/// Status line shown when the idea box is submitted empty.
pub const BLANK_IDEA_NOTICE: &str = "Escreva sua ideia antes de enviar.";

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub config: Config,
    pub view: ViewState,
    /// Next steps ticked for the current result. Cleared on every new
    /// submission and on reset.
    pub checklist: Checklist,
    pub feed: CommunityFeed,
    pub user: Option<User>,
    pub db: Database,
    pub analyzer: Analyzer,
    pub online_count: u32,
    online_tick: u64,
    /// Characters streamed so far for the in-flight analysis.
    pub streamed_chars: usize,
    pub current_task: Option<tokio::task::JoinHandle<()>>,
    /// Sender for analysis events; each spawned task uses a clone.
    pub llm_tx: mpsc::Sender<LlmEvent>,
}

impl AppState {
    pub fn new(
        config: Config,
        db: Database,
        analyzer: Analyzer,
        llm_tx: mpsc::Sender<LlmEvent>,
    ) -> Self {
        let online_count = config.ui.online_users_start;
        AppState {
            config,
            view: ViewState::new(),
            checklist: Checklist::new(),
            feed: CommunityFeed::seeded(),
            user: None,
            db,
            analyzer,
            online_count,
            online_tick: 0,
            streamed_chars: 0,
            current_task: None,
            llm_tx,
        }
    }

    /// Build a full snapshot for the TUI.
    pub fn build_snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            view: self.view.clone(),
            checklist: self.checklist.clone(),
            sparks: self.feed.sparks().to_vec(),
            user: self.user.clone(),
        }
    }

    /// Validate and start an analysis. On success the view is `Thinking` and
    /// a task is running; on failure nothing changed.
    pub fn start_analysis(&mut self, idea: &str, mode: AnalysisMode) -> Result<(), StartError> {
        let request = AnalysisRequest::new(idea, mode).map_err(StartError::Rejected)?;
        self.view.submit(&request).map_err(StartError::Transition)?;

        self.checklist.clear();
        self.streamed_chars = 0;

        let analyzer = self.analyzer.clone();
        let tx = self.llm_tx.clone();
        let handle = tokio::spawn(async move {
            let chunk_tx = tx.clone();
            // Progress is cosmetic; chunks are dropped when the channel is full.
            let mut on_chunk = move |text: &str| {
                let _ = chunk_tx.try_send(LlmEvent::Chunk {
                    text: text.to_string(),
                });
            };
            let outcome = analyzer.run(&request, &mut on_chunk).await;
            let _ = tx.send(LlmEvent::Finished(outcome)).await;
        });
        self.current_task = Some(handle);
        Ok(())
    }

    /// Advance the online counter one tick.
    pub fn tick_online(&mut self) -> u32 {
        self.online_tick = self.online_tick.wrapping_add(1);
        self.online_count = presence::drift(self.online_count, self.online_tick);
        self.online_count
    }

    fn abort_task(&mut self) {
        if let Some(handle) = self.current_task.take() {
            handle.abort();
        }
    }
}

/// Why a submission did not start.
#[derive(Debug, Clone, PartialEq)]
pub enum StartError {
    Rejected(AnalysisError),
    Transition(TransitionError),
}

/// Restore the signed-in user from the database.
///
/// Returns `true` when a user was found.
pub fn recover_session(state: &mut AppState) -> anyhow::Result<bool> {
    match state.db.load_user()? {
        Some(user) => {
            info!(user = %user.name, "restored signed-in user");
            state.user = Some(user);
            Ok(true)
        }
        None => Ok(false),
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the main application event loop.
///
/// Listens with `tokio::select!` on:
/// 1. Analysis events from the spawned analysis task
/// 2. User commands from the TUI
/// 3. The online counter interval
///
/// Pushes UI updates through `ui_tx` for the TUI render loop.
pub async fn run(
    mut llm_rx: mpsc::Receiver<LlmEvent>,
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    let _ = ui_tx
        .send(UiUpdate::StateSnapshot(Box::new(state.build_snapshot())))
        .await;
    let _ = ui_tx.send(UiUpdate::OnlineCount(state.online_count)).await;

    let mut llm_open = true;

    let mut online_interval =
        tokio::time::interval(Duration::from_secs(state.config.ui.online_tick_secs));
    // The first tick completes immediately; consume it.
    online_interval.tick().await;

    loop {
        tokio::select! {
            // --- Analysis events (only poll when channel is open) ---
            llm_event = llm_rx.recv(), if llm_open => {
                match llm_event {
                    Some(event) => {
                        handle_llm_event(&mut state, event, &ui_tx).await;
                    }
                    None => {
                        info!("Analysis channel closed");
                        llm_open = false;
                    }
                }
            }

            // --- User commands ---
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut state, cmd, &ui_tx).await;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            // --- Online counter ---
            _ = online_interval.tick() => {
                let count = state.tick_online();
                let _ = ui_tx.send(UiUpdate::OnlineCount(count)).await;
            }
        }
    }

    state.abort_task();
    info!("Application event loop exiting");
    Ok(())
}

async fn send_snapshot(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let _ = ui_tx
        .send(UiUpdate::StateSnapshot(Box::new(state.build_snapshot())))
        .await;
}

/// Handle an event from the analysis task.
async fn handle_llm_event(state: &mut AppState, event: LlmEvent, ui_tx: &mpsc::Sender<UiUpdate>) {
    match event {
        LlmEvent::Chunk { text } => {
            if !state.view.is_thinking() {
                debug!("discarding chunk outside Thinking");
                return;
            }
            state.streamed_chars += text.chars().count();
            let _ = ui_tx
                .send(UiUpdate::Progress {
                    chars: state.streamed_chars,
                })
                .await;
        }
        LlmEvent::Finished(outcome) => {
            state.current_task = None;
            if let Err(e) = &outcome {
                warn!(error = %e, "analysis failed");
            }
            match state.view.complete(outcome) {
                Ok(()) => {
                    info!(phase = ?state.view.phase(), "analysis finished");
                    send_snapshot(state, ui_tx).await;
                }
                Err(e) => warn!(error = %e, "ignoring analysis outcome"),
            }
        }
    }
}

/// Handle a command from the TUI. `Quit` is handled by the loop itself.
async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match cmd {
        UserCommand::Submit { idea, mode } => match state.start_analysis(&idea, mode) {
            Ok(()) => {
                info!(?mode, "analysis submitted");
                send_snapshot(state, ui_tx).await;
            }
            Err(StartError::Rejected(_)) => {
                let _ = ui_tx.send(UiUpdate::Notice(Notice::error(BLANK_IDEA_NOTICE))).await;
            }
            Err(StartError::Transition(TransitionError::AlreadyThinking)) => {
                debug!("submit ignored: analysis already in flight");
            }
            Err(StartError::Transition(e)) => {
                debug!(error = %e, "submit ignored");
            }
        },
        UserCommand::Reset => match state.view.reset() {
            Ok(()) => {
                state.checklist.clear();
                state.streamed_chars = 0;
                send_snapshot(state, ui_tx).await;
            }
            Err(e) => debug!(error = %e, "reset ignored"),
        },
        UserCommand::ToggleStep(idx) => {
            if state.view.result().is_none() {
                return;
            }
            if state.checklist.toggle(idx).is_some() {
                send_snapshot(state, ui_tx).await;
            }
        }
        UserCommand::SaveSpark => {
            let Some(user) = state.user.as_ref() else {
                let _ = ui_tx.send(UiUpdate::SignUpRequired).await;
                return;
            };
            let Some(result) = state.view.result() else {
                debug!("save ignored: no result on screen");
                return;
            };
            if state.feed.has_saved(user, result) {
                debug!("save ignored: result already on the mural");
                return;
            }
            let spark = state.feed.save_result(user, result);
            info!(id = %spark.id, author = %spark.author, "spark shared");
            let _ = ui_tx.send(UiUpdate::Notice(Notice::success(SPARK_SAVED_NOTICE))).await;
            send_snapshot(state, ui_tx).await;
        }
        UserCommand::ToggleLike(id) => {
            if state.user.is_none() {
                let _ = ui_tx.send(UiUpdate::SignUpRequired).await;
                return;
            }
            if state.feed.toggle_like(&id).is_some() {
                send_snapshot(state, ui_tx).await;
            } else {
                warn!(%id, "like on unknown spark");
            }
        }
        UserCommand::Connect(id) => {
            if state.user.is_none() {
                let _ = ui_tx.send(UiUpdate::SignUpRequired).await;
                return;
            }
            match state.feed.connect(&id) {
                Some(message) => {
                    let _ = ui_tx.send(UiUpdate::Notice(Notice::info(message))).await;
                }
                None => warn!(%id, "connect on unknown spark"),
            }
        }
        UserCommand::SignUp(user) => {
            if let Err(e) = state.db.save_user(&user) {
                warn!("failed to persist user: {e:#}");
            }
            info!(user = %user.name, "signed up");
            let greeting = format!("Bem-vindo ao mural, {}!", user.name);
            state.user = Some(user);
            let _ = ui_tx.send(UiUpdate::Notice(Notice::success(greeting))).await;
            send_snapshot(state, ui_tx).await;
        }
        UserCommand::SignOut => {
            if let Err(e) = state.db.clear_user() {
                warn!("failed to clear stored user: {e:#}");
            }
            state.user = None;
            info!("signed out");
            send_snapshot(state, ui_tx).await;
        }
        UserCommand::Quit => {}
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
