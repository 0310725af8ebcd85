// Terminal UI: layout, input handling, and widget rendering.
//
// The TUI owns a `ScreenState` that mirrors the latest `AppSnapshot` plus
// purely local concerns (the idea being typed, selection cursors, overlays).
// The app orchestrator pushes `UiUpdate` messages over an mpsc channel; the
// TUI applies them and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;

use inspiroo_core::analysis::AnalysisMode;
use inspiroo_core::identity::SignupDraft;
use inspiroo_core::protocol::{AppSnapshot, Notice, UiUpdate, UserCommand};
use inspiroo_core::view::{Phase, ViewState};

use layout::build_layout;

/// How long a status notice stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

/// Modal drawn on top of the main screen. At most one is open.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    SignUp(SignupDraft),
    Profile,
    ConfirmQuit,
}

/// Which panel receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Main,
    Community,
}

// ---------------------------------------------------------------------------
// ScreenState
// ---------------------------------------------------------------------------

/// TUI-local state that mirrors the application state for rendering.
#[derive(Debug, Default)]
pub struct ScreenState {
    pub snapshot: AppSnapshot,
    /// Idea being typed. Kept across Thinking and Error so a failed idea can
    /// be resubmitted; cleared once a result arrives.
    pub idea_text: String,
    pub mode: AnalysisMode,
    pub streamed_chars: usize,
    pub online_count: u32,
    pub notice: Option<Notice>,
    notice_at: Option<Instant>,
    pub overlay: Option<Overlay>,
    /// Validation message shown inside the sign-up overlay.
    pub signup_error: Option<String>,
    pub focus: Focus,
    pub selected_spark: usize,
    pub selected_step: usize,
    pub result_scroll: u16,
    pub inspiration_tick: usize,
    pub frame_tick: usize,
}

impl ScreenState {
    pub fn phase(&self) -> Phase {
        self.snapshot.view.phase()
    }

    pub fn is_signed_in(&self) -> bool {
        self.snapshot.user.is_some()
    }

    /// Replace the mirrored snapshot, resetting cursors that the new state
    /// invalidates.
    pub fn apply_snapshot(&mut self, snapshot: AppSnapshot) {
        let previous = self.phase();
        let next = snapshot.view.phase();

        if next != previous {
            match next {
                Phase::Thinking => self.streamed_chars = 0,
                Phase::Result => {
                    self.idea_text.clear();
                    self.selected_step = 0;
                    self.result_scroll = 0;
                }
                Phase::Idle | Phase::Error => {}
            }
        }
        if let ViewState::Thinking { mode } = snapshot.view {
            self.mode = mode;
        }

        let spark_count = snapshot.sparks.len();
        self.selected_spark = self.selected_spark.min(spark_count.saturating_sub(1));

        // A successful sign-up closes the modal.
        if snapshot.user.is_some() && matches!(self.overlay, Some(Overlay::SignUp(_))) {
            self.overlay = None;
            self.signup_error = None;
        }
        if snapshot.user.is_none() && self.overlay == Some(Overlay::Profile) {
            self.overlay = None;
        }

        self.snapshot = snapshot;
    }

    pub fn show_notice(&mut self, notice: Notice, now: Instant) {
        self.notice = Some(notice);
        self.notice_at = Some(now);
    }

    /// Drop the notice once it has been visible for [`NOTICE_TTL`].
    pub fn expire_notice(&mut self, now: Instant) {
        if let Some(at) = self.notice_at {
            if now.duration_since(at) >= NOTICE_TTL {
                self.notice = None;
                self.notice_at = None;
            }
        }
    }

    /// Open the sign-up flow with a fresh draft.
    pub fn open_sign_up(&mut self) {
        self.overlay = Some(Overlay::SignUp(SignupDraft::new()));
        self.signup_error = None;
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ScreenState.
pub fn apply_ui_update(state: &mut ScreenState, update: UiUpdate) {
    match update {
        UiUpdate::StateSnapshot(snapshot) => state.apply_snapshot(*snapshot),
        UiUpdate::Progress { chars } => state.streamed_chars = chars,
        UiUpdate::OnlineCount(count) => state.online_count = count,
        UiUpdate::Notice(notice) => state.show_notice(notice, Instant::now()),
        UiUpdate::SignUpRequired => {
            if !matches!(state.overlay, Some(Overlay::SignUp(_))) {
                state.open_sign_up();
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete screen.
pub fn render_frame(frame: &mut Frame, state: &ScreenState) {
    let area = frame.area();
    let layout = build_layout(area);

    widgets::status_bar::render(frame, layout.status_bar, state);

    let main_focused = state.focus == Focus::Main;
    match &state.snapshot.view {
        ViewState::Idle => {
            widgets::idea_input::render(frame, layout.main_panel, state, main_focused)
        }
        ViewState::Thinking { mode } => {
            widgets::thinking::render(frame, layout.main_panel, *mode, state)
        }
        ViewState::Result(result) => {
            widgets::analysis::render(frame, layout.main_panel, result, state, main_focused)
        }
        ViewState::Error(info) => widgets::error_panel::render(frame, layout.main_panel, info),
    }

    widgets::community::render(
        frame,
        layout.community,
        state,
        state.focus == Focus::Community,
    );
    widgets::status_bar::render_notice(frame, layout.notice_bar, state.notice.as_ref());
    widgets::status_bar::render_help(frame, layout.help_bar, state);

    match &state.overlay {
        Some(Overlay::SignUp(draft)) => {
            widgets::auth_modal::render(frame, area, draft, state.signup_error.as_deref())
        }
        Some(Overlay::Profile) => {
            if let Some(user) = &state.snapshot.user {
                widgets::profile_card::render(frame, area, user);
            }
        }
        Some(Overlay::ConfirmQuit) => widgets::quit_confirm::render(frame, area),
        None => {}
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook that restores the terminal.
/// 3. Selects over UI updates, keyboard input, the render tick, and the
///    inspiration placeholder tick.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    inspiration_every: Duration,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut screen = ScreenState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let mut inspiration_tick = tokio::time::interval(inspiration_every);
    inspiration_tick.tick().await;

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut screen, ui_update),
                    // Channel closed: app is shutting down
                    None => break,
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut screen) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(_)) | None => {
                        let _ = cmd_tx.send(UserCommand::Quit).await;
                        break;
                    }
                }
            }

            _ = inspiration_tick.tick() => {
                screen.inspiration_tick = screen.inspiration_tick.wrapping_add(1);
            }

            _ = render_tick.tick() => {
                screen.frame_tick = screen.frame_tick.wrapping_add(1);
                screen.expire_notice(Instant::now());
                terminal.draw(|frame| render_frame(frame, &screen))?;
            }
        }
    }

    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
