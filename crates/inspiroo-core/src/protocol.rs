// Message types exchanged between the app task, the analysis task, and the
// TUI task.

use crate::analysis::{AnalysisError, AnalysisMode, AnalysisResult};
use crate::checklist::Checklist;
use crate::community::CommunitySpark;
use crate::identity::User;
use crate::view::ViewState;

// ---------------------------------------------------------------------------
// TUI -> App
// ---------------------------------------------------------------------------

/// Commands the TUI sends to the app task.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Analyze an idea. Blank text is rejected by the app, not the TUI.
    Submit { idea: String, mode: AnalysisMode },
    /// Leave the result or error screen and start over.
    Reset,
    ToggleStep(usize),
    /// Share the current result to the community feed.
    SaveSpark,
    ToggleLike(String),
    Connect(String),
    SignUp(User),
    SignOut,
    Quit,
}

// ---------------------------------------------------------------------------
// Analysis task -> App
// ---------------------------------------------------------------------------

/// Events emitted by a running analysis. A task sends any number of
/// `Chunk`s followed by exactly one `Finished`.
#[derive(Debug, Clone, PartialEq)]
pub enum LlmEvent {
    Chunk { text: String },
    Finished(Result<AnalysisResult, AnalysisError>),
}

// ---------------------------------------------------------------------------
// App -> TUI
// ---------------------------------------------------------------------------

/// Severity of a one-line status notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Info, text: text.into() }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Error, text: text.into() }
    }
}

/// Everything the TUI needs to redraw after a state change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppSnapshot {
    pub view: ViewState,
    pub checklist: Checklist,
    pub sparks: Vec<CommunitySpark>,
    pub user: Option<User>,
}

/// Updates the app task pushes to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    StateSnapshot(Box<AppSnapshot>),
    /// Total characters streamed so far for the in-flight analysis.
    Progress { chars: usize },
    OnlineCount(u32),
    Notice(Notice),
    /// An anonymous user tried something that needs an account.
    SignUpRequired,
}
