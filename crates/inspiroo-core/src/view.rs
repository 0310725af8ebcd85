// View state machine: Idle -> Thinking -> Result | Error, reset back to Idle.
//
// The machine is the single authority on whether a submission may start.
// While a request is outstanding (Thinking) every submit is rejected, which
// is what serializes analyses: there is never more than one in flight.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::{AnalysisError, AnalysisMode, AnalysisRequest, AnalysisResult};

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

/// What the error panel needs to know about a failed analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub message: String,
    /// True iff the failure was a missing API credential.
    pub api_key_missing: bool,
}

impl From<&AnalysisError> for ErrorInfo {
    fn from(err: &AnalysisError) -> Self {
        ErrorInfo {
            message: err.to_string(),
            api_key_missing: err.is_missing_credential(),
        }
    }
}

/// Fieldless discriminant of [`ViewState`], used for display and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Thinking,
    Result,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("an analysis is already in flight")]
    AlreadyThinking,

    #[error("an analysis is in flight and cannot be cancelled")]
    CannotCancel,

    #[error("cannot submit from {from:?}; reset first")]
    NotIdle { from: Phase },

    #[error("no analysis in flight (state is {from:?})")]
    NotThinking { from: Phase },
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Thinking {
        mode: AnalysisMode,
    },
    Result(Box<AnalysisResult>),
    Error(ErrorInfo),
}

impl ViewState {
    pub fn new() -> Self {
        ViewState::Idle
    }

    pub fn phase(&self) -> Phase {
        match self {
            ViewState::Idle => Phase::Idle,
            ViewState::Thinking { .. } => Phase::Thinking,
            ViewState::Result(_) => Phase::Result,
            ViewState::Error(_) => Phase::Error,
        }
    }

    pub fn is_thinking(&self) -> bool {
        matches!(self, ViewState::Thinking { .. })
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            ViewState::Result(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            ViewState::Error(info) => Some(info),
            _ => None,
        }
    }

    /// `Idle -> Thinking`. Rejected (state untouched) from any other state.
    pub fn submit(&mut self, request: &AnalysisRequest) -> Result<(), TransitionError> {
        match self {
            ViewState::Idle => {
                *self = ViewState::Thinking {
                    mode: request.mode(),
                };
                Ok(())
            }
            ViewState::Thinking { .. } => Err(TransitionError::AlreadyThinking),
            other => Err(TransitionError::NotIdle {
                from: other.phase(),
            }),
        }
    }

    /// `Thinking -> Result`.
    pub fn succeed(&mut self, result: AnalysisResult) -> Result<(), TransitionError> {
        self.require_thinking()?;
        *self = ViewState::Result(Box::new(result));
        Ok(())
    }

    /// `Thinking -> Error`.
    pub fn fail(&mut self, err: &AnalysisError) -> Result<(), TransitionError> {
        self.require_thinking()?;
        *self = ViewState::Error(ErrorInfo::from(err));
        Ok(())
    }

    /// Route an orchestrator outcome to `succeed` or `fail`.
    pub fn complete(
        &mut self,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> Result<(), TransitionError> {
        match outcome {
            Ok(result) => self.succeed(result),
            Err(err) => self.fail(&err),
        }
    }

    /// `Result | Error -> Idle`, dropping any result. A no-op from `Idle`;
    /// rejected from `Thinking` since in-flight requests cannot be cancelled.
    pub fn reset(&mut self) -> Result<(), TransitionError> {
        match self {
            ViewState::Thinking { .. } => Err(TransitionError::CannotCancel),
            _ => {
                *self = ViewState::Idle;
                Ok(())
            }
        }
    }

    fn require_thinking(&self) -> Result<(), TransitionError> {
        if self.is_thinking() {
            Ok(())
        } else {
            Err(TransitionError::NotThinking { from: self.phase() })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
