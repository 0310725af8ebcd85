// Idea analysis domain types: modes, requests, the structured result returned
// by the generative service, and the error taxonomy for a failed analysis.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of creative paths the result schema demands.
pub const CREATIVE_PATH_COUNT: usize = 3;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("idea text is blank")]
    BlankIdea,

    #[error("API key is not configured")]
    MissingCredential,

    #[error("generative service failed: {message}")]
    UpstreamFailure { message: String },

    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },
}

impl AnalysisError {
    /// True only for the missing-credential case, which gets its own hint.
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, AnalysisError::MissingCredential)
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        AnalysisError::MalformedResponse {
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// AnalysisMode
// ---------------------------------------------------------------------------

/// The lens through which an idea is analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisMode {
    /// Clarity for the author.
    Personal,
    /// Shared vision for partners.
    Partners,
    /// Market potential.
    #[default]
    Startup,
}

impl AnalysisMode {
    pub const ALL: [AnalysisMode; 3] = [
        AnalysisMode::Personal,
        AnalysisMode::Partners,
        AnalysisMode::Startup,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AnalysisMode::Personal => "Pra Mim",
            AnalysisMode::Partners => "Pros Sócios",
            AnalysisMode::Startup => "Startup",
        }
    }

    pub fn tagline(self) -> &'static str {
        match self {
            AnalysisMode::Personal => "clareza mental",
            AnalysisMode::Partners => "visão compartilhada",
            AnalysisMode::Startup => "potencial de mercado",
        }
    }

    /// Next mode in display order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            AnalysisMode::Personal => AnalysisMode::Partners,
            AnalysisMode::Partners => AnalysisMode::Startup,
            AnalysisMode::Startup => AnalysisMode::Personal,
        }
    }

    /// Previous mode in display order, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            AnalysisMode::Personal => AnalysisMode::Startup,
            AnalysisMode::Partners => AnalysisMode::Personal,
            AnalysisMode::Startup => AnalysisMode::Partners,
        }
    }
}

// ---------------------------------------------------------------------------
// AnalysisRequest
// ---------------------------------------------------------------------------

/// A validated submission: non-blank idea text plus the chosen mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    raw_idea: String,
    mode: AnalysisMode,
}

impl AnalysisRequest {
    /// Build a request, rejecting blank idea text. Surrounding whitespace is
    /// trimmed.
    pub fn new(raw_idea: &str, mode: AnalysisMode) -> Result<Self, AnalysisError> {
        let trimmed = raw_idea.trim();
        if trimmed.is_empty() {
            return Err(AnalysisError::BlankIdea);
        }
        Ok(AnalysisRequest {
            raw_idea: trimmed.to_string(),
            mode,
        })
    }

    pub fn raw_idea(&self) -> &str {
        &self.raw_idea
    }

    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }
}

// ---------------------------------------------------------------------------
// AnalysisResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredIdea {
    pub title: String,
    pub one_liner: String,
    pub value_prop: String,
    pub problem: String,
    pub target_audience: String,
    pub why_now: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartupEvolution {
    pub pitch_30s: String,
    pub pitch_140_char: String,
    pub first_feature: String,
    pub business_models: Vec<String>,
    pub validation_steps: Vec<String>,
}

/// The structured analysis returned by the generative service.
///
/// Never construct one from upstream text without going through
/// [`AnalysisResult::from_json`], which runs [`AnalysisResult::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub spark_translation: String,
    pub structure: StructuredIdea,
    pub creative_paths: Vec<String>,
    pub startup_evolution: StartupEvolution,
    pub smart_connections: Vec<String>,
    pub hook_message: String,
}

impl AnalysisResult {
    /// Parse upstream JSON text and validate it against the result schema.
    pub fn from_json(text: &str) -> Result<Self, AnalysisError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AnalysisError::malformed("no text returned"));
        }
        let result: AnalysisResult = serde_json::from_str(trimmed)
            .map_err(|e| AnalysisError::malformed(format!("invalid JSON: {e}")))?;
        result.validate()?;
        Ok(result)
    }

    /// Structural validation beyond what deserialization guarantees.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let s = &self.structure;
        let e = &self.startup_evolution;
        let required: &[(&str, &str)] = &[
            ("spark_translation", &self.spark_translation),
            ("structure.title", &s.title),
            ("structure.one_liner", &s.one_liner),
            ("structure.value_prop", &s.value_prop),
            ("structure.problem", &s.problem),
            ("structure.target_audience", &s.target_audience),
            ("structure.why_now", &s.why_now),
            ("startup_evolution.pitch_30s", &e.pitch_30s),
            ("startup_evolution.pitch_140_char", &e.pitch_140_char),
            ("startup_evolution.first_feature", &e.first_feature),
            ("hook_message", &self.hook_message),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(AnalysisError::malformed(format!("`{field}` is blank")));
            }
        }

        if self.creative_paths.len() != CREATIVE_PATH_COUNT {
            return Err(AnalysisError::malformed(format!(
                "`creative_paths` must have exactly {CREATIVE_PATH_COUNT} entries, got {}",
                self.creative_paths.len()
            )));
        }
        if let Some(idx) = self.creative_paths.iter().position(|p| p.trim().is_empty()) {
            return Err(AnalysisError::malformed(format!(
                "`creative_paths[{idx}]` is blank"
            )));
        }

        if e.validation_steps.is_empty() {
            return Err(AnalysisError::malformed(
                "`startup_evolution.validation_steps` must not be empty",
            ));
        }

        Ok(())
    }

    /// "Title: one-liner", the condensed concept used for community sparks.
    pub fn concept_line(&self) -> String {
        format!("{}: {}", self.structure.title, self.structure.one_liner)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
