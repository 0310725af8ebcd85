// Analysis orchestrator: validates the idea, builds the mode-specific
// instruction, calls the backend once, and turns the returned text into a
// validated `AnalysisResult`.

use std::sync::Arc;

use inspiroo_core::analysis::{AnalysisError, AnalysisMode, AnalysisRequest, AnalysisResult};
use inspiroo_core::config::Config;
use tracing::{info, warn};

use crate::client::{GenerativeBackend, LlmClient};
use crate::prompt;

/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct Analyzer {
    backend: Arc<dyn GenerativeBackend>,
}

impl Analyzer {
    pub fn new(backend: Arc<dyn GenerativeBackend>) -> Self {
        Self { backend }
    }

    /// Analyzer over the Gemini client, or over a disabled client that fails
    /// every call with `MissingCredential` when no key is configured.
    pub fn from_config(config: &Config) -> Self {
        let client = LlmClient::from_config(config);
        if !client.is_enabled() {
            warn!("no API key configured; analyses will fail until one is provided");
        }
        Self::new(Arc::new(client))
    }

    pub async fn analyze(
        &self,
        raw_idea: &str,
        mode: AnalysisMode,
    ) -> Result<AnalysisResult, AnalysisError> {
        self.analyze_with_progress(raw_idea, mode, |_| {}).await
    }

    /// Like [`analyze`](Self::analyze), reporting each streamed fragment to
    /// `on_chunk` as it arrives.
    pub async fn analyze_with_progress<F>(
        &self,
        raw_idea: &str,
        mode: AnalysisMode,
        mut on_chunk: F,
    ) -> Result<AnalysisResult, AnalysisError>
    where
        F: FnMut(&str) + Send,
    {
        let request = AnalysisRequest::new(raw_idea, mode)?;
        self.run(&request, &mut on_chunk).await
    }

    /// Run an already-validated request.
    pub async fn run(
        &self,
        request: &AnalysisRequest,
        on_chunk: &mut (dyn for<'c> FnMut(&'c str) + Send),
    ) -> Result<AnalysisResult, AnalysisError> {
        let mode = request.mode();
        info!(?mode, idea_chars = request.raw_idea().chars().count(), "analysis started");

        let system = prompt::system_instruction(mode);
        let schema = prompt::response_schema();

        let text = self
            .backend
            .generate(&system, request.raw_idea(), &schema, on_chunk)
            .await
            .inspect_err(|e| warn!(error = %e, "generation failed"))?;

        let result = AnalysisResult::from_json(&text)
            .inspect_err(|e| warn!(error = %e, chars = text.len(), "rejected generated payload"))?;

        info!(title = %result.structure.title, "analysis complete");
        Ok(result)
    }
}
