//! Timed calls into the LLM backend

use crate::error::AnalyzerError;
use newsdesk_domain::{CompletionRequest, LlmProvider};
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

/// Issue one completion, bounded by `limit`
///
/// An elapsed timeout is reported as [`AnalyzerError::Timeout`]; any provider
/// error becomes [`AnalyzerError::Backend`].
pub(crate) async fn call_llm<L: LlmProvider>(
    llm: &L,
    request: &CompletionRequest,
    limit: Duration,
) -> Result<String, AnalyzerError> {
    debug!("Prompt length: {} chars", request.prompt.len());

    let response = timeout(limit, llm.complete(request))
        .await
        .map_err(|_| AnalyzerError::Timeout(limit))?
        .map_err(|e| AnalyzerError::Backend(e.to_string()))?;

    debug!("LLM response length: {} chars", response.len());
    Ok(response)
}
