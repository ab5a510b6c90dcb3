//! Content Composer: pluggable, trait-based source of business analysis and copy.
//!
//! Default: `LlmComposer` (two chat-completion calls).
//! `AppState` holds an `Option<Arc<dyn ContentComposer>>` built from the configured
//! API key; a per-request key builds a fresh `LlmComposer`.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::generation::analysis::{analyze_business, BusinessAnalysis};
use crate::generation::copywriter::{write_copy, GeneratedContent};
use crate::llm_client::LlmClient;

/// Implement this to swap the content source without touching the pipeline or handlers.
#[async_trait]
pub trait ContentComposer: Send + Sync {
    async fn analyze(&self, user_message: &str) -> Result<BusinessAnalysis, AppError>;

    async fn compose(
        &self,
        user_message: &str,
        analysis: &BusinessAnalysis,
    ) -> Result<GeneratedContent, AppError>;
}

pub struct LlmComposer(pub LlmClient);

impl LlmComposer {
    pub fn from_api_key(api_key: &str) -> Result<Self, AppError> {
        let client = LlmClient::new(api_key.to_string())
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build LLM client: {e}")))?;
        Ok(Self(client))
    }
}

#[async_trait]
impl ContentComposer for LlmComposer {
    async fn analyze(&self, user_message: &str) -> Result<BusinessAnalysis, AppError> {
        analyze_business(user_message, &self.0).await
    }

    async fn compose(
        &self,
        user_message: &str,
        analysis: &BusinessAnalysis,
    ) -> Result<GeneratedContent, AppError> {
        write_copy(user_message, analysis, &self.0).await
    }
}
