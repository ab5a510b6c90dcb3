use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::errors::AppError;
use crate::generation::composer::{ContentComposer, LlmComposer};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    // Handlers read settings through `composer`; kept for handlers that need raw config
    #[allow(dead_code)]
    pub config: Config,
    /// Composer built from the configured API key. `None` when no key is configured.
    pub composer: Option<Arc<dyn ContentComposer>>,
}

impl AppState {
    /// Composer for one request: a caller-supplied key wins over the configured one.
    pub fn composer_for(&self, api_key: Option<&str>) -> Result<Arc<dyn ContentComposer>, AppError> {
        match api_key.map(str::trim).filter(|k| !k.is_empty()) {
            Some(key) => Ok(Arc::new(LlmComposer::from_api_key(key)?)),
            None => self.composer.clone().ok_or_else(|| {
                AppError::Configuration(
                    "LLM API key not configured. Provide apiKey in the request body or set OPENAI_API_KEY."
                        .to_string(),
                )
            }),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::lazy_state;
    use super::*;

    #[tokio::test]
    async fn test_missing_key_is_a_configuration_error() {
        let state = lazy_state(None);
        assert!(matches!(
            state.composer_for(None),
            Err(AppError::Configuration(_))
        ));
        assert!(matches!(
            state.composer_for(Some("   ")),
            Err(AppError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_state_keeps_loaded_config() {
        let state = lazy_state(None).clone();
        assert_eq!(state.config.port, 0);
        assert!(state.config.openai_api_key.is_none());
    }

    #[tokio::test]
    async fn test_request_key_builds_a_composer() {
        let state = lazy_state(None);
        assert!(state.composer_for(Some("sk-test")).is_ok());
    }
}
