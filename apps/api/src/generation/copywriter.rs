//! Copywriter: drafts the website copy for an analyzed business.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::analysis::BusinessAnalysis;
use crate::generation::prompts::{COPY_PROMPT_TEMPLATE, COPY_SYSTEM, COPY_TEMPERATURE};
use crate::llm_client::prompts::FIDELITY_INSTRUCTION;
use crate::llm_client::LlmClient;
use crate::models::page::{Contact, Hero};

/// Website copy as returned by the LLM.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub hero: Hero,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub contact: Contact,
}

/// Runs the copy prompt for an analyzed business.
pub async fn write_copy(
    user_message: &str,
    analysis: &BusinessAnalysis,
    llm: &LlmClient,
) -> Result<GeneratedContent, AppError> {
    let prompt = build_copy_prompt(user_message, analysis);

    llm.call_json::<GeneratedContent>(&prompt, COPY_SYSTEM, COPY_TEMPERATURE)
        .await
        .map_err(|e| {
            if e.is_network() {
                AppError::Network(format!("Content generation request failed: {e}"))
            } else {
                AppError::Llm(format!("Content generation failed: {e}"))
            }
        })
}

fn build_copy_prompt(user_message: &str, analysis: &BusinessAnalysis) -> String {
    COPY_PROMPT_TEMPLATE
        .replace("{fidelity_instruction}", FIDELITY_INSTRUCTION)
        .replace("{business_name}", &analysis.business_name)
        .replace("{business_type}", analysis.business_type.as_str())
        .replace("{location}", &analysis.location)
        .replace("{industry}", &analysis.industry)
        .replace("{email_handle}", &email_handle(&analysis.business_name))
        .replace("{user_message}", user_message)
}

/// Business name reduced to `[a-z0-9]` for the placeholder contact address.
fn email_handle(business_name: &str) -> String {
    business_name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}
