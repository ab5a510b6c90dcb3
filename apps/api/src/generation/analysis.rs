//! Business Analysis: extracts structured business attributes from a free-text description.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::prompts::{ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM, ANALYSIS_TEMPERATURE};
use crate::llm_client::LlmClient;
use crate::templates::catalog::{template_prompt_info, TemplateId};

/// Coarse business category reported by the analysis call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessType {
    Restaurant,
    Retail,
    Service,
    #[default]
    #[serde(other)]
    Other,
}

impl BusinessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessType::Restaurant => "restaurant",
            BusinessType::Retail => "retail",
            BusinessType::Service => "service",
            BusinessType::Other => "other",
        }
    }
}

/// Voice the generated copy should use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Casual,
    Modern,
    Traditional,
    #[default]
    #[serde(other)]
    Professional,
}

/// Structured output of business analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessAnalysis {
    pub business_name: String,
    #[serde(default)]
    pub business_type: BusinessType,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub tone: Tone,
    /// The model's template pick. Free text: may be empty or not a known id.
    #[serde(default)]
    pub recommended_template: Option<String>,
}

impl BusinessAnalysis {
    /// The recommendation, if it names a known template.
    pub fn recommended_template_id(&self) -> Option<TemplateId> {
        self.recommended_template
            .as_deref()
            .and_then(|t| t.parse::<TemplateId>().ok())
    }
}

/// Runs the analysis prompt and returns the structured `BusinessAnalysis`.
pub async fn analyze_business(
    user_message: &str,
    llm: &LlmClient,
) -> Result<BusinessAnalysis, AppError> {
    let prompt = ANALYSIS_PROMPT_TEMPLATE
        .replace("{template_info}", &template_prompt_info())
        .replace("{user_message}", user_message);

    llm.call_json::<BusinessAnalysis>(&prompt, ANALYSIS_SYSTEM, ANALYSIS_TEMPERATURE)
        .await
        .map_err(|e| {
            if e.is_network() {
                AppError::Network(format!("Business analysis request failed: {e}"))
            } else {
                AppError::Llm(format!("Business analysis failed: {e}"))
            }
        })
}
