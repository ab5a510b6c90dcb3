// Website Generation Engine
// Implements: business analysis, copywriting, template choice, page persistence.
// All LLM calls go through llm_client, no direct HTTP calls here.

pub mod analysis;
pub mod composer;
pub mod copywriter;
pub mod generator;
pub mod handlers;
pub mod prompts;
