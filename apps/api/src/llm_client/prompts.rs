// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// Instruction keeping generated copy faithful to what the user actually said.
pub const FIDELITY_INSTRUCTION: &str = "\
    RULES FOR CONTENT GENERATION:\n\
    1. If user specified headline format (like \"only use company name\"), follow it exactly\n\
    2. Don't add marketing slogans unless user asks for them\n\
    3. Keep content minimal and professional unless user requests otherwise\n\
    4. Use ONLY the information provided by the user - don't make assumptions\n\
    5. If user wants simple content, make it simple";
