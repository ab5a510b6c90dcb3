// All LLM prompt constants for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Extraction wants stable output; copywriting gets more room.
pub const ANALYSIS_TEMPERATURE: f32 = 0.3;
pub const COPY_TEMPERATURE: f32 = 0.7;

/// System prompt for business analysis: enforces JSON-only output.
pub const ANALYSIS_SYSTEM: &str = "You are a business analyst. Extract business information \
    and return ONLY valid JSON without any markdown formatting or explanation.";

/// Business analysis prompt template. Replace `{user_message}` and `{template_info}`.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze this business description and extract structured information:
"{user_message}"

{template_info}

Based on the business description, choose the most appropriate template and return JSON with:
{
  "businessName": "extracted business name",
  "businessType": "restaurant|retail|service|other",
  "location": "city, country if mentioned",
  "industry": "specific industry category",
  "services": ["list", "of", "services"],
  "tone": "professional|casual|modern|traditional",
  "recommendedTemplate": "template_id_from_above_options"
}

IMPORTANT: Choose recommendedTemplate carefully based on the business type and industry.
- Use "restaurant" for food/dining businesses
- Use "retail" for shops/stores/boutiques
- Use "modern_business" for services/consulting/professional businesses"#;

/// System prompt for website copy: enforces JSON-only output.
pub const COPY_SYSTEM: &str = "You are a professional copywriter. STRICTLY follow user \
    instructions about content format, headlines, and tone. Avoid marketing fluff unless \
    specifically requested. Generate ONLY the content the user asks for and return ONLY valid \
    JSON without any markdown formatting or explanation.";

/// Website copy prompt template.
/// Replace: {user_message}, {business_name}, {business_type}, {location}, {industry},
///          {fidelity_instruction}, {email_handle}
pub const COPY_PROMPT_TEMPLATE: &str = r#"IMPORTANT: The user said: "{user_message}"

You MUST follow any specific instructions the user gave about content, headlines, tone, or format.

Generate website content for this business:
Business: {business_name}
Type: {business_type}
Location: {location}
Industry: {industry}

{fidelity_instruction}

Create JSON with sections:
{
  "hero": {
    "headline": "Follow user's headline instructions if any, otherwise just company name",
    "subheadline": "Simple description based on user input, no marketing fluff",
    "ctaText": "Simple call to action"
  },
  "about": "Brief description based ONLY on what user provided (1-2 sentences max)",
  "services": ["Only services mentioned by user"],
  "contact": {
    "phone": "+46 (0)XX XXX XX XX",
    "email": "info@{email_handle}.com",
    "address": "Stockholm, Sweden"
  }
}"#;
