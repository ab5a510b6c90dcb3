//! Template Resolver: final template choice for a business.
//!
//! Stages run in order and each may overwrite the previous result:
//! industry match → description score (only when confident) → override rules.
//! The override stage is unconditional and always runs last.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::templates::catalog::TemplateId;
use crate::templates::matcher::match_business_type;
use crate::templates::scorer::{score_description, TemplateMatch};

/// Description scores must be strictly above this to replace the industry match.
pub const DESCRIPTION_CONFIDENCE_THRESHOLD: f64 = 0.6;

/// Input to resolution. Every field is optional; all absent resolves to the default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessDescriptor {
    #[serde(default)]
    pub business_type: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    /// Name + headline + about text, as assembled by the caller.
    #[serde(default)]
    pub free_text: Option<String>,
    /// Name + industry + about text inspected by the override rules.
    /// Defaults to industry + free text when absent.
    #[serde(default)]
    pub override_text: Option<String>,
}

impl BusinessDescriptor {
    /// Builds the descriptor for a stored page.
    ///
    /// Free text is only supplied when the page has a headline.
    pub fn for_page(
        business_name: &str,
        industry: Option<&str>,
        headline: Option<&str>,
        about: Option<&str>,
    ) -> Self {
        let about = about.unwrap_or_default();
        let free_text = headline
            .filter(|h| !h.is_empty())
            .map(|h| format!("{business_name} {h} {about}"));

        Self {
            business_type: None,
            industry: industry.map(str::to_string),
            free_text,
            override_text: Some(format!(
                "{business_name} {} {about}",
                industry.unwrap_or_default()
            )),
        }
    }

    fn override_haystack(&self) -> String {
        match &self.override_text {
            Some(text) => text.to_lowercase(),
            None => format!(
                "{} {}",
                self.industry.as_deref().unwrap_or_default(),
                self.free_text.as_deref().unwrap_or_default()
            )
            .to_lowercase(),
        }
    }
}

/// A blunt keyword rule that forces a template when any needle appears.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverrideRule {
    pub tag: &'static str,
    pub template_id: TemplateId,
    pub needles: &'static [&'static str],
}

/// Evaluated in order; the first rule with a hit wins.
pub static OVERRIDE_RULES: &[OverrideRule] = &[
    OverrideRule {
        tag: "food_service",
        template_id: TemplateId::Restaurant,
        needles: &["restaurant", "pizza", "food", "café", "pasta", "bella vista"],
    },
    OverrideRule {
        tag: "retail_goods",
        template_id: TemplateId::Retail,
        needles: &["boutique", "shop", "store", "retail", "clothing", "vintage"],
    },
];

/// Stage-by-stage account of a resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub template_id: TemplateId,
    pub industry_match: Option<TemplateId>,
    pub description_match: Option<TemplateMatch>,
    pub description_applied: bool,
    pub override_rule: Option<&'static str>,
}

/// Resolves the final template for a descriptor. Never fails.
pub fn resolve(descriptor: &BusinessDescriptor) -> TemplateId {
    explain(descriptor).template_id
}

/// Same as [`resolve`], keeping the intermediate results.
pub fn explain(descriptor: &BusinessDescriptor) -> Resolution {
    let mut template_id = TemplateId::DEFAULT;

    let industry_match = descriptor
        .industry
        .as_deref()
        .filter(|i| !i.is_empty())
        .map(|industry| match_business_type(Some(industry), None));
    if let Some(id) = industry_match {
        template_id = id;
    }

    let description_match = descriptor
        .free_text
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(|text| score_description(Some(text)));
    let description_applied = description_match
        .as_ref()
        .is_some_and(|m| m.confidence > DESCRIPTION_CONFIDENCE_THRESHOLD);
    if let (true, Some(m)) = (description_applied, &description_match) {
        template_id = m.template_id;
    }

    let haystack = descriptor.override_haystack();
    let override_rule = OVERRIDE_RULES
        .iter()
        .find(|rule| rule.needles.iter().any(|n| haystack.contains(n)));
    if let Some(rule) = override_rule {
        template_id = rule.template_id;
    }

    debug!(
        "Resolved template {template_id}: industry={industry_match:?}, description_applied={description_applied}, override={:?}",
        override_rule.map(|r| r.tag)
    );

    Resolution {
        template_id,
        industry_match,
        description_match,
        description_applied,
        override_rule: override_rule.map(|r| r.tag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(industry: Option<&str>, free_text: Option<&str>) -> BusinessDescriptor {
        BusinessDescriptor {
            industry: industry.map(str::to_string),
            free_text: free_text.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_descriptor_resolves_to_default() {
        assert_eq!(resolve(&BusinessDescriptor::default()), TemplateId::ModernBusiness);
    }

    #[test]
    fn test_industry_match_is_used() {
        assert_eq!(resolve(&descriptor(Some("Law"), None)), TemplateId::ModernBusiness);
        assert_eq!(resolve(&descriptor(Some("Bakery"), None)), TemplateId::Restaurant);
    }

    #[test]
    fn test_bakery_with_vintage_boutique_text_is_retail() {
        let resolution = explain(&descriptor(Some("bakery"), Some("A lovely vintage boutique")));
        assert_eq!(resolution.industry_match, Some(TemplateId::Restaurant));
        assert!(resolution.description_applied);
        assert_eq!(resolution.override_rule, Some("retail_goods"));
        assert_eq!(resolution.template_id, TemplateId::Retail);
    }

    #[test]
    fn test_low_confidence_description_does_not_replace_industry() {
        // "cart" alone scores 1/3 for retail, below the threshold
        let resolution = explain(&descriptor(Some("consulting"), Some("fill your cart")));
        assert!(!resolution.description_applied);
        assert_eq!(resolution.template_id, TemplateId::ModernBusiness);
    }

    #[test]
    fn test_confident_description_replaces_industry() {
        let resolved = resolve(&descriptor(Some("education"), Some("Catering and takeout")));
        assert_eq!(resolved, TemplateId::Restaurant);
    }

    #[test]
    fn test_override_beats_confident_description() {
        let d = BusinessDescriptor {
            industry: Some("Consulting".to_string()),
            free_text: Some("Strategy consulting agency for corporate clients".to_string()),
            override_text: Some("Mario's Pizza consulting".to_string()),
            ..Default::default()
        };
        let resolution = explain(&d);
        assert!(resolution.description_applied);
        assert_eq!(resolution.override_rule, Some("food_service"));
        assert_eq!(resolution.template_id, TemplateId::Restaurant);
    }

    #[test]
    fn test_restaurant_rule_is_checked_before_retail_rule() {
        let d = BusinessDescriptor {
            override_text: Some("Food store".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve(&d), TemplateId::Restaurant);
    }

    #[test]
    fn test_override_matches_accented_cafe() {
        let d = BusinessDescriptor {
            override_text: Some("Le Petit CAFÉ".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve(&d), TemplateId::Restaurant);
    }

    #[test]
    fn test_demo_business_name_forces_restaurant() {
        let d = BusinessDescriptor::for_page(
            "Bella Vista",
            Some("Hospitality"),
            Some("Welcome"),
            Some("A place to unwind"),
        );
        assert_eq!(resolve(&d), TemplateId::Restaurant);
    }

    #[test]
    fn test_for_page_skips_free_text_without_headline() {
        let d = BusinessDescriptor::for_page("Acme", Some("Finance"), None, Some("We do taxes"));
        assert!(d.free_text.is_none());
        assert_eq!(d.override_text.as_deref(), Some("Acme Finance We do taxes"));

        let d = BusinessDescriptor::for_page("Acme", None, Some("Hello"), None);
        assert_eq!(d.free_text.as_deref(), Some("Acme Hello "));
    }

    #[test]
    fn test_descriptor_deserializes_with_missing_fields() {
        let d: BusinessDescriptor = serde_json::from_str(r#"{"industry": "retail"}"#).unwrap();
        assert_eq!(d.industry.as_deref(), Some("retail"));
        assert!(d.free_text.is_none());
        assert_eq!(resolve(&d), TemplateId::Retail);
    }

    #[test]
    fn test_descriptor_uses_camel_case_keys() {
        let d: BusinessDescriptor = serde_json::from_str(
            r#"{"businessType": "pizza", "freeText": "Wood-fired pizza", "overrideText": "Luigi's pizza"}"#,
        )
        .unwrap();
        assert_eq!(d.business_type.as_deref(), Some("pizza"));
        assert_eq!(d.free_text.as_deref(), Some("Wood-fired pizza"));
        assert_eq!(d.override_text.as_deref(), Some("Luigi's pizza"));
    }
}
