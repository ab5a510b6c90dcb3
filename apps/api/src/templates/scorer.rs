//! Description Scorer: keyword scoring of free text against every template.

use serde::Serialize;

use crate::templates::catalog::{all_templates, TemplateId};

const BUSINESS_TYPE_WEIGHT: u32 = 2;
const CONTEXT_WEIGHT: u32 = 1;
/// A raw score of 3 or more counts as full confidence.
const CONFIDENCE_NORMALIZER: f64 = 3.0;
/// Confidence reported when there is no text at all.
const EMPTY_INPUT_CONFIDENCE: f64 = 0.5;

/// The scorer's verdict for one piece of free text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateMatch {
    pub template_id: TemplateId,
    /// 0.0 – 1.0
    pub confidence: f64,
    /// Keywords of the winning template, in scan order.
    pub matched_keywords: Vec<String>,
    pub reasoning: String,
}

/// Scores `text` against each template in catalog order and returns the best one.
///
/// Keywords are matched by plain substring containment on the lowercased
/// text, not on word boundaries. Ties keep the earlier template.
pub fn score_description(text: Option<&str>) -> TemplateMatch {
    let text = match text {
        Some(t) if !t.is_empty() => t.to_lowercase(),
        _ => {
            return TemplateMatch {
                template_id: TemplateId::DEFAULT,
                confidence: EMPTY_INPUT_CONFIDENCE,
                matched_keywords: Vec::new(),
                reasoning: "No description provided, using default template".to_string(),
            }
        }
    };

    let mut best_score = 0_u32;
    let mut best_template = TemplateId::DEFAULT;
    let mut best_keywords: Vec<String> = Vec::new();

    for template in all_templates() {
        let mut score = 0_u32;
        let mut keywords = Vec::new();

        for keyword in template.business_type_keywords {
            if text.contains(keyword) {
                score += BUSINESS_TYPE_WEIGHT;
                keywords.push(keyword.to_string());
            }
        }

        for keyword in template.context_keywords {
            if text.contains(keyword) {
                score += CONTEXT_WEIGHT;
                keywords.push(keyword.to_string());
            }
        }

        if score > best_score {
            best_score = score;
            best_template = template.id;
            best_keywords = keywords;
        }
    }

    let confidence = (f64::from(best_score) / CONFIDENCE_NORMALIZER).min(1.0);

    let reasoning = if best_keywords.is_empty() {
        "No specific keywords matched, using default template".to_string()
    } else {
        format!("Matched keywords: {}", best_keywords.join(", "))
    };

    TemplateMatch {
        template_id: best_template,
        confidence,
        matched_keywords: best_keywords,
        reasoning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_missing_input_share_the_default() {
        let empty = score_description(Some(""));
        let missing = score_description(None);
        assert_eq!(empty, missing);
        assert_eq!(empty.template_id, TemplateId::DEFAULT);
        assert!((empty.confidence - 0.5).abs() < f64::EPSILON);
        assert!(empty.matched_keywords.is_empty());
    }

    #[test]
    fn test_no_keywords_yields_zero_confidence_default() {
        let result = score_description(Some("Lorem ipsum dolor sit amet"));
        assert_eq!(result.template_id, TemplateId::DEFAULT);
        assert_eq!(result.confidence, 0.0);
        assert!(result.reasoning.contains("No specific keywords"));
    }

    #[test]
    fn test_two_business_keywords_and_one_context_keyword_saturate() {
        // catering(2) + pizza(2) + menu(1) = 5 → min(5/3, 1) = 1
        let result = score_description(Some("Pizza and catering, see our menu"));
        assert_eq!(result.template_id, TemplateId::Restaurant);
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.matched_keywords, vec!["catering", "pizza", "menu"]);
    }

    #[test]
    fn test_single_business_keyword_clears_resolver_threshold() {
        let result = score_description(Some("A lovely vintage boutique"));
        assert_eq!(result.template_id, TemplateId::Retail);
        assert_eq!(result.matched_keywords, vec!["boutique"]);
        assert!(result.confidence > 0.6);
    }

    #[test]
    fn test_single_context_keyword_is_low_confidence() {
        let result = score_description(Some("Check out our cart"));
        assert_eq!(result.template_id, TemplateId::Retail);
        assert!((result.confidence - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_substring_matching_not_word_boundaries() {
        // "foodie" contains "food" (business 2 + context 1)
        let result = score_description(Some("foodie"));
        assert_eq!(result.template_id, TemplateId::Restaurant);
        assert_eq!(result.matched_keywords, vec!["food", "food"]);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_tie_keeps_earlier_template() {
        // "team" → modern_business 1, "cart" → retail 1; modern_business is earlier
        let result = score_description(Some("team cart"));
        assert_eq!(result.template_id, TemplateId::ModernBusiness);
        assert_eq!(result.matched_keywords, vec!["team"]);
    }

    #[test]
    fn test_only_winner_keywords_are_reported() {
        let result = score_description(Some("Restaurant with a chef and a small store"));
        assert_eq!(result.template_id, TemplateId::Restaurant);
        assert!(!result.matched_keywords.contains(&"store".to_string()));
        assert!(result.reasoning.starts_with("Matched keywords: restaurant"));
    }

    #[test]
    fn test_case_insensitive() {
        let upper = score_description(Some("CONSULTING AGENCY"));
        let lower = score_description(Some("consulting agency"));
        assert_eq!(upper, lower);
        assert_eq!(upper.template_id, TemplateId::ModernBusiness);
    }
}
