//! Business-Type Matcher: maps a business type / industry string to a template.

use crate::templates::catalog::{TemplateId, BUSINESS_TYPE_MAPPING};

/// Picks a template from the business type, falling back to the industry.
///
/// Each candidate is tried as an exact mapping key first, then against every
/// key in declaration order with two-way substring containment. First match
/// wins. Nothing matching (or nothing given) yields `TemplateId::DEFAULT`.
pub fn match_business_type(business_type: Option<&str>, industry: Option<&str>) -> TemplateId {
    [business_type, industry]
        .into_iter()
        .flatten()
        .find_map(match_term)
        .unwrap_or(TemplateId::DEFAULT)
}

fn match_term(term: &str) -> Option<TemplateId> {
    let normalized = term.trim().to_lowercase();
    // A blank term would be contained in every key and pick the first mapping.
    // It falls through to the next candidate or the default instead.
    if normalized.is_empty() {
        return None;
    }

    if let Some((_, id)) = BUSINESS_TYPE_MAPPING
        .iter()
        .find(|(keyword, _)| *keyword == normalized)
    {
        return Some(*id);
    }

    BUSINESS_TYPE_MAPPING
        .iter()
        .find(|(keyword, _)| normalized.contains(keyword) || keyword.contains(normalized.as_str()))
        .map(|(_, id)| *id)
}
