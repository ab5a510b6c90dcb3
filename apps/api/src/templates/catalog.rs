//! Template Catalog: the closed, build-time registry of visual templates.
//!
//! Everything here is `'static` data: the catalog is never mutated and can be
//! read from any handler without locking.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

// ────────────────────────────────────────────────────────────────────────────
// Identifiers
// ────────────────────────────────────────────────────────────────────────────

/// Identifier of one of the built-in templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateId {
    ModernBusiness,
    Restaurant,
    Retail,
}

impl TemplateId {
    /// The template used whenever nothing better is known.
    pub const DEFAULT: TemplateId = TemplateId::ModernBusiness;

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::ModernBusiness => "modern_business",
            TemplateId::Restaurant => "restaurant",
            TemplateId::Retail => "retail",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("Unknown template id: {0}")]
pub struct UnknownTemplate(pub String);

impl FromStr for TemplateId {
    type Err = UnknownTemplate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "modern_business" => Ok(TemplateId::ModernBusiness),
            "restaurant" => Ok(TemplateId::Restaurant),
            "retail" => Ok(TemplateId::Retail),
            other => Err(UnknownTemplate(other.to_string())),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Template configuration
// ────────────────────────────────────────────────────────────────────────────

/// Five opaque palette tokens. The core never interprets them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorScheme {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub text: &'static str,
}

/// A named alternative palette offered for a template.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorVariation {
    pub name: &'static str,
    #[serde(flatten)]
    pub colors: ColorScheme,
}

/// Page sections a template supports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sections {
    pub hero: bool,
    pub about: bool,
    pub services: bool,
    pub gallery: bool,
    pub testimonials: bool,
    pub contact: bool,
    pub footer: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    SinglePage,
    // No catalog entry uses it yet; kept so the serialized layout names stay complete
    #[allow(dead_code)]
    MultiSection,
}

#[derive(Debug, Clone, Serialize)]
pub struct Template {
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
    pub best_for: &'static str,
    pub features: &'static [&'static str],
    /// Business types this template is built for. Weighted 2 by the scorer.
    pub business_type_keywords: &'static [&'static str],
    /// Weak signals (e.g. "menu", "checkout"). Weighted 1 by the scorer.
    pub context_keywords: &'static [&'static str],
    pub color_scheme: ColorScheme,
    pub sections: Sections,
    pub layout: Layout,
}

/// Catalog order matters: the scorer breaks ties in favour of earlier entries.
pub static TEMPLATES: [Template; 3] = [
    Template {
        id: TemplateId::ModernBusiness,
        name: "Modern Business",
        description: "Clean, professional design for general businesses",
        best_for: "Professional service businesses that want to establish trust and expertise",
        features: &[
            "Professional layout",
            "Service highlights",
            "Business hours",
            "Contact forms",
            "Consultation booking",
        ],
        business_type_keywords: &["consulting", "agency", "service", "technology", "professional"],
        context_keywords: &[
            "professional",
            "service",
            "consultation",
            "business",
            "corporate",
            "solution",
            "expert",
            "team",
            "client",
            "project",
            "strategy",
        ],
        color_scheme: ColorScheme {
            primary: "indigo-600",
            secondary: "purple-600",
            accent: "blue-500",
            background: "gray-50",
            text: "gray-900",
        },
        sections: Sections {
            hero: true,
            about: true,
            services: true,
            gallery: false,
            testimonials: false,
            contact: true,
            footer: true,
        },
        layout: Layout::SinglePage,
    },
    Template {
        id: TemplateId::Restaurant,
        name: "Restaurant & Food",
        description: "Warm, inviting design for restaurants and food businesses",
        best_for: "Food service businesses that want to showcase their atmosphere and menu",
        features: &[
            "Menu showcase",
            "Gallery for food photos",
            "Special offers section",
            "Warm color scheme",
            "Reservation features",
        ],
        business_type_keywords: &["restaurant", "cafe", "food", "catering", "pizza", "dining"],
        context_keywords: &[
            "menu",
            "food",
            "dining",
            "kitchen",
            "chef",
            "cuisine",
            "meal",
            "cooking",
            "delivery",
            "takeout",
            "order",
            "table",
            "reservation",
            "taste",
            "recipe",
        ],
        color_scheme: ColorScheme {
            primary: "orange-600",
            secondary: "red-600",
            accent: "yellow-500",
            background: "amber-50",
            text: "gray-900",
        },
        sections: Sections {
            hero: true,
            about: true,
            services: true,
            gallery: true,
            testimonials: false,
            contact: true,
            footer: true,
        },
        layout: Layout::SinglePage,
    },
    Template {
        id: TemplateId::Retail,
        name: "Retail & E-commerce",
        description: "Product-focused design for retail businesses",
        best_for: "Businesses that sell products and want to highlight their offerings",
        features: &[
            "Product showcases",
            "Trust indicators",
            "Customer testimonials",
            "Newsletter signup",
            "Shopping-focused design",
        ],
        business_type_keywords: &["retail", "shop", "store", "ecommerce", "boutique", "market"],
        context_keywords: &[
            "product",
            "sell",
            "buy",
            "shopping",
            "store",
            "inventory",
            "customer",
            "merchandise",
            "sales",
            "online",
            "purchase",
            "cart",
            "checkout",
            "payment",
        ],
        color_scheme: ColorScheme {
            primary: "green-600",
            secondary: "emerald-600",
            accent: "teal-500",
            background: "green-50",
            text: "gray-900",
        },
        sections: Sections {
            hero: true,
            about: true,
            services: true,
            gallery: true,
            testimonials: true,
            contact: true,
            footer: true,
        },
        layout: Layout::SinglePage,
    },
];

/// Flat keyword → template mapping used by the business-type matcher.
/// Declaration order is significant: substring fallback is first-match-wins.
pub static BUSINESS_TYPE_MAPPING: &[(&str, TemplateId)] = &[
    // Restaurant & food
    ("restaurant", TemplateId::Restaurant),
    ("cafe", TemplateId::Restaurant),
    ("food", TemplateId::Restaurant),
    ("food service", TemplateId::Restaurant),
    ("catering", TemplateId::Restaurant),
    ("pizza", TemplateId::Restaurant),
    ("dining", TemplateId::Restaurant),
    ("bakery", TemplateId::Restaurant),
    ("bar", TemplateId::Restaurant),
    ("pub", TemplateId::Restaurant),
    // Retail & e-commerce
    ("retail", TemplateId::Retail),
    ("shop", TemplateId::Retail),
    ("store", TemplateId::Retail),
    ("ecommerce", TemplateId::Retail),
    ("boutique", TemplateId::Retail),
    ("market", TemplateId::Retail),
    ("clothing", TemplateId::Retail),
    ("vintage clothing", TemplateId::Retail),
    ("fashion", TemplateId::Retail),
    ("jewelry", TemplateId::Retail),
    ("electronics", TemplateId::Retail),
    // Modern business
    ("consulting", TemplateId::ModernBusiness),
    ("agency", TemplateId::ModernBusiness),
    ("service", TemplateId::ModernBusiness),
    ("technology", TemplateId::ModernBusiness),
    ("professional", TemplateId::ModernBusiness),
    ("marketing", TemplateId::ModernBusiness),
    ("design", TemplateId::ModernBusiness),
    ("law", TemplateId::ModernBusiness),
    ("finance", TemplateId::ModernBusiness),
    ("healthcare", TemplateId::ModernBusiness),
    ("education", TemplateId::ModernBusiness),
    ("real estate", TemplateId::ModernBusiness),
    ("construction", TemplateId::ModernBusiness),
    ("cleaning", TemplateId::ModernBusiness),
];

const fn palette(
    name: &'static str,
    primary: &'static str,
    secondary: &'static str,
    accent: &'static str,
    background: &'static str,
    text: &'static str,
) -> ColorVariation {
    ColorVariation {
        name,
        colors: ColorScheme {
            primary,
            secondary,
            accent,
            background,
            text,
        },
    }
}

static MODERN_BUSINESS_COLORS: [ColorVariation; 3] = [
    palette("Professional Blue", "indigo-600", "purple-600", "blue-500", "gray-50", "gray-900"),
    palette("Corporate Navy", "slate-700", "slate-600", "blue-600", "slate-50", "slate-900"),
    palette("Tech Green", "emerald-600", "teal-600", "green-500", "emerald-50", "gray-900"),
];

static RESTAURANT_COLORS: [ColorVariation; 3] = [
    palette("Warm Orange", "orange-600", "red-600", "yellow-500", "amber-50", "gray-900"),
    palette("Rustic Red", "red-700", "orange-600", "amber-500", "red-50", "gray-900"),
    palette("Mediterranean", "amber-600", "orange-500", "yellow-400", "amber-50", "gray-900"),
];

static RETAIL_COLORS: [ColorVariation; 3] = [
    palette("Fresh Green", "green-600", "emerald-600", "teal-500", "green-50", "gray-900"),
    palette("Luxury Purple", "purple-600", "violet-600", "purple-400", "purple-50", "gray-900"),
    palette("Modern Pink", "rose-600", "pink-600", "rose-400", "rose-50", "gray-900"),
];

// ────────────────────────────────────────────────────────────────────────────
// Lookups
// ────────────────────────────────────────────────────────────────────────────

pub fn all_templates() -> &'static [Template] {
    &TEMPLATES
}

pub fn template_by_id(id: TemplateId) -> &'static Template {
    match id {
        TemplateId::ModernBusiness => &TEMPLATES[0],
        TemplateId::Restaurant => &TEMPLATES[1],
        TemplateId::Retail => &TEMPLATES[2],
    }
}

pub fn color_variations(id: TemplateId) -> &'static [ColorVariation] {
    match id {
        TemplateId::ModernBusiness => &MODERN_BUSINESS_COLORS,
        TemplateId::Restaurant => &RESTAURANT_COLORS,
        TemplateId::Retail => &RETAIL_COLORS,
    }
}

/// Templates whose business-type keywords overlap the given type in either direction.
pub fn templates_for_business_type(business_type: &str) -> Vec<&'static Template> {
    let normalized = business_type.trim().to_lowercase();
    if normalized.is_empty() {
        return Vec::new();
    }

    TEMPLATES
        .iter()
        .filter(|t| {
            t.business_type_keywords
                .iter()
                .any(|kw| kw.contains(normalized.as_str()) || normalized.contains(kw))
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateStats {
    pub total_templates: usize,
    pub business_type_coverage: usize,
    pub templates_by_type: BTreeMap<&'static str, usize>,
}

pub fn template_stats() -> TemplateStats {
    TemplateStats {
        total_templates: TEMPLATES.len(),
        business_type_coverage: BUSINESS_TYPE_MAPPING.len(),
        templates_by_type: TEMPLATES
            .iter()
            .map(|t| (t.id.as_str(), t.business_type_keywords.len()))
            .collect(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

/// Checks a template for malformed configuration. Pass/fail only.
///
/// Keywords must be lowercase: matching lowercases the input, never the keyword.
pub fn validate_template(template: &Template) -> bool {
    let problem = if template.name.trim().is_empty() || template.description.trim().is_empty() {
        Some("missing name or description")
    } else if template.color_scheme.primary.is_empty() || template.color_scheme.secondary.is_empty()
    {
        Some("missing primary or secondary color")
    } else if !template.sections.hero || !template.sections.contact {
        Some("hero and contact sections are mandatory")
    } else if template.business_type_keywords.is_empty() {
        Some("no business type keywords")
    } else if template
        .business_type_keywords
        .iter()
        .chain(template.context_keywords.iter())
        .any(|kw| kw.is_empty() || kw.to_lowercase() != *kw)
    {
        Some("keywords must be non-empty lowercase strings")
    } else {
        None
    };

    match problem {
        Some(reason) => {
            warn!("Template '{}' failed validation: {reason}", template.id);
            false
        }
        None => true,
    }
}

/// Catalog summary injected into the business analysis prompt.
pub fn template_prompt_info() -> String {
    let entries = TEMPLATES
        .iter()
        .map(|t| {
            format!(
                "**{} ({})**\n- Best for: {}\n- Business types: {}\n- Features: {}",
                t.name,
                t.id,
                t.best_for,
                t.business_type_keywords.join(", "),
                t.features.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Available website templates:\n\n{entries}\n\n\
        Choose the most appropriate template based on the business type and industry."
    )
}
