//! Page composition: stored page → resolved template → ordered sections.
//!
//! Every template variant renders hero, about, services, contact and footer.
//! Restaurant and retail add their own sections around those.
//! A page that cannot be composed degrades to a `FallbackView`, never an error response.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::page::{PageContent, PageRow, Testimonial};
use crate::templates::catalog::{template_by_id, ColorScheme, TemplateId};
use crate::templates::resolver::{explain, BusinessDescriptor, Resolution};

pub const MAX_GALLERY_IMAGES: usize = 6;
pub const MAX_TESTIMONIALS: usize = 3;

const FALLBACK_NOTICE: &str = "There was an error rendering this website template.";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Page content is malformed: {0}")]
    Content(#[from] serde_json::Error),

    #[error("Page has no hero headline")]
    MissingHeadline,
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceItem {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryImage {
    pub url: String,
    pub caption: Option<String>,
}

/// Fixed promotional copy (trust badges, featured products).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Highlight {
    pub label: &'static str,
    pub detail: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Offer {
    pub title: &'static str,
    pub schedule: &'static str,
    pub discount: &'static str,
    pub details: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    Hero {
        headline: String,
        subheadline: String,
        cta_text: String,
    },
    About {
        text: String,
    },
    Services {
        title: &'static str,
        subtitle: &'static str,
        items: Vec<ServiceItem>,
    },
    Gallery {
        images: Vec<GalleryImage>,
    },
    SpecialOffers {
        offers: &'static [Offer],
    },
    TrustIndicators {
        items: &'static [Highlight],
    },
    FeaturedProducts {
        items: &'static [Highlight],
    },
    Testimonials {
        reviews: Vec<Testimonial>,
        /// True when the page had no testimonials and stock reviews were used.
        stock: bool,
    },
    Newsletter {
        heading: &'static str,
        subheading: &'static str,
    },
    Contact {
        phone: String,
        email: String,
        address: String,
    },
    Footer {
        business_name: String,
        links: &'static [&'static str],
        tagline: &'static str,
    },
}

impl Section {
    pub fn kind(&self) -> &'static str {
        match self {
            Section::Hero { .. } => "hero",
            Section::About { .. } => "about",
            Section::Services { .. } => "services",
            Section::Gallery { .. } => "gallery",
            Section::SpecialOffers { .. } => "special_offers",
            Section::TrustIndicators { .. } => "trust_indicators",
            Section::FeaturedProducts { .. } => "featured_products",
            Section::Testimonials { .. } => "testimonials",
            Section::Newsletter { .. } => "newsletter",
            Section::Contact { .. } => "contact",
            Section::Footer { .. } => "footer",
        }
    }
}

static SPECIAL_OFFERS: [Offer; 2] = [
    Offer {
        title: "Happy Hour",
        schedule: "Monday - Friday, 4 PM - 7 PM",
        discount: "50% OFF",
        details: "Selected appetizers and drinks",
    },
    Offer {
        title: "Family Deal",
        schedule: "Perfect for families of 4+",
        discount: "25% OFF",
        details: "Family meals and desserts",
    },
];

static TRUST_INDICATORS: [Highlight; 4] = [
    Highlight {
        label: "Free Shipping",
        detail: "Orders over $50",
    },
    Highlight {
        label: "Secure Payment",
        detail: "SSL Protected",
    },
    Highlight {
        label: "Quality Guarantee",
        detail: "100% Authentic",
    },
    Highlight {
        label: "5-Star Reviews",
        detail: "1000+ customers",
    },
];

const FEATURED_PRODUCT_DETAIL: &str =
    "High-quality product with excellent reviews and fast shipping.";

static FEATURED_PRODUCTS: [Highlight; 3] = [
    Highlight {
        label: "Featured Product 1",
        detail: FEATURED_PRODUCT_DETAIL,
    },
    Highlight {
        label: "Featured Product 2",
        detail: FEATURED_PRODUCT_DETAIL,
    },
    Highlight {
        label: "Featured Product 3",
        detail: FEATURED_PRODUCT_DETAIL,
    },
];

/// (author, quote) shown when a retail page has no testimonials of its own.
const STOCK_REVIEWS: [(&str, &str); 3] = [
    (
        "Sarah M.",
        "Amazing quality and fast delivery! Highly recommend this store.",
    ),
    (
        "John D.",
        "Great customer service and excellent products. Will shop here again!",
    ),
    (
        "Emma K.",
        "Best shopping experience I've had online. Professional and reliable.",
    ),
];

// ────────────────────────────────────────────────────────────────────────────
// Template variants
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateVariant {
    ModernBusiness,
    Restaurant,
    Retail,
}

impl From<TemplateId> for TemplateVariant {
    fn from(id: TemplateId) -> Self {
        match id {
            TemplateId::ModernBusiness => TemplateVariant::ModernBusiness,
            TemplateId::Restaurant => TemplateVariant::Restaurant,
            TemplateId::Retail => TemplateVariant::Retail,
        }
    }
}

impl TemplateVariant {
    /// Ordered sections for this variant.
    pub fn compose(
        self,
        business_name: &str,
        content: &PageContent,
    ) -> Result<Vec<Section>, RenderError> {
        let hero = hero_section(content)?;
        let about = Section::About {
            text: content.about.clone().unwrap_or_default(),
        };

        let sections = match self {
            TemplateVariant::ModernBusiness => vec![
                hero,
                about,
                self.services_section(content),
                contact_section(content),
                self.footer_section(business_name),
            ],
            TemplateVariant::Restaurant => {
                let mut sections = vec![hero, about];
                sections.extend(gallery_section(content));
                sections.extend([
                    self.services_section(content),
                    Section::SpecialOffers {
                        offers: &SPECIAL_OFFERS,
                    },
                    contact_section(content),
                    self.footer_section(business_name),
                ]);
                sections
            }
            TemplateVariant::Retail => vec![
                hero,
                Section::TrustIndicators {
                    items: &TRUST_INDICATORS,
                },
                about,
                Section::FeaturedProducts {
                    items: &FEATURED_PRODUCTS,
                },
                self.services_section(content),
                testimonials_section(content),
                Section::Newsletter {
                    heading: "Stay Updated",
                    subheading: "Get the latest deals and product updates",
                },
                contact_section(content),
                self.footer_section(business_name),
            ],
        };

        Ok(sections)
    }

    fn services_section(self, content: &PageContent) -> Section {
        let (title, subtitle) = match self {
            TemplateVariant::ModernBusiness => ("Our Services", "What we offer"),
            TemplateVariant::Restaurant => ("Our Menu", "Taste the authentic flavors"),
            TemplateVariant::Retail => ("Our Products", "Discover our collection"),
        };

        let items = content
            .display_services()
            .iter()
            .map(|name| ServiceItem {
                name: name.clone(),
                description: self.service_description(name),
            })
            .collect();

        Section::Services {
            title,
            subtitle,
            items,
        }
    }

    fn service_description(self, service: &str) -> String {
        let service = service.to_lowercase();
        match self {
            TemplateVariant::ModernBusiness => format!(
                "Professional {service} services tailored to your specific needs and requirements."
            ),
            TemplateVariant::Restaurant => format!(
                "Delicious {service} prepared with the finest ingredients and traditional techniques."
            ),
            TemplateVariant::Retail => format!(
                "High-quality {service} with excellent customer service and competitive prices."
            ),
        }
    }

    fn footer_section(self, business_name: &str) -> Section {
        let (links, tagline): (&'static [&'static str], &'static str) = match self {
            TemplateVariant::ModernBusiness => (
                &["Services", "About", "Contact", "Privacy"],
                "Professional • Reliable • Results-Driven",
            ),
            TemplateVariant::Restaurant => (
                &["Menu", "Reservations", "About", "Contact"],
                "Made with love and the finest ingredients",
            ),
            TemplateVariant::Retail => (
                &["Products", "Shipping", "Returns", "Support"],
                "Quality products • Trusted service • Happy customers",
            ),
        };

        Section::Footer {
            business_name: business_name.to_string(),
            links,
            tagline,
        }
    }
}

fn hero_section(content: &PageContent) -> Result<Section, RenderError> {
    let headline = content.headline().ok_or(RenderError::MissingHeadline)?;
    let hero = content.hero.clone().unwrap_or_default();

    Ok(Section::Hero {
        headline: headline.to_string(),
        subheadline: hero.subheadline,
        cta_text: hero.cta_text,
    })
}

fn contact_section(content: &PageContent) -> Section {
    let contact = content.contact.clone().unwrap_or_default();
    Section::Contact {
        phone: contact.phone,
        email: contact.email,
        address: contact.address,
    }
}

fn gallery_section(content: &PageContent) -> Option<Section> {
    let gallery = content.gallery.as_ref().filter(|g| !g.images.is_empty())?;

    let images = gallery
        .images
        .iter()
        .take(MAX_GALLERY_IMAGES)
        .enumerate()
        .map(|(i, url)| GalleryImage {
            url: url.clone(),
            caption: gallery.captions.get(i).cloned(),
        })
        .collect();

    Some(Section::Gallery { images })
}

fn testimonials_section(content: &PageContent) -> Section {
    if content.testimonials.is_empty() {
        let reviews = STOCK_REVIEWS
            .iter()
            .map(|(author, quote)| Testimonial {
                quote: quote.to_string(),
                author: author.to_string(),
                role: None,
            })
            .collect();
        return Section::Testimonials {
            reviews,
            stock: true,
        };
    }

    Section::Testimonials {
        reviews: content
            .testimonials
            .iter()
            .take(MAX_TESTIMONIALS)
            .cloned()
            .collect(),
        stock: false,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Composition
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ComposedPage {
    pub template_id: TemplateId,
    pub template_name: &'static str,
    pub color_scheme: ColorScheme,
    pub resolution: Resolution,
    pub sections: Vec<Section>,
}

/// Minimal view shown when a page cannot be composed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FallbackView {
    pub business_name: String,
    pub notice: &'static str,
    pub headline: Option<String>,
    pub about: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

impl FallbackView {
    pub fn for_page(page: &PageRow) -> Self {
        // Undecodable content still yields the business name.
        let content = page.page_content().unwrap_or_default();
        let non_empty = |s: &str| Some(s.trim()).filter(|s| !s.is_empty()).map(str::to_string);
        let contact = content.contact.as_ref();

        Self {
            business_name: page.business_name.clone(),
            notice: FALLBACK_NOTICE,
            headline: content.headline().map(str::to_string),
            about: content.about.as_deref().and_then(non_empty),
            contact_email: contact.and_then(|c| non_empty(&c.email)),
            contact_phone: contact.and_then(|c| non_empty(&c.phone)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum RenderedPage {
    Composed(ComposedPage),
    Fallback(FallbackView),
}

/// Resolves the template for a stored page and lays out its sections.
pub fn compose_page(page: &PageRow) -> Result<ComposedPage, RenderError> {
    let content = page.page_content()?;

    let descriptor = BusinessDescriptor::for_page(
        &page.business_name,
        page.industry.as_deref(),
        content.hero.as_ref().map(|h| h.headline.as_str()),
        content.about.as_deref(),
    );
    let resolution = explain(&descriptor);
    let template = template_by_id(resolution.template_id);

    let sections = TemplateVariant::from(template.id).compose(&page.business_name, &content)?;

    info!(
        "Composed page {} with template {} ({} sections)",
        page.slug,
        template.id,
        sections.len()
    );
    debug!(
        "Page {} sections: {}",
        page.slug,
        sections.iter().map(Section::kind).collect::<Vec<_>>().join(", ")
    );

    Ok(ComposedPage {
        template_id: template.id,
        template_name: template.name,
        color_scheme: template.color_scheme,
        resolution,
        sections,
    })
}

/// Composes the page, degrading to the fallback view on any render error.
pub fn render_page(page: &PageRow) -> RenderedPage {
    match compose_page(page) {
        Ok(composed) => RenderedPage::Composed(composed),
        Err(e) => {
            warn!("Rendering page {} failed, using fallback view: {e}", page.slug);
            RenderedPage::Fallback(FallbackView::for_page(page))
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::{json, Value};
    use uuid::Uuid;

    fn page(business_name: &str, industry: Option<&str>, content: Value) -> PageRow {
        PageRow {
            id: Uuid::new_v4(),
            slug: "test-page-1".to_string(),
            business_name: business_name.to_string(),
            industry: industry.map(str::to_string),
            content,
            meta_data: None,
            template_id: "modern_business".to_string(),
            custom_styles: json!({}),
            is_published: false,
            theme_settings: json!({}),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn kinds(composed: &ComposedPage) -> Vec<&'static str> {
        composed.sections.iter().map(Section::kind).collect()
    }

    fn base_content() -> Value {
        json!({
            "hero": {"headline": "Strategy that works", "subheadline": "Advice for growing teams", "ctaText": "Book a call"},
            "about": "We help companies plan their next step.",
            "servicesList": ["Strategy", "Audits"],
            "contact": {"phone": "+1 555 0100", "email": "hello@acme.test", "address": "1 Main St"}
        })
    }

    #[test]
    fn test_modern_business_layout() {
        let composed = compose_page(&page("Acme Consulting", Some("consulting"), base_content())).unwrap();
        assert_eq!(composed.template_id, TemplateId::ModernBusiness);
        assert_eq!(
            kinds(&composed),
            ["hero", "about", "services", "contact", "footer"]
        );

        match &composed.sections[2] {
            Section::Services { title, items, .. } => {
                assert_eq!(*title, "Our Services");
                assert_eq!(items[0].name, "Strategy");
                assert!(items[0].description.contains("strategy services tailored"));
            }
            other => panic!("expected services, got {other:?}"),
        }
    }

    #[test]
    fn test_palette_follows_resolved_template() {
        let composed = compose_page(&page("Acme Consulting", Some("consulting"), base_content())).unwrap();
        assert_eq!(
            composed.color_scheme,
            template_by_id(TemplateId::ModernBusiness).color_scheme
        );
    }

    #[test]
    fn test_restaurant_gallery_is_capped() {
        let mut content = base_content();
        content["gallery"] = json!({
            "images": (1..=8).map(|i| format!("https://img.test/{i}.jpg")).collect::<Vec<_>>(),
            "captions": ["Terrace"]
        });
        let composed = compose_page(&page("Trattoria Roma", Some("restaurant"), content)).unwrap();

        assert_eq!(composed.template_id, TemplateId::Restaurant);
        assert_eq!(
            kinds(&composed),
            ["hero", "about", "gallery", "services", "special_offers", "contact", "footer"]
        );
        match &composed.sections[2] {
            Section::Gallery { images } => {
                assert_eq!(images.len(), MAX_GALLERY_IMAGES);
                assert_eq!(images[0].caption.as_deref(), Some("Terrace"));
                assert!(images[1].caption.is_none());
            }
            other => panic!("expected gallery, got {other:?}"),
        }
    }

    #[test]
    fn test_restaurant_without_gallery_images_skips_gallery() {
        let mut content = base_content();
        content["gallery"] = json!({"images": []});
        let composed = compose_page(&page("Trattoria Roma", Some("restaurant"), content)).unwrap();
        assert!(!kinds(&composed).contains(&"gallery"));
        assert_eq!(kinds(&composed).len(), 6);
    }

    #[test]
    fn test_retail_uses_stock_reviews_without_testimonials() {
        let composed = compose_page(&page("Northside Vintage", Some("clothing"), base_content())).unwrap();
        assert_eq!(composed.template_id, TemplateId::Retail);
        assert_eq!(
            kinds(&composed),
            [
                "hero",
                "trust_indicators",
                "about",
                "featured_products",
                "services",
                "testimonials",
                "newsletter",
                "contact",
                "footer"
            ]
        );
        match &composed.sections[5] {
            Section::Testimonials { reviews, stock } => {
                assert!(*stock);
                assert_eq!(reviews.len(), 3);
                assert_eq!(reviews[0].author, "Sarah M.");
            }
            other => panic!("expected testimonials, got {other:?}"),
        }
    }

    #[test]
    fn test_retail_caps_page_testimonials() {
        let mut content = base_content();
        content["testimonials"] = json!((1..=5)
            .map(|i| json!({"quote": format!("Review {i}"), "author": format!("Buyer {i}")}))
            .collect::<Vec<_>>());
        let composed = compose_page(&page("Northside Vintage", Some("clothing"), content)).unwrap();
        match &composed.sections[5] {
            Section::Testimonials { reviews, stock } => {
                assert!(!*stock);
                assert_eq!(reviews.len(), MAX_TESTIMONIALS);
                assert_eq!(reviews[2].quote, "Review 3");
            }
            other => panic!("expected testimonials, got {other:?}"),
        }
    }

    #[test]
    fn test_services_fall_back_to_analysis_services() {
        let mut content = base_content();
        content["servicesList"] = json!([]);
        content["services"] = json!(["Bookkeeping"]);
        let composed = compose_page(&page("Acme Consulting", Some("consulting"), content)).unwrap();
        match &composed.sections[2] {
            Section::Services { items, .. } => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].name, "Bookkeeping");
            }
            other => panic!("expected services, got {other:?}"),
        }
    }

    #[test]
    fn test_override_name_beats_industry() {
        let composed = compose_page(&page("Mario's Pizza", Some("consulting"), base_content())).unwrap();
        assert_eq!(composed.template_id, TemplateId::Restaurant);
        assert_eq!(composed.resolution.override_rule, Some("food_service"));
    }

    #[test]
    fn test_missing_headline_falls_back() {
        let content = json!({
            "about": "We help companies plan.",
            "contact": {"email": "hello@acme.test", "phone": ""}
        });
        let row = page("Acme Consulting", Some("consulting"), content);

        assert!(matches!(
            compose_page(&row),
            Err(RenderError::MissingHeadline)
        ));

        match render_page(&row) {
            RenderedPage::Fallback(view) => {
                assert_eq!(view.business_name, "Acme Consulting");
                assert_eq!(view.notice, FALLBACK_NOTICE);
                assert!(view.headline.is_none());
                assert_eq!(view.about.as_deref(), Some("We help companies plan."));
                assert_eq!(view.contact_email.as_deref(), Some("hello@acme.test"));
                assert!(view.contact_phone.is_none());
            }
            other => panic!("expected fallback, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_content_falls_back() {
        let row = page("Acme Consulting", None, json!({"hero": "not an object"}));
        assert!(matches!(compose_page(&row), Err(RenderError::Content(_))));
        assert!(matches!(render_page(&row), RenderedPage::Fallback(_)));
    }

    #[test]
    fn test_rendered_page_is_tagged() {
        let row = page("Acme Consulting", Some("consulting"), base_content());
        let value = serde_json::to_value(render_page(&row)).unwrap();
        assert_eq!(value["view"], "composed");
        assert_eq!(value["template_id"], "modern_business");
        assert_eq!(value["sections"][0]["kind"], "hero");
        assert_eq!(value["sections"][0]["cta_text"], "Book a call");
    }
}
