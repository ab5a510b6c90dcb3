use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::generation::analysis::{BusinessType, Tone};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PageRow {
    pub id: Uuid,
    pub slug: String,
    pub business_name: String,
    pub industry: Option<String>,
    pub content: Value,
    pub meta_data: Option<Value>,
    pub template_id: String,
    pub custom_styles: Value,
    pub is_published: bool,
    pub theme_settings: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PageRow {
    /// Decodes the `content` column. Missing fields come back empty.
    pub fn page_content(&self) -> Result<PageContent, serde_json::Error> {
        PageContent::deserialize(&self.content)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub subheadline: String,
    #[serde(default)]
    pub cta_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gallery {
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub captions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Shape of the `pages.content` JSON column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    #[serde(default)]
    pub business_type: Option<BusinessType>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub tone: Option<Tone>,
    /// Services named during analysis.
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub hero: Option<Hero>,
    #[serde(default)]
    pub about: Option<String>,
    /// Services as written by the copywriter. Preferred for display.
    #[serde(default)]
    pub services_list: Vec<String>,
    #[serde(default)]
    pub contact: Option<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Gallery>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub testimonials: Vec<Testimonial>,
}

impl PageContent {
    pub fn display_services(&self) -> &[String] {
        if self.services_list.is_empty() {
            &self.services
        } else {
            &self.services_list
        }
    }

    pub fn headline(&self) -> Option<&str> {
        self.hero
            .as_ref()
            .map(|h| h.headline.as_str())
            .filter(|h| !h.trim().is_empty())
    }
}
