//! Core domain types for placepress catalogs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// BuildId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper identifying one build run (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildId(pub Uuid);

impl BuildId {
    /// Generate a new time-sortable build identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for BuildId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BuildId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for BuildId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ---------------------------------------------------------------------------
// Catalog records
// ---------------------------------------------------------------------------

/// Publication status of a catalog entity.
///
/// Only `Active` entities are published and listed in aggregate documents;
/// the renderer itself does not inspect status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityStatus {
    #[default]
    Active,
    Inactive,
    Draft,
}

/// Which kind of record an [`Entity`] wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Business,
    Freelancer,
}

impl EntityKind {
    /// Lowercase singular label, used in machine summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Freelancer => "freelancer",
        }
    }

    /// Heading label for directory grouping.
    pub fn group_heading(&self) -> &'static str {
        match self {
            Self::Business => "Businesses",
            Self::Freelancer => "Freelancers",
        }
    }
}

/// Geographic coordinates. Only attached to structured data when actually
/// present on the record — zero coordinates are never fabricated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Aggregated customer-review figures from an external review source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reviews {
    pub rating: f64,
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// One question/answer pair, explicit or derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

/// A business record: shop, clinic, venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    /// URL-safe slug; the sole addressing key for output paths.
    pub id: String,
    pub name: String,
    /// Alternate (e.g. romanized) name.
    #[serde(default, alias = "name_en", skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    /// Schema.org type tag (e.g. `MedicalClinic`). Defaults to `LocalBusiness`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// If absent, derived from the other fields at build time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Full street address as one line.
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<Coordinates>,
    /// Raw opening-hours lines, optionally in compact `Mo-Fr 09:00-18:00` notation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub opening_hours: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    /// Order is preserved; the first few feed trimmed previews.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    /// Channel name → profile URL. `null`/absent channels are omitted from output.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub social_links: BTreeMap<String, Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Reviews>,
    /// Explicit FAQ; if empty, derived at build time.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub faq: Vec<FaqItem>,
    #[serde(default)]
    pub status: EntityStatus,
}

/// A freelancer record: an individual practitioner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Freelancer {
    /// URL-safe slug; the sole addressing key for output paths.
    pub id: String,
    pub name: String,
    /// Professional title; plays the category role in headings and derived copy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Service region; plays the address role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hours: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub social_links: BTreeMap<String, Option<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub faq: Vec<FaqItem>,
    #[serde(default)]
    pub status: EntityStatus,
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A catalog entity of either kind.
///
/// Derivation and rendering are written against this accessor surface, never
/// against the concrete variants, so both kinds flow through one pipeline.
#[derive(Debug, Clone)]
pub enum Entity {
    Business(Business),
    Freelancer(Freelancer),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Business(_) => EntityKind::Business,
            Self::Freelancer(_) => EntityKind::Freelancer,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Business(b) => &b.id,
            Self::Freelancer(f) => &f.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Business(b) => &b.name,
            Self::Freelancer(f) => &f.name,
        }
    }

    pub fn alternate_name(&self) -> Option<&str> {
        match self {
            Self::Business(b) => b.name_en.as_deref(),
            Self::Freelancer(_) => None,
        }
    }

    /// Category (business) or professional title (freelancer).
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Business(b) => b.category.as_deref(),
            Self::Freelancer(f) => f.title.as_deref(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Business(b) => b.description.as_deref(),
            Self::Freelancer(f) => f.description.as_deref(),
        }
    }

    /// Address (business) or region (freelancer); empty string when absent.
    pub fn location_line(&self) -> &str {
        match self {
            Self::Business(b) => &b.address,
            Self::Freelancer(f) => f.region.as_deref().unwrap_or(""),
        }
    }

    pub fn phone(&self) -> Option<&str> {
        match self {
            Self::Business(b) => b.phone.as_deref(),
            Self::Freelancer(f) => f.phone.as_deref(),
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            Self::Business(b) => b.email.as_deref(),
            Self::Freelancer(f) => f.email.as_deref(),
        }
    }

    pub fn website(&self) -> Option<&str> {
        match self {
            Self::Business(b) => b.url.as_deref(),
            Self::Freelancer(f) => f.url.as_deref(),
        }
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            Self::Business(b) => b.geo,
            Self::Freelancer(f) => f.geo,
        }
    }

    pub fn hours(&self) -> &[String] {
        match self {
            Self::Business(b) => &b.opening_hours,
            Self::Freelancer(f) => &f.hours,
        }
    }

    pub fn price_range(&self) -> Option<&str> {
        match self {
            Self::Business(b) => b.price_range.as_deref(),
            Self::Freelancer(_) => None,
        }
    }

    pub fn keywords(&self) -> &[String] {
        match self {
            Self::Business(b) => &b.keywords,
            Self::Freelancer(f) => &f.keywords,
        }
    }

    pub fn social_links(&self) -> &BTreeMap<String, Option<String>> {
        match self {
            Self::Business(b) => &b.social_links,
            Self::Freelancer(f) => &f.social_links,
        }
    }

    pub fn reviews(&self) -> Option<&Reviews> {
        match self {
            Self::Business(b) => b.reviews.as_ref(),
            Self::Freelancer(_) => None,
        }
    }

    pub fn faq(&self) -> &[FaqItem] {
        match self {
            Self::Business(b) => &b.faq,
            Self::Freelancer(f) => &f.faq,
        }
    }

    pub fn status(&self) -> EntityStatus {
        match self {
            Self::Business(b) => b.status,
            Self::Freelancer(f) => f.status,
        }
    }

    /// Schema.org type tag; the declared one for businesses, `Person` for freelancers.
    pub fn schema_type(&self) -> &str {
        match self {
            Self::Business(b) => b.schema_type.as_deref().unwrap_or("LocalBusiness"),
            Self::Freelancer(_) => "Person",
        }
    }
}

impl From<Business> for Entity {
    fn from(b: Business) -> Self {
        Self::Business(b)
    }
}

impl From<Freelancer> for Entity {
    fn from(f: Freelancer) -> Self {
        Self::Freelancer(f)
    }
}

/// An id is URL-safe when it is non-empty ASCII alphanumeric/dash/underscore.
pub fn is_url_safe_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

// ---------------------------------------------------------------------------
// Catalog metadata
// ---------------------------------------------------------------------------

/// Site-level metadata carried by the export catalog format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogMeta {
    /// Host the site is published under; used when the config file leaves
    /// `[site].domain` empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Rendered documents
// ---------------------------------------------------------------------------

/// A rendered output document: path relative to the output root plus content.
#[derive(Debug, Clone)]
pub struct Document {
    pub rel_path: String,
    pub content: String,
}

impl Document {
    pub fn new(rel_path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            rel_path: rel_path.into(),
            content: content.into(),
        }
    }
}
