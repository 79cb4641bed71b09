//! Schema.org JSON-LD builders.
//!
//! Maps one entity into the nested structured-data objects embedded in its
//! detail page: a main object typed by the entity's declared Schema.org type,
//! and a separate `FAQPage` object when FAQ entries exist. Optional keys are
//! omitted entirely when their source value is absent — never serialized as
//! null placeholders.

use placepress_shared::{Entity, FaqItem, SiteConfig};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Nested objects
// ---------------------------------------------------------------------------

/// `PostalAddress` — the full location line as the street address.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    #[serde(rename = "@type")]
    pub object_type: &'static str,
    pub street_address: String,
}

/// `GeoCoordinates` — emitted only when the record carries coordinates.
#[derive(Debug, Clone, Serialize)]
pub struct GeoCoordinates {
    #[serde(rename = "@type")]
    pub object_type: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

/// One `OpeningHoursSpecification` span, expanded from compact notation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHoursSpec {
    #[serde(rename = "@type")]
    pub object_type: &'static str,
    pub day_of_week: String,
    pub opens: String,
    pub closes: String,
}

/// `AggregateRating` from external review figures.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRating {
    #[serde(rename = "@type")]
    pub object_type: &'static str,
    pub rating_value: f64,
    pub review_count: u32,
    pub best_rating: u32,
}

/// A `Question` with its accepted `Answer`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSchema {
    #[serde(rename = "@type")]
    pub object_type: &'static str,
    pub name: String,
    pub accepted_answer: AnswerSchema,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerSchema {
    #[serde(rename = "@type")]
    pub object_type: &'static str,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Top-level objects
// ---------------------------------------------------------------------------

const CONTEXT: &str = "https://schema.org";

/// The main structured-data object for one entity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub schema_type: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_name: Option<String>,
    pub description: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<PostalAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoCoordinates>,
    /// Raw opening-hours lines, passed through untouched.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub opening_hours: Vec<String>,
    /// Per-day spans expanded from compact notation; lines that do not parse
    /// appear only in `opening_hours`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub opening_hours_specification: Vec<OpeningHoursSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate_rating: Option<AggregateRating>,
    /// FAQ pairs inlined on the main object (also emitted as [`FaqSchema`]).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub main_entity: Vec<QuestionSchema>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub same_as: Vec<String>,
}

/// The standalone `FAQPage` object.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub main_entity: Vec<QuestionSchema>,
}

/// Site-level `Organization` object for the directory page.
#[derive(Debug, Clone, Serialize)]
pub struct OrganizationSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub schema_type: &'static str,
    pub name: String,
    pub url: String,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Build the main structured-data object for an entity.
///
/// `description` and `faq` are the derived values so that every document in
/// the build embeds the same narrative content.
pub fn entity_schema(
    entity: &Entity,
    description: &str,
    faq: &[FaqItem],
    site: &SiteConfig,
) -> EntitySchema {
    let canonical_url = entity
        .website()
        .map(str::to_string)
        .unwrap_or_else(|| site.detail_url(entity.id()));

    let address = {
        let line = entity.location_line();
        (!line.is_empty()).then(|| PostalAddress {
            object_type: "PostalAddress",
            street_address: line.to_string(),
        })
    };

    let geo = entity.coordinates().map(|c| GeoCoordinates {
        object_type: "GeoCoordinates",
        latitude: c.lat,
        longitude: c.lng,
    });

    let opening_hours_specification = placepress_content::expand_opening_hours(entity.hours())
        .into_iter()
        .map(|span| OpeningHoursSpec {
            object_type: "OpeningHoursSpecification",
            day_of_week: span.day,
            opens: span.opens,
            closes: span.closes,
        })
        .collect();

    let aggregate_rating = entity.reviews().map(|r| AggregateRating {
        object_type: "AggregateRating",
        rating_value: r.rating,
        review_count: r.count,
        best_rating: 5,
    });

    EntitySchema {
        context: CONTEXT,
        schema_type: entity.schema_type().to_string(),
        name: entity.name().to_string(),
        alternate_name: entity.alternate_name().map(str::to_string),
        description: description.to_string(),
        url: canonical_url.clone(),
        telephone: entity.phone().map(str::to_string),
        email: entity.email().map(str::to_string),
        address,
        geo,
        opening_hours: entity.hours().to_vec(),
        opening_hours_specification,
        price_range: entity.price_range().map(str::to_string),
        aggregate_rating,
        main_entity: questions(faq),
        same_as: same_as_links(entity, &canonical_url),
    }
}

/// Build the standalone `FAQPage` object; `None` for an empty list.
pub fn faq_schema(faq: &[FaqItem]) -> Option<FaqSchema> {
    if faq.is_empty() {
        return None;
    }
    Some(FaqSchema {
        context: CONTEXT,
        schema_type: "FAQPage",
        main_entity: questions(faq),
    })
}

/// Build the site-level `Organization` object.
pub fn organization_schema(site: &SiteConfig) -> OrganizationSchema {
    OrganizationSchema {
        context: CONTEXT,
        schema_type: "Organization",
        name: site.site_name.clone(),
        url: site.root_url(),
        description: format!(
            "Official information directory for the businesses and freelancers listed on {}.",
            site.site_name
        ),
    }
}

/// Serialize a schema object for embedding in an HTML `<script>` block.
///
/// `<` is JSON-escaped so a hostile field can never close the inline block.
pub fn to_embeddable_json<T: Serialize>(schema: &T) -> String {
    let json = serde_json::to_string_pretty(schema).unwrap_or_else(|_| "{}".to_string());
    json.replace('<', "\\u003c")
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn questions(faq: &[FaqItem]) -> Vec<QuestionSchema> {
    faq.iter()
        .map(|item| QuestionSchema {
            object_type: "Question",
            name: item.question.clone(),
            accepted_answer: AnswerSchema {
                object_type: "Answer",
                text: item.answer.clone(),
            },
        })
        .collect()
}

/// Ordered, de-duplicated profile links: social-link values plus the entity's
/// own site when it differs from the canonical URL.
fn same_as_links(entity: &Entity, canonical_url: &str) -> Vec<String> {
    let mut links: Vec<String> = Vec::new();

    for link in entity.social_links().values().flatten() {
        if !link.is_empty() && !links.iter().any(|l| l == link) {
            links.push(link.clone());
        }
    }

    if let Some(site) = entity.website() {
        if site != canonical_url && !links.iter().any(|l| l == site) {
            links.push(site.to_string());
        }
    }

    links
}
