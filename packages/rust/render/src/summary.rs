//! Per-entity `llms.txt` machine summary.
//!
//! The plain-text counterpart of the detail page: same information, headings
//! instead of markup, line-oriented `key: value` rows and bulleted lists.

use crate::{EntityContent, RenderContext};

/// Render the machine summary for one entity.
pub fn render_summary(content: &EntityContent<'_>, ctx: &RenderContext) -> String {
    let entity = content.entity;
    let site = &ctx.site;

    let mut out = String::new();

    match entity.alternate_name() {
        Some(alt) => out.push_str(&format!("# {} ({alt})\n", entity.name())),
        None => out.push_str(&format!("# {}\n", entity.name())),
    }
    out.push_str(&format!("\n> {}\n", content.description));

    // Basic information — only lines whose value exists.
    out.push_str("\n## Basic information\n");
    match entity.label() {
        Some(label) => out.push_str(&format!(
            "- Kind: {} ({label})\n",
            entity.kind().as_str()
        )),
        None => out.push_str(&format!("- Kind: {}\n", entity.kind().as_str())),
    }
    if !entity.location_line().is_empty() {
        out.push_str(&format!("- Location: {}\n", entity.location_line()));
    }
    if let Some(phone) = entity.phone() {
        out.push_str(&format!("- Phone: {phone}\n"));
    }
    if let Some(email) = entity.email() {
        out.push_str(&format!("- Email: {email}\n"));
    }
    if let Some(website) = entity.website() {
        out.push_str(&format!("- Website: {website}\n"));
    }
    if !entity.hours().is_empty() {
        out.push_str(&format!("- Hours: {}\n", entity.hours().join(", ")));
    }
    if let Some(price) = entity.price_range() {
        out.push_str(&format!("- Price range: {price}\n"));
    }
    if let Some(coords) = entity.coordinates() {
        out.push_str(&format!("- Coordinates: {}, {}\n", coords.lat, coords.lng));
    }
    out.push_str(&format!(
        "- Detail page: {}\n",
        site.detail_url(entity.id())
    ));

    if !entity.keywords().is_empty() {
        out.push_str("\n## Keywords\n");
        for keyword in entity.keywords() {
            out.push_str(&format!("- {keyword}\n"));
        }
    }

    if let Some(reviews) = entity.reviews() {
        out.push_str("\n## Customer reviews\n");
        out.push_str(&format!("- Average rating: {}/5\n", reviews.rating));
        out.push_str(&format!("- Review count: {}\n", reviews.count));
        if let Some(source) = &reviews.source {
            out.push_str(&format!("- Source: {source}\n"));
        }
    }

    if !content.faq.is_empty() {
        out.push_str("\n## Frequently asked questions\n");
        for item in content.faq {
            out.push_str(&format!("\n### {}\n{}\n", item.question, item.answer));
        }
    }

    let social: Vec<(&String, &String)> = entity
        .social_links()
        .iter()
        .filter_map(|(channel, link)| link.as_ref().map(|l| (channel, l)))
        .collect();
    if !social.is_empty() {
        out.push_str("\n## Social links\n");
        for (channel, link) in social {
            out.push_str(&format!("- {channel}: {link}\n"));
        }
    }

    out.push_str(&format!(
        "\n---\nPart of the {} directory ({})\nLast updated: {}\n",
        site.site_name,
        site.root_url(),
        ctx.date_str()
    ));

    out
}
