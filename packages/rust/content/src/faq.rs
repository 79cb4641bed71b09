//! FAQ derivation.

use placepress_shared::{Entity, FaqItem};

use crate::description::area_fragment;

/// Derive the FAQ list for an entity.
///
/// A non-empty explicit FAQ is returned verbatim — generated items are never
/// merged in. Otherwise items are synthesized in fixed order: a location
/// question (always), a contact/booking question when a phone number exists,
/// and a recommendation question when the entity has more than two keywords.
pub fn derive_faq(entity: &Entity) -> Vec<FaqItem> {
    if !entity.faq().is_empty() {
        return entity.faq().to_vec();
    }

    let name = entity.name();
    let location = entity.location_line();
    let mut items = Vec::with_capacity(3);

    // 1. Location — always present, always first.
    let mut answer = if location.is_empty() {
        format!("{name} serves customers locally; contact them directly for an exact address.")
    } else {
        format!("{name} is located at {location}.")
    };
    if let Some(phone) = entity.phone() {
        answer.push_str(&format!(" Call {phone} for directions."));
    }
    items.push(FaqItem {
        question: format!("Where is {name} located?"),
        answer,
    });

    // 2. Contact/booking — only when a phone number exists.
    if let Some(phone) = entity.phone() {
        let mut answer = format!("Call {phone} to ask a question or make a booking.");
        if let Some(url) = entity.website() {
            answer.push_str(&format!(" More details are available at {url}."));
        }
        items.push(FaqItem {
            question: format!("How do I contact or book {name}?"),
            answer,
        });
    }

    // 3. Recommendation — only with more than two keywords.
    if entity.keywords().len() > 2 {
        let area = area_fragment(location);
        let top_three = entity
            .keywords()
            .iter()
            .take(3)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        let question = if area.is_empty() {
            format!("Is {name} recommended nearby?")
        } else {
            format!("What do locals recommend near {area}?")
        };

        let mut answer = format!("{name} is a popular choice for {top_three}.");
        if !location.is_empty() {
            answer.push_str(&format!(" You can find it at {location}."));
        }
        items.push(FaqItem { question, answer });
    }

    items
}
