//! Description derivation.

use placepress_shared::Entity;

/// The neighborhood-level fragment of a location line: its first two
/// whitespace tokens. Empty when the entity has no location.
pub(crate) fn area_fragment(location: &str) -> String {
    location
        .split_whitespace()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Derive a description for an entity.
///
/// An explicit description is returned verbatim. Otherwise a sentence is
/// composed from the location fragment, the category/title, the name, up to
/// four keywords, and the full location line. Absent optional fields collapse
/// to empty fragments; the result is always non-empty.
pub fn derive_description(entity: &Entity) -> String {
    if let Some(explicit) = entity.description() {
        return explicit.to_string();
    }

    let name = entity.name();
    let location = entity.location_line();
    let area = area_fragment(location);
    let label = entity.label().filter(|l| !l.is_empty());

    let mut sentences: Vec<String> = Vec::new();

    match (label, area.is_empty()) {
        (Some(label), false) => sentences.push(format!("{name} is a {label} in {area}")),
        (Some(label), true) => sentences.push(format!("{name} is a {label}")),
        (None, false) => sentences.push(format!("{name} is located in {area}")),
        (None, true) => sentences.push(name.to_string()),
    }

    let keywords = entity
        .keywords()
        .iter()
        .take(4)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if !keywords.is_empty() {
        sentences.push(format!("Known for {keywords}"));
    }

    if !location.is_empty() {
        sentences.push(format!("Find it at {location}"));
    }

    let mut out = sentences.join(". ");
    out.push('.');
    out
}
