//! Per-entity HTML detail page.
//!
//! Embeds the Schema.org JSON-LD blocks for machine consumption and renders
//! the same information as human-readable sections: identity, contact rows,
//! hours, keyword badges, FAQ, and map-search links.

use placepress_schema::{entity_schema, faq_schema, to_embeddable_json};
use placepress_shared::Entity;

use crate::escape::{encode_query, escape_html};
use crate::{EntityContent, RenderContext};

/// Render the detail page for one entity.
pub fn render_detail(content: &EntityContent<'_>, ctx: &RenderContext) -> String {
    let entity = content.entity;
    let site = &ctx.site;

    let main_json = to_embeddable_json(&entity_schema(
        entity,
        content.description,
        content.faq,
        site,
    ));
    let faq_block = faq_schema(content.faq)
        .map(|s| {
            format!(
                "<script type=\"application/ld+json\">\n{}\n</script>\n",
                to_embeddable_json(&s)
            )
        })
        .unwrap_or_default();

    let name = escape_html(entity.name());
    let description = escape_html(content.description);
    let detail_url = escape_html(&site.detail_url(entity.id()));

    let title = match entity.label() {
        Some(label) => format!("{name} | {}", escape_html(label)),
        None => name.clone(),
    };

    let keywords_meta = if entity.keywords().is_empty() {
        String::new()
    } else {
        format!(
            "  <meta name=\"keywords\" content=\"{}\">\n",
            escape_html(&entity.keywords().join(", "))
        )
    };

    let subtitle = {
        let mut parts: Vec<String> = Vec::new();
        if let Some(alt) = entity.alternate_name() {
            parts.push(escape_html(alt));
        }
        if let Some(label) = entity.label() {
            parts.push(escape_html(label));
        }
        if parts.is_empty() {
            String::new()
        } else {
            format!("      <p class=\"subtitle\">{}</p>\n", parts.join(" · "))
        }
    };

    let rating_line = entity
        .reviews()
        .map(|r| {
            format!(
                "      <p class=\"rating\">★ {} <span class=\"muted\">({} reviews)</span></p>\n",
                r.rating, r.count
            )
        })
        .unwrap_or_default();

    let mut info_rows = String::new();
    let location_label = match entity.kind() {
        placepress_shared::EntityKind::Business => "Address",
        placepress_shared::EntityKind::Freelancer => "Region",
    };
    if !entity.location_line().is_empty() {
        info_rows.push_str(&info_row(
            location_label,
            &escape_html(entity.location_line()),
        ));
    }
    if let Some(phone) = entity.phone() {
        let escaped = escape_html(phone);
        info_rows.push_str(&info_row(
            "Phone",
            &format!("<a href=\"tel:{escaped}\">{escaped}</a>"),
        ));
    }
    if let Some(email) = entity.email() {
        let escaped = escape_html(email);
        info_rows.push_str(&info_row(
            "Email",
            &format!("<a href=\"mailto:{escaped}\">{escaped}</a>"),
        ));
    }
    if let Some(website) = entity.website() {
        let escaped = escape_html(website);
        info_rows.push_str(&info_row(
            "Website",
            &format!("<a href=\"{escaped}\" target=\"_blank\" rel=\"noopener\">{escaped}</a>"),
        ));
    }
    if !entity.hours().is_empty() {
        let hours = entity
            .hours()
            .iter()
            .map(|h| escape_html(h))
            .collect::<Vec<_>>()
            .join("<br>");
        info_rows.push_str(&info_row("Hours", &hours));
    }
    if let Some(price) = entity.price_range() {
        info_rows.push_str(&info_row("Price range", &escape_html(price)));
    }

    let badges_card = if entity.keywords().is_empty() {
        String::new()
    } else {
        let badges = entity
            .keywords()
            .iter()
            .map(|k| format!("<span class=\"badge\">{}</span>", escape_html(k)))
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "    <div class=\"card\">\n      <h2>Keywords</h2>\n      <p>{badges}</p>\n    </div>\n"
        )
    };

    let faq_card = if content.faq.is_empty() {
        String::new()
    } else {
        let items = content
            .faq
            .iter()
            .map(|item| {
                format!(
                    "      <div class=\"faq-item\">\n        <h3>{}</h3>\n        <p>{}</p>\n      </div>",
                    escape_html(&item.question),
                    escape_html(&item.answer)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "    <div class=\"card\">\n      <h2>Frequently asked questions</h2>\n{items}\n    </div>\n"
        )
    };

    let map_items = map_links(entity)
        .into_iter()
        .map(|(provider, url)| {
            format!(
                "        <li><a href=\"{}\" target=\"_blank\" rel=\"noopener\">{provider}</a></li>",
                escape_html(&url)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <meta name="description" content="{description}">
{keywords_meta}  <link rel="canonical" href="{detail_url}">

  <meta property="og:title" content="{name}">
  <meta property="og:description" content="{description}">
  <meta property="og:type" content="business.business">
  <meta property="og:url" content="{detail_url}">

  <script type="application/ld+json">
{main_json}
  </script>
  {faq_block}
  <style>
    :root {{ --primary: #2563eb; --text: #1f2937; --bg: #f9fafb; --card: #ffffff; }}
    * {{ margin: 0; padding: 0; box-sizing: border-box; }}
    body {{ font-family: -apple-system, BlinkMacSystemFont, sans-serif; color: var(--text); background: var(--bg); line-height: 1.7; }}
    .container {{ max-width: 720px; margin: 0 auto; padding: 2rem 1rem; }}
    .card {{ background: var(--card); border-radius: 12px; padding: 2rem; margin-bottom: 1.5rem; box-shadow: 0 1px 3px rgba(0,0,0,0.08); }}
    h1 {{ font-size: 1.8rem; margin-bottom: 0.5rem; }}
    h2 {{ font-size: 1.3rem; margin-bottom: 1rem; color: var(--primary); border-bottom: 2px solid var(--primary); padding-bottom: 0.3rem; }}
    h3 {{ font-size: 1.05rem; margin-bottom: 0.3rem; color: var(--primary); }}
    .subtitle, .muted {{ color: #6b7280; }}
    .rating {{ color: #f59e0b; }}
    .badge {{ display: inline-block; background: var(--primary); color: white; padding: 0.2rem 0.8rem; border-radius: 20px; font-size: 0.85rem; margin: 0 0.3rem 0.3rem 0; }}
    .info-row {{ padding: 0.5rem 0; border-bottom: 1px solid #f0f0f0; }}
    .info-label {{ font-weight: 600; color: #6b7280; font-size: 0.9rem; }}
    .faq-item {{ padding: 1rem 0; border-bottom: 1px solid #f0f0f0; }}
    .faq-item:last-child {{ border-bottom: none; }}
    .footer {{ text-align: center; padding: 2rem; color: #9ca3af; font-size: 0.8rem; }}
    a {{ color: var(--primary); text-decoration: none; }}
  </style>
</head>
<body>
  <div class="container">
    <div class="card">
      <h1>{name}</h1>
{subtitle}      <p>{description}</p>
{rating_line}    </div>

    <div class="card">
      <h2>Details</h2>
{info_rows}    </div>

{badges_card}{faq_card}    <div class="card">
      <h2>Find it on the map</h2>
      <ul>
{map_items}
      </ul>
    </div>

    <div class="footer">
      <p>Listed in the <a href="{root_url}">{site_name}</a> directory · <a href="llms.txt">llms.txt</a></p>
      <p>Last updated: {date}</p>
    </div>
  </div>
</body>
</html>
"#,
        root_url = escape_html(&site.root_url()),
        site_name = escape_html(&site.site_name),
        date = ctx.date_str(),
    )
}

fn info_row(label: &str, value_html: &str) -> String {
    format!(
        "      <div class=\"info-row\">\n        <span class=\"info-label\">{label}</span><br>\n        {value_html}\n      </div>\n"
    )
}

/// Map-search links for three external providers, keyed by name and location,
/// coordinate-precise when the record carries coordinates.
pub(crate) fn map_links(entity: &Entity) -> Vec<(&'static str, String)> {
    let query = {
        let q = format!("{} {}", entity.name(), entity.location_line());
        encode_query(q.trim())
    };

    let osm = match entity.coordinates() {
        Some(c) => format!(
            "https://www.openstreetmap.org/?mlat={lat}&mlon={lng}#map=18/{lat}/{lng}",
            lat = c.lat,
            lng = c.lng
        ),
        None => format!("https://www.openstreetmap.org/search?query={query}"),
    };

    vec![
        (
            "Google Maps",
            format!("https://www.google.com/maps/search/?api=1&query={query}"),
        ),
        ("Bing Maps", format!("https://www.bing.com/maps?q={query}")),
        ("OpenStreetMap", osm),
    ]
}
