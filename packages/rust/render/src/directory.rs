//! Aggregate directory documents: the site index page and the directory-wide
//! `llms.txt`.

use placepress_schema::{organization_schema, to_embeddable_json};
use placepress_shared::EntityKind;

use crate::escape::escape_html;
use crate::{EntityContent, RenderContext};

/// Maximum characters of a description shown on a directory card.
const PREVIEW_CHARS: usize = 80;

/// Render the aggregate directory page.
///
/// One compact card per entity, grouped under kind headings when both kinds
/// are present. The caller passes exactly the set of published entities.
pub fn render_directory(entries: &[EntityContent<'_>], ctx: &RenderContext) -> String {
    let site = &ctx.site;
    let org_json = to_embeddable_json(&organization_schema(site));

    let kinds = [EntityKind::Business, EntityKind::Freelancer];
    let present: Vec<EntityKind> = kinds
        .into_iter()
        .filter(|k| entries.iter().any(|e| e.entity.kind() == *k))
        .collect();

    let grid = if present.len() > 1 {
        present
            .iter()
            .map(|kind| {
                let cards = cards_for(entries, Some(*kind), ctx);
                format!(
                    "    <h2 class=\"group\">{}</h2>\n    <div class=\"grid\">\n{cards}    </div>\n",
                    kind.group_heading()
                )
            })
            .collect::<String>()
    } else {
        format!(
            "    <div class=\"grid\">\n{}    </div>\n",
            cards_for(entries, None, ctx)
        )
    };

    let site_name = escape_html(&site.site_name);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{site_name} | Local directory</title>
  <meta name="description" content="Official information directory of the businesses and freelancers listed on {site_name}.">
  <link rel="canonical" href="{root_url}">

  <script type="application/ld+json">
{org_json}
  </script>

  <style>
    :root {{ --primary: #2563eb; --bg: #0f172a; --card: #1e293b; }}
    * {{ margin: 0; padding: 0; box-sizing: border-box; }}
    body {{ font-family: -apple-system, BlinkMacSystemFont, sans-serif; color: #e2e8f0; background: var(--bg); }}
    .header {{ text-align: center; padding: 3rem 1rem 2rem; }}
    .header h1 {{ font-size: 2rem; color: white; }}
    .stats {{ display: flex; justify-content: center; gap: 2rem; margin: 1.5rem 0; }}
    .stat-num {{ font-size: 2rem; font-weight: 700; color: var(--primary); text-align: center; }}
    .stat-label {{ font-size: 0.85rem; color: #64748b; }}
    .group {{ max-width: 900px; margin: 1.5rem auto 0.5rem; padding: 0 1rem; color: white; }}
    .grid {{ max-width: 900px; margin: 0 auto; padding: 0 1rem 1.5rem; display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 1rem; }}
    .entity-card {{ background: var(--card); border-radius: 12px; padding: 1.5rem; text-decoration: none; color: #e2e8f0; display: block; }}
    .entity-label {{ display: inline-block; background: rgba(37,99,235,0.2); color: var(--primary); padding: 0.15rem 0.6rem; border-radius: 12px; font-size: 0.8rem; margin-bottom: 0.5rem; }}
    .entity-card h3 {{ font-size: 1.15rem; margin-bottom: 0.3rem; color: white; }}
    .entity-location {{ color: #94a3b8; font-size: 0.85rem; }}
    .entity-desc {{ color: #64748b; font-size: 0.85rem; margin-top: 0.5rem; line-height: 1.5; }}
    .entity-rating {{ color: #f59e0b; margin-top: 0.5rem; font-size: 0.9rem; }}
    .footer {{ text-align: center; padding: 2rem; color: #475569; font-size: 0.8rem; }}
    .footer a {{ color: #64748b; }}
  </style>
</head>
<body>
  <div class="header">
    <h1>{site_name}</h1>
    <div class="stats">
      <div>
        <div class="stat-num">{count}</div>
        <div class="stat-label">Listings</div>
      </div>
    </div>
  </div>

{grid}
  <div class="footer">
    <p><a href="llms.txt">llms.txt</a> · <a href="sitemap.xml">sitemap.xml</a></p>
    <p>Last updated: {date}</p>
  </div>
</body>
</html>
"#,
        root_url = escape_html(&site.root_url()),
        count = entries.len(),
        date = ctx.date_str(),
    )
}

fn cards_for(
    entries: &[EntityContent<'_>],
    kind: Option<EntityKind>,
    ctx: &RenderContext,
) -> String {
    entries
        .iter()
        .filter(|e| kind.is_none_or(|k| e.entity.kind() == k))
        .map(|e| card(e, ctx))
        .collect()
}

fn card(entry: &EntityContent<'_>, ctx: &RenderContext) -> String {
    let entity = entry.entity;

    let label_chip = entity
        .label()
        .map(|l| format!("        <div class=\"entity-label\">{}</div>\n", escape_html(l)))
        .unwrap_or_default();

    let location_line = if entity.location_line().is_empty() {
        String::new()
    } else {
        format!(
            "        <p class=\"entity-location\">{}</p>\n",
            escape_html(entity.location_line())
        )
    };

    let rating_line = entity
        .reviews()
        .map(|r| {
            format!(
                "        <p class=\"entity-rating\">★ {} ({})</p>\n",
                r.rating, r.count
            )
        })
        .unwrap_or_default();

    format!(
        "      <a href=\"{href}\" class=\"entity-card\">\n{label_chip}        <h3>{name}</h3>\n{location_line}        <p class=\"entity-desc\">{preview}</p>\n{rating_line}      </a>\n",
        href = escape_html(&ctx.site.detail_url(entity.id())),
        name = escape_html(entity.name()),
        preview = escape_html(&preview(entry.description)),
    )
}

/// Trim a description to the card preview length on a char boundary.
fn preview(description: &str) -> String {
    let mut out: String = description.chars().take(PREVIEW_CHARS).collect();
    if description.chars().count() > PREVIEW_CHARS {
        out.push('…');
    }
    out
}

/// Render the directory-wide `llms.txt`: one block per published entity with
/// links to its detail page and machine summary.
pub fn render_directory_summary(entries: &[EntityContent<'_>], ctx: &RenderContext) -> String {
    let site = &ctx.site;
    let mut out = String::new();

    out.push_str(&format!("# {}\n", site.site_name));
    out.push_str(&format!(
        "\n> Official information directory for the businesses and freelancers listed on {}.\n\
         > Each listing has its own llms.txt with full details.\n",
        site.site_name
    ));

    out.push_str("\n## Listings\n");
    for entry in entries {
        let entity = entry.entity;
        match entity.alternate_name() {
            Some(alt) => out.push_str(&format!("\n### {} ({alt})\n", entity.name())),
            None => out.push_str(&format!("\n### {}\n", entity.name())),
        }
        if let Some(label) = entity.label() {
            out.push_str(&format!("- Category: {label}\n"));
        }
        if !entity.location_line().is_empty() {
            out.push_str(&format!("- Location: {}\n", entity.location_line()));
        }
        out.push_str(&format!("- Page: {}\n", site.detail_url(entity.id())));
        out.push_str(&format!("- Details: {}\n", site.summary_url(entity.id())));
        if let Some(website) = entity.website() {
            out.push_str(&format!("- Website: {website}\n"));
        }
    }

    out.push_str(&format!(
        "\n---\nTotal listings: {}\nLast updated: {}\n",
        entries.len(),
        ctx.date_str()
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use placepress_shared::{AppConfig, Business, Entity, Freelancer, SiteConfig};

    fn ctx() -> RenderContext {
        let mut config = AppConfig::default();
        config.site.domain = "places.example.com".into();
        config.site.name = "Harborview Places".into();
        let site = SiteConfig::resolve(&config, None).expect("resolve site");
        RenderContext::new(site, NaiveDate::from_ymd_opt(2026, 2, 19).expect("date"))
    }

    fn business(id: &str, name: &str) -> Entity {
        let biz: Business = serde_json::from_str(&format!(
            r#"{{"id":"{id}","name":"{name}","category":"shop","address":"1 Main St"}}"#
        ))
        .expect("test business");
        Entity::from(biz)
    }

    fn freelancer(id: &str, name: &str) -> Entity {
        let fl: Freelancer = serde_json::from_str(&format!(
            r#"{{"id":"{id}","name":"{name}","title":"consultant","region":"Harborview"}}"#
        ))
        .expect("test freelancer");
        Entity::from(fl)
    }

    #[test]
    fn directory_lists_every_entry_exactly_once() {
        let a = business("a", "Acme");
        let b = business("b", "Bolt");
        let entries = vec![
            EntityContent { entity: &a, description: "Acme desc", faq: &[] },
            EntityContent { entity: &b, description: "Bolt desc", faq: &[] },
        ];
        let html = render_directory(&entries, &ctx());

        assert_eq!(html.matches("class=\"entity-card\"").count(), 2);
        assert!(html.contains("href=\"https://places.example.com/places/a/\""));
        assert!(html.contains("href=\"https://places.example.com/places/b/\""));
        assert!(html.contains("<div class=\"stat-num\">2</div>"));
        // Single kind: no group headings
        assert!(!html.contains("class=\"group\""));
    }

    #[test]
    fn mixed_kinds_are_grouped() {
        let a = business("a", "Acme");
        let f = freelancer("jin", "Jin Park");
        let entries = vec![
            EntityContent { entity: &a, description: "d", faq: &[] },
            EntityContent { entity: &f, description: "d", faq: &[] },
        ];
        let html = render_directory(&entries, &ctx());

        assert!(html.contains(">Businesses</h2>"));
        assert!(html.contains(">Freelancers</h2>"));
    }

    #[test]
    fn long_descriptions_are_trimmed_on_char_boundary() {
        let long = "가나다라마".repeat(30); // multi-byte chars, 150 total
        let a = business("a", "Acme");
        let entries = vec![EntityContent { entity: &a, description: &long, faq: &[] }];
        let html = render_directory(&entries, &ctx());

        let expected: String = long.chars().take(80).collect();
        assert!(html.contains(&format!("{expected}…")));
    }

    #[test]
    fn directory_summary_links_detail_and_summary_docs() {
        let a = business("a", "Acme");
        let entries = vec![EntityContent { entity: &a, description: "d", faq: &[] }];
        let text = render_directory_summary(&entries, &ctx());

        assert!(text.starts_with("# Harborview Places\n"));
        assert!(text.contains("### Acme\n"));
        assert!(text.contains("- Page: https://places.example.com/places/a/"));
        assert!(text.contains("- Details: https://places.example.com/places/a/llms.txt"));
        assert!(text.contains("Total listings: 1"));
    }
}
