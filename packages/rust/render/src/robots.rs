//! Crawler policy document.

use crate::RenderContext;

/// Known crawler identities that get an explicit allow stanza, on top of the
/// default allow-all rule. Covers the major search engines and LLM crawlers.
const ALLOWED_CRAWLERS: &[(&str, &[&str])] = &[
    ("Google", &["Googlebot"]),
    ("Google AI", &["Google-Extended"]),
    ("OpenAI", &["GPTBot", "ChatGPT-User"]),
    ("Anthropic", &["ClaudeBot", "anthropic-ai"]),
    ("Microsoft", &["bingbot"]),
    ("Perplexity", &["PerplexityBot"]),
    ("Naver", &["Yeti"]),
    ("Common Crawl", &["CCBot"]),
];

/// Render `robots.txt`: default allow-all, explicit allow entries for the
/// known crawler list, and the sitemap's absolute URL.
pub fn render_robots(ctx: &RenderContext) -> String {
    let mut out = format!(
        "# {} — robots.txt\n# All search engines and LLM crawlers are welcome.\n\nUser-agent: *\nAllow: /\n",
        ctx.site.host
    );

    for (label, agents) in ALLOWED_CRAWLERS {
        out.push_str(&format!("\n# {label}\n"));
        for agent in *agents {
            out.push_str(&format!("User-agent: {agent}\nAllow: /\n"));
        }
    }

    out.push_str(&format!("\nSitemap: {}\n", ctx.site.sitemap_url()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use placepress_shared::{AppConfig, SiteConfig};

    fn ctx() -> RenderContext {
        let mut config = AppConfig::default();
        config.site.domain = "places.example.com".into();
        let site = SiteConfig::resolve(&config, None).expect("resolve site");
        RenderContext::new(site, NaiveDate::from_ymd_opt(2026, 2, 19).expect("date"))
    }

    #[test]
    fn robots_allows_everyone_and_names_known_crawlers() {
        let robots = render_robots(&ctx());

        assert!(robots.starts_with("# places.example.com"));
        assert!(robots.contains("User-agent: *\nAllow: /"));
        for agent in [
            "Googlebot",
            "Google-Extended",
            "GPTBot",
            "ChatGPT-User",
            "ClaudeBot",
            "anthropic-ai",
            "bingbot",
            "PerplexityBot",
            "Yeti",
            "CCBot",
        ] {
            assert!(
                robots.contains(&format!("User-agent: {agent}\nAllow: /")),
                "missing allow stanza for {agent}"
            );
        }
        assert!(robots.ends_with("Sitemap: https://places.example.com/sitemap.xml\n"));
    }
}
