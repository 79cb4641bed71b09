//! Sitemap rendering.
//!
//! One entry per published URL: the root, the directory summary, each
//! entity's detail page, and each entity's machine summary. Priorities
//! descend from the root; `lastmod` is the build date.

use crate::escape::escape_html;
use crate::RenderContext;

/// Render `sitemap.xml` for the published entity ids.
pub fn render_sitemap(ids: &[&str], ctx: &RenderContext) -> String {
    let site = &ctx.site;

    let mut urls: Vec<(String, &'static str)> = vec![
        (site.root_url(), "1.0"),
        (site.directory_summary_url(), "0.8"),
    ];
    urls.extend(ids.iter().map(|id| (site.detail_url(id), "0.9")));
    urls.extend(ids.iter().map(|id| (site.summary_url(id), "0.7")));

    let date = ctx.date_str();
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for (loc, priority) in urls {
        out.push_str(&format!(
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{date}</lastmod>\n    <changefreq>weekly</changefreq>\n    <priority>{priority}</priority>\n  </url>\n",
            escape_html(&loc)
        ));
    }
    out.push_str("</urlset>\n");
    out
}
