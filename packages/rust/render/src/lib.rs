//! Document renderers for placepress.
//!
//! Every output document is assembled here as a pure function of the entity
//! collection, its derived content, and a [`RenderContext`]: per-entity HTML
//! detail pages and `llms.txt` summaries, the aggregate directory page and
//! directory summary, the sitemap, and the robots policy. Rendering performs
//! no I/O and is deterministic for a fixed build date.

mod detail;
mod directory;
mod escape;
mod robots;
mod sitemap;
mod summary;

use chrono::NaiveDate;
use placepress_shared::{Entity, FaqItem, SiteConfig};

pub use detail::render_detail;
pub use directory::{render_directory, render_directory_summary};
pub use escape::escape_html;
pub use robots::render_robots;
pub use sitemap::render_sitemap;
pub use summary::render_summary;

/// Build-wide inputs shared by every renderer.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub site: SiteConfig,
    /// Calendar date stamped into footers, sitemap `lastmod`, and reports.
    /// Injected so a fixed date reproduces byte-identical output.
    pub build_date: NaiveDate,
}

impl RenderContext {
    pub fn new(site: SiteConfig, build_date: NaiveDate) -> Self {
        Self { site, build_date }
    }

    /// The build date formatted as `YYYY-MM-DD`.
    pub fn date_str(&self) -> String {
        self.build_date.format("%Y-%m-%d").to_string()
    }
}

/// One entity together with its derived narrative content.
///
/// The pipeline derives description and FAQ once per entity and hands the
/// same values to every renderer, so all documents for the entity agree.
#[derive(Debug, Clone, Copy)]
pub struct EntityContent<'a> {
    pub entity: &'a Entity,
    pub description: &'a str,
    pub faq: &'a [FaqItem],
}
