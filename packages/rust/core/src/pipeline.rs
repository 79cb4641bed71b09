//! End-to-end build pipeline: load → derive → render → publish → notify.

use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use tracing::{info, instrument, warn};

use placepress_content::{derive_description, derive_faq};
use placepress_notify::{NotifyConfig, NotifyReport, extract_sitemap_urls, write_report};
use placepress_publish::publish;
use placepress_render::{
    EntityContent, RenderContext, render_detail, render_directory, render_directory_summary,
    render_robots, render_sitemap, render_summary,
};
use placepress_shared::{
    AppConfig, BuildId, Document, ENTITY_ROOT, Entity, EntityStatus, FaqItem, PlacepressError,
    Result, SiteConfig,
};

use crate::loader::{CatalogFormat, load_catalog};

// ---------------------------------------------------------------------------
// Build config & result
// ---------------------------------------------------------------------------

/// Configuration for one build run.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Path to the catalog file.
    pub catalog_path: PathBuf,
    /// Output directory for the generated site.
    pub output_dir: PathBuf,
    /// Catalog format (auto-sniffed by default).
    pub format: CatalogFormat,
    /// Application config (site identity, notify settings).
    pub app: AppConfig,
    /// Build date stamped into documents; fixed input → byte-identical output.
    pub build_date: NaiveDate,
    /// Publish entities regardless of status.
    pub include_inactive: bool,
    /// Run the notification step after publication.
    pub notify: bool,
}

/// Result of a completed build.
#[derive(Debug)]
pub struct BuildResult {
    /// Build identifier.
    pub build_id: BuildId,
    /// Output directory the site was written to.
    pub out_dir: PathBuf,
    /// Number of published entities.
    pub entity_count: usize,
    /// Number of documents written.
    pub document_count: usize,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
    /// Notification report, when the step ran.
    pub notify: Option<NotifyReport>,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when an entity's documents have been rendered.
    fn entity_rendered(&self, id: &str, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, result: &BuildResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn entity_rendered(&self, _id: &str, _current: usize, _total: usize) {}
    fn done(&self, _result: &BuildResult) {}
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run a full build.
///
/// 1. Load and validate the catalog
/// 2. Resolve the site identity
/// 3. Filter to publishable entities
/// 4. Derive content and render every document
/// 5. Publish to the output directory
/// 6. Optionally notify indexing endpoints (best-effort)
#[instrument(skip_all, fields(catalog = %config.catalog_path.display()))]
pub async fn build(config: &BuildConfig, progress: &dyn ProgressReporter) -> Result<BuildResult> {
    let start = Instant::now();
    let build_id = BuildId::new();

    info!(%build_id, "starting build");

    progress.phase("Loading catalog");
    let catalog = load_catalog(&config.catalog_path, config.format)?;

    let site = SiteConfig::resolve(&config.app, catalog.meta.as_ref())?;
    let ctx = RenderContext::new(site, config.build_date);

    // Status filtering affects only what gets published and listed; the
    // renderers themselves are status-agnostic.
    let published: Vec<&Entity> = catalog
        .entities
        .iter()
        .filter(|e| config.include_inactive || e.status() == EntityStatus::Active)
        .collect();

    let excluded = catalog.entities.len() - published.len();
    if excluded > 0 {
        info!(excluded, "entities excluded from publication by status");
    }

    progress.phase("Rendering documents");
    let documents = render_all(&published, &ctx, progress);

    progress.phase("Publishing");
    let publish_result = publish(&config.output_dir, &documents)?;

    let notify = if config.notify {
        progress.phase("Notifying search engines");
        Some(run_notification(config, &ctx).await?)
    } else {
        None
    };

    let result = BuildResult {
        build_id,
        out_dir: publish_result.out_dir,
        entity_count: published.len(),
        document_count: publish_result.documents.len(),
        elapsed: start.elapsed(),
        notify,
    };

    progress.done(&result);

    info!(
        build_id = %result.build_id,
        entities = result.entity_count,
        documents = result.document_count,
        elapsed_ms = result.elapsed.as_millis(),
        "build complete"
    );

    Ok(result)
}

/// Render every per-entity and aggregate document.
///
/// Derivation runs once per entity and the same values feed every renderer,
/// so the detail page, summary, and structured data always agree.
fn render_all(
    published: &[&Entity],
    ctx: &RenderContext,
    progress: &dyn ProgressReporter,
) -> Vec<Document> {
    let derived: Vec<(String, Vec<FaqItem>)> = published
        .iter()
        .map(|entity| (derive_description(entity), derive_faq(entity)))
        .collect();

    let contents: Vec<EntityContent<'_>> = published
        .iter()
        .zip(&derived)
        .map(|(&entity, (description, faq))| EntityContent {
            entity,
            description: description.as_str(),
            faq: faq.as_slice(),
        })
        .collect();

    let total = contents.len();
    let mut documents = Vec::with_capacity(total * 2 + 5);

    for (index, content) in contents.iter().enumerate() {
        let id = content.entity.id();
        documents.push(Document::new(
            format!("{ENTITY_ROOT}/{id}/index.html"),
            render_detail(content, ctx),
        ));
        documents.push(Document::new(
            format!("{ENTITY_ROOT}/{id}/llms.txt"),
            render_summary(content, ctx),
        ));
        progress.entity_rendered(id, index + 1, total);
    }

    documents.push(Document::new("index.html", render_directory(&contents, ctx)));
    documents.push(Document::new(
        "llms.txt",
        render_directory_summary(&contents, ctx),
    ));

    let ids: Vec<&str> = contents.iter().map(|c| c.entity.id()).collect();
    documents.push(Document::new("sitemap.xml", render_sitemap(&ids, ctx)));
    documents.push(Document::new("robots.txt", render_robots(ctx)));
    documents.push(Document::new(
        ctx.site.key_file_name(),
        ctx.site.indexnow_key.clone(),
    ));

    documents
}

/// Read back the published sitemap and run the best-effort notification step.
async fn run_notification(config: &BuildConfig, ctx: &RenderContext) -> Result<NotifyReport> {
    // Notify only ever sees persisted output, so a stale or hand-edited
    // sitemap is submitted exactly as published.
    let sitemap_path = config.output_dir.join("sitemap.xml");
    let sitemap = std::fs::read_to_string(&sitemap_path)
        .map_err(|e| PlacepressError::io(&sitemap_path, e))?;

    let urls = extract_sitemap_urls(&sitemap);
    let notify_config = NotifyConfig::resolve(&config.app.notify, &ctx.site);

    let report = placepress_notify::run(&notify_config, &urls, &ctx.date_str()).await;

    if let Err(e) = write_report(&report, &config.output_dir) {
        warn!(error = %e, "could not persist notification report");
    }

    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "pp-pipeline-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn build_config(dir: &Path, catalog_json: &str) -> BuildConfig {
        let catalog_path = dir.join("catalog.json");
        std::fs::write(&catalog_path, catalog_json).unwrap();

        let mut app = AppConfig::default();
        app.site.domain = "places.example.com".into();
        app.site.name = "Harborview Places".into();

        BuildConfig {
            catalog_path,
            output_dir: dir.join("site"),
            format: CatalogFormat::Auto,
            app,
            build_date: NaiveDate::from_ymd_opt(2026, 2, 19).unwrap(),
            include_inactive: false,
            notify: false,
        }
    }

    /// Collect all files under a directory as (relative path, content).
    fn snapshot(root: &Path) -> Vec<(String, String)> {
        let mut files = Vec::new();
        let mut pending = vec![root.to_path_buf()];
        while let Some(dir) = pending.pop() {
            for entry in std::fs::read_dir(&dir).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    pending.push(path);
                } else {
                    let rel = path
                        .strip_prefix(root)
                        .unwrap()
                        .to_string_lossy()
                        .replace('\\', "/");
                    files.push((rel, std::fs::read_to_string(&path).unwrap()));
                }
            }
        }
        files.sort();
        files
    }

    #[tokio::test]
    async fn minimal_entity_builds_full_site() {
        // Scenario A: one minimally-filled business, no description, no FAQ
        let tmp = temp_dir();
        let config = build_config(
            &tmp,
            r#"[{"id":"a","name":"Acme","address":"1 Main St","phone":"555-0100",
                "keywords":["x","y","z","w"]}]"#,
        );

        let result = build(&config, &SilentProgress).await.unwrap();
        assert_eq!(result.entity_count, 1);
        // 2 per entity + directory, llms.txt, sitemap, robots, key file
        assert_eq!(result.document_count, 7);

        let detail = std::fs::read_to_string(tmp.join("site/places/a/index.html")).unwrap();

        // Derived description is present and non-empty
        assert!(detail.contains("Acme is located in 1 Main"));
        // Exactly three derived FAQ questions: location, contact, recommendation
        assert_eq!(detail.matches("<div class=\"faq-item\">").count(), 3);
        assert!(detail.contains("Where is Acme located?"));
        assert!(detail.contains("How do I contact or book Acme?"));
        // At least three distinct map providers
        assert!(detail.contains("google.com/maps"));
        assert!(detail.contains("bing.com/maps"));
        assert!(detail.contains("openstreetmap.org"));

        let summary = std::fs::read_to_string(tmp.join("site/places/a/llms.txt")).unwrap();
        assert!(summary.contains("Acme is located in 1 Main"));

        // Key file carries the verification key
        let key = std::fs::read_to_string(tmp.join("site/placepress2026indexnow01.txt")).unwrap();
        assert_eq!(key, "placepress2026indexnow01");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn inactive_entities_are_unlisted_but_producible() {
        // Scenario B: the inactive entity vanishes from aggregates and from
        // the output tree, but the renderer still produces it on request.
        let tmp = temp_dir();
        let config = build_config(
            &tmp,
            r#"{"businesses":[
                {"id":"live","name":"Live Shop","address":"1 Main St"},
                {"id":"gone","name":"Gone Shop","address":"2 Main St","status":"inactive"}
            ]}"#,
        );

        build(&config, &SilentProgress).await.unwrap();

        let directory = std::fs::read_to_string(tmp.join("site/index.html")).unwrap();
        let sitemap = std::fs::read_to_string(tmp.join("site/sitemap.xml")).unwrap();

        assert!(directory.contains("Live Shop"));
        assert!(!directory.contains("Gone Shop"));
        assert!(sitemap.contains("/places/live/"));
        assert!(!sitemap.contains("/places/gone/"));
        assert!(!tmp.join("site/places/gone").exists());

        // Direct rendering is status-agnostic
        let gone: placepress_shared::Business = serde_json::from_str(
            r#"{"id":"gone","name":"Gone Shop","address":"2 Main St","status":"inactive"}"#,
        )
        .unwrap();
        let entity = Entity::from(gone);
        let description = derive_description(&entity);
        let faq = derive_faq(&entity);
        let site = SiteConfig::resolve(&config.app, None).unwrap();
        let ctx = RenderContext::new(site, config.build_date);
        let html = render_detail(
            &EntityContent {
                entity: &entity,
                description: &description,
                faq: &faq,
            },
            &ctx,
        );
        assert!(html.contains("Gone Shop"));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn empty_catalog_aborts_before_output() {
        // Scenario C
        let tmp = temp_dir();
        let config = build_config(&tmp, r#"{"businesses":[]}"#);

        let err = build(&config, &SilentProgress).await.unwrap_err();
        assert!(err.to_string().contains("no entities"));
        assert!(!config.output_dir.exists());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn rebuild_is_byte_identical() {
        let tmp = temp_dir();
        let config = build_config(
            &tmp,
            r#"{"meta":{"domain":"places.example.com"},
                "businesses":[
                  {"id":"a","name":"Acme","address":"1 Main St","keywords":["x","y","z"]},
                  {"id":"b","name":"Bolt","address":"2 Main St","phone":"555-0101"}
                ],
                "freelancers":[
                  {"id":"jin","name":"Jin Park","title":"Photographer","region":"Harborview"}
                ]}"#,
        );

        build(&config, &SilentProgress).await.unwrap();
        let first = snapshot(&config.output_dir);

        build(&config, &SilentProgress).await.unwrap();
        let second = snapshot(&config.output_dir);

        assert_eq!(first, second);
        assert!(!first.is_empty());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn sitemap_round_trips_with_published_documents() {
        let tmp = temp_dir();
        let config = build_config(
            &tmp,
            r#"{"businesses":[
                {"id":"a","name":"Acme","address":"1 Main St"},
                {"id":"b","name":"Bolt","address":"2 Main St"}
            ]}"#,
        );

        build(&config, &SilentProgress).await.unwrap();

        let sitemap = std::fs::read_to_string(tmp.join("site/sitemap.xml")).unwrap();
        let urls = placepress_notify::extract_sitemap_urls(&sitemap);

        // Every sitemap URL corresponds to exactly one produced document
        let base = "https://places.example.com/";
        for url in &urls {
            let rel = url.strip_prefix(base).unwrap();
            let path = if rel.is_empty() || rel.ends_with('/') {
                tmp.join("site").join(rel).join("index.html")
            } else {
                tmp.join("site").join(rel)
            };
            assert!(path.exists(), "sitemap URL {url} has no document at {path:?}");
        }

        // Every per-entity document corresponds to exactly one sitemap entry
        for id in ["a", "b"] {
            assert_eq!(
                urls.iter()
                    .filter(|u| u.ends_with(&format!("/places/{id}/")))
                    .count(),
                1
            );
            assert_eq!(
                urls.iter()
                    .filter(|u| u.ends_with(&format!("/places/{id}/llms.txt")))
                    .count(),
                1
            );
        }

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn stale_entities_are_swept_on_rebuild() {
        let tmp = temp_dir();
        let config = build_config(
            &tmp,
            r#"{"businesses":[
                {"id":"a","name":"Acme","address":"1 Main St"},
                {"id":"b","name":"Bolt","address":"2 Main St"}
            ]}"#,
        );
        build(&config, &SilentProgress).await.unwrap();
        assert!(tmp.join("site/places/b/index.html").exists());

        // Record "b" is removed from the catalog
        let config = build_config(
            &tmp,
            r#"{"businesses":[{"id":"a","name":"Acme","address":"1 Main St"}]}"#,
        );
        build(&config, &SilentProgress).await.unwrap();

        assert!(tmp.join("site/places/a/index.html").exists());
        assert!(!tmp.join("site/places/b").exists());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn export_and_static_formats_share_one_pipeline() {
        let tmp = temp_dir();
        let config = build_config(
            &tmp,
            r#"[{"id":"a","name":"Acme","address":"1 Main St"}]"#,
        );

        let result = build(&config, &SilentProgress).await.unwrap();
        assert_eq!(result.entity_count, 1);
        assert!(tmp.join("site/places/a/index.html").exists());

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
