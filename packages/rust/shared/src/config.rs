//! Application configuration for placepress.
//!
//! Config lives in `placepress.toml` in the working directory, next to the
//! catalog it builds. CLI flags override config file values, which override
//! defaults; the site domain may also come from the catalog's own metadata.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{PlacepressError, Result};
use crate::types::CatalogMeta;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "placepress.toml";

/// Root path segment under which all entity-scoped documents live.
pub const ENTITY_ROOT: &str = "places";

// ---------------------------------------------------------------------------
// Config structs (matching placepress.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Site identity.
    #[serde(default)]
    pub site: SiteSection,

    /// Indexing-notification settings.
    #[serde(default)]
    pub notify: NotifySection,

    /// Build defaults.
    #[serde(default)]
    pub defaults: DefaultsSection,
}

/// `[site]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSection {
    /// Host the site is published under (e.g. `places.example.com`).
    /// May be left empty and supplied by the catalog's `meta.domain`.
    #[serde(default)]
    pub domain: String,

    /// Display name for the directory. Falls back to the catalog's
    /// `meta.siteName`, then to the domain.
    #[serde(default)]
    pub name: String,

    /// IndexNow verification key; also the name of the published key file.
    #[serde(default = "default_indexnow_key")]
    pub indexnow_key: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            domain: String::new(),
            name: String::new(),
            indexnow_key: default_indexnow_key(),
        }
    }
}

fn default_indexnow_key() -> String {
    "placepress2026indexnow01".into()
}

/// `[notify]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifySection {
    /// IndexNow submission endpoint.
    #[serde(default = "default_indexnow_endpoint")]
    pub indexnow_endpoint: String,

    /// Sitemap ping endpoints; each receives `?sitemap=<url>`.
    #[serde(default = "default_ping_endpoints")]
    pub ping_endpoints: Vec<String>,

    /// Per-request timeout in seconds for outbound notification calls.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for NotifySection {
    fn default() -> Self {
        Self {
            indexnow_endpoint: default_indexnow_endpoint(),
            ping_endpoints: default_ping_endpoints(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_indexnow_endpoint() -> String {
    "https://api.indexnow.org/indexnow".into()
}
fn default_ping_endpoints() -> Vec<String> {
    vec![
        "https://www.google.com/ping".into(),
        "https://www.bing.com/ping".into(),
    ]
}
fn default_timeout_secs() -> u64 {
    10
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsSection {
    /// Default output directory for the generated site.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Catalog format: `auto`, `export`, or `static`.
    #[serde(default = "default_format")]
    pub format: String,

    /// Publish entities regardless of status.
    #[serde(default)]
    pub include_inactive: bool,
}

impl Default for DefaultsSection {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            format: default_format(),
            include_inactive: false,
        }
    }
}

fn default_output_dir() -> String {
    "site".into()
}
fn default_format() -> String {
    "auto".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the application config from `./placepress.toml`.
/// Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = PathBuf::from(CONFIG_FILE_NAME);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| PlacepressError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        PlacepressError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Write a default config file to `./placepress.toml`.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let path = PathBuf::from(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| PlacepressError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| PlacepressError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

// ---------------------------------------------------------------------------
// Site config (runtime, resolved from config + catalog metadata)
// ---------------------------------------------------------------------------

/// Resolved site identity, passed explicitly into every component.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Canonical base URL, always with a trailing slash (e.g. `https://places.example.com/`).
    pub base_url: Url,
    /// Bare host, as submitted to IndexNow.
    pub host: String,
    /// Display name for the directory.
    pub site_name: String,
    /// IndexNow verification key.
    pub indexnow_key: String,
}

impl SiteConfig {
    /// Resolve the site identity from config and optional catalog metadata.
    ///
    /// Fails when no domain is configured anywhere — a build cannot produce
    /// canonical URLs without one.
    pub fn resolve(config: &AppConfig, meta: Option<&CatalogMeta>) -> Result<Self> {
        let domain = if !config.site.domain.is_empty() {
            config.site.domain.clone()
        } else {
            meta.and_then(|m| m.domain.clone()).ok_or_else(|| {
                PlacepressError::config(
                    "no site domain configured: set [site].domain in placepress.toml \
                     or meta.domain in the catalog",
                )
            })?
        };

        let base_url = Url::parse(&format!("https://{domain}/"))
            .map_err(|e| PlacepressError::config(format!("invalid site domain '{domain}': {e}")))?;

        let host = base_url
            .host_str()
            .ok_or_else(|| {
                PlacepressError::config(format!("site domain '{domain}' has no host"))
            })?
            .to_string();

        let site_name = if !config.site.name.is_empty() {
            config.site.name.clone()
        } else {
            meta.and_then(|m| m.site_name.clone())
                .unwrap_or_else(|| host.clone())
        };

        Ok(Self {
            base_url,
            host,
            site_name,
            indexnow_key: config.site.indexnow_key.clone(),
        })
    }

    fn abs(&self, rel: &str) -> String {
        format!("{}{rel}", self.base_url)
    }

    /// Canonical URL of the directory root.
    pub fn root_url(&self) -> String {
        self.base_url.to_string()
    }

    /// Canonical URL of an entity's detail page.
    pub fn detail_url(&self, id: &str) -> String {
        self.abs(&format!("{ENTITY_ROOT}/{id}/"))
    }

    /// Canonical URL of an entity's machine summary.
    pub fn summary_url(&self, id: &str) -> String {
        self.abs(&format!("{ENTITY_ROOT}/{id}/llms.txt"))
    }

    /// Canonical URL of the directory-wide machine summary.
    pub fn directory_summary_url(&self) -> String {
        self.abs("llms.txt")
    }

    /// Canonical URL of the sitemap.
    pub fn sitemap_url(&self) -> String {
        self.abs("sitemap.xml")
    }

    /// File name of the IndexNow verification key file.
    pub fn key_file_name(&self) -> String {
        format!("{}.txt", self.indexnow_key)
    }

    /// Canonical URL of the IndexNow verification key file.
    pub fn key_file_url(&self) -> String {
        let name = self.key_file_name();
        self.abs(&name)
    }
}
