//! Catalog loading.
//!
//! One loader handles both catalog shapes the site has been built from over
//! time: the dashboard export (an object with `meta`, `businesses`, and
//! `freelancers`) and the older hand-maintained static file (a bare array of
//! business records). Both produce the same [`Catalog`] and pass the same
//! validation, so the rest of the pipeline never cares where records came
//! from.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use placepress_shared::{
    Business, CatalogMeta, Entity, Freelancer, PlacepressError, Result, is_url_safe_id,
};

// ---------------------------------------------------------------------------
// Catalog format
// ---------------------------------------------------------------------------

/// Which catalog shape to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CatalogFormat {
    /// Sniff from the document's first byte: object → export, array → static.
    #[default]
    Auto,
    /// Dashboard export: `{ "meta": …, "businesses": […], "freelancers": […] }`.
    Export,
    /// Hand-maintained file: a bare array of business records.
    Static,
}

impl std::str::FromStr for CatalogFormat {
    type Err = PlacepressError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(Self::Auto),
            "export" => Ok(Self::Export),
            "static" => Ok(Self::Static),
            other => Err(PlacepressError::config(format!(
                "unknown catalog format '{other}': expected 'auto', 'export', or 'static'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// A loaded, validated catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// All entities, in catalog order. Status filtering happens later.
    pub entities: Vec<Entity>,
    /// Site-level metadata (export format only).
    pub meta: Option<CatalogMeta>,
}

/// The export catalog shape.
#[derive(Debug, Deserialize)]
struct ExportCatalog {
    #[serde(default)]
    meta: Option<CatalogMeta>,
    #[serde(default)]
    businesses: Vec<Business>,
    #[serde(default)]
    freelancers: Vec<Freelancer>,
}

/// Load and validate a catalog file.
///
/// Fatal when the file is missing, unparseable, empty, or when any record
/// fails identity validation — a partial build is never attempted.
pub fn load_catalog(path: &Path, format: CatalogFormat) -> Result<Catalog> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PlacepressError::catalog(format!("catalog not found at {}", path.display()))
        } else {
            PlacepressError::io(path, e)
        }
    })?;

    let format = match format {
        CatalogFormat::Auto => sniff_format(&content),
        explicit => explicit,
    };
    debug!(?format, "parsing catalog");

    let catalog = match format {
        CatalogFormat::Export => parse_export(&content)?,
        CatalogFormat::Static => parse_static(&content)?,
        CatalogFormat::Auto => unreachable!("auto resolved above"),
    };

    validate(&catalog)?;

    info!(
        entities = catalog.entities.len(),
        path = %path.display(),
        "catalog loaded"
    );

    Ok(catalog)
}

/// Auto-detection looks at the first non-whitespace byte.
fn sniff_format(content: &str) -> CatalogFormat {
    match content.trim_start().as_bytes().first() {
        Some(b'[') => CatalogFormat::Static,
        _ => CatalogFormat::Export,
    }
}

fn parse_export(content: &str) -> Result<Catalog> {
    let raw: ExportCatalog = serde_json::from_str(content)
        .map_err(|e| PlacepressError::parse(format!("invalid export catalog: {e}")))?;

    let entities = raw
        .businesses
        .into_iter()
        .map(Entity::from)
        .chain(raw.freelancers.into_iter().map(Entity::from))
        .collect();

    Ok(Catalog {
        entities,
        meta: raw.meta,
    })
}

fn parse_static(content: &str) -> Result<Catalog> {
    let raw: Vec<Business> = serde_json::from_str(content)
        .map_err(|e| PlacepressError::parse(format!("invalid static catalog: {e}")))?;

    Ok(Catalog {
        entities: raw.into_iter().map(Entity::from).collect(),
        meta: None,
    })
}

/// Load-time validation: non-empty collection, non-empty names, URL-safe and
/// unique ids.
fn validate(catalog: &Catalog) -> Result<()> {
    if catalog.entities.is_empty() {
        return Err(PlacepressError::catalog("catalog contains no entities"));
    }

    let mut seen_ids: HashSet<&str> = HashSet::new();
    for (index, entity) in catalog.entities.iter().enumerate() {
        if entity.name().trim().is_empty() {
            return Err(PlacepressError::catalog(format!(
                "entity #{index} (id '{}') has an empty name",
                entity.id()
            )));
        }
        if !is_url_safe_id(entity.id()) {
            return Err(PlacepressError::catalog(format!(
                "entity #{index} ('{}') has an invalid id '{}': \
                 ids must be non-empty ASCII alphanumeric, '-', or '_'",
                entity.name(),
                entity.id()
            )));
        }
        if !seen_ids.insert(entity.id()) {
            return Err(PlacepressError::catalog(format!(
                "duplicate entity id '{}'",
                entity.id()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from("../../../fixtures/catalog").join(name)
    }

    fn write_temp(content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "pp-loader-test-{}.json",
            uuid::Uuid::now_v7()
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_export_fixture() {
        let catalog = load_catalog(&fixture("export.fixture.json"), CatalogFormat::Auto)
            .expect("load export fixture");

        assert_eq!(catalog.entities.len(), 4);
        let meta = catalog.meta.expect("meta present");
        assert_eq!(meta.domain.as_deref(), Some("places.example.com"));

        // Businesses come first, then freelancers
        assert_eq!(catalog.entities[0].id(), "harbor-dental");
        assert_eq!(catalog.entities[3].id(), "jin-photo");
    }

    #[test]
    fn loads_static_fixture() {
        let catalog = load_catalog(&fixture("static.fixture.json"), CatalogFormat::Auto)
            .expect("load static fixture");

        assert_eq!(catalog.entities.len(), 2);
        assert!(catalog.meta.is_none());
    }

    #[test]
    fn explicit_format_overrides_sniffing() {
        let path = write_temp(r#"[{"id":"a","name":"Acme","address":"1 Main St"}]"#);
        // Parsing an array as the export shape fails
        let err = load_catalog(&path, CatalogFormat::Export).unwrap_err();
        assert!(err.to_string().contains("invalid export catalog"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_a_catalog_error() {
        let err = load_catalog(Path::new("does/not/exist.json"), CatalogFormat::Auto)
            .unwrap_err();
        assert!(err.to_string().contains("catalog not found"));
    }

    #[test]
    fn empty_collection_is_fatal() {
        let path = write_temp(r#"{"meta":{"domain":"x.example.com"},"businesses":[]}"#);
        let err = load_catalog(&path, CatalogFormat::Auto).unwrap_err();
        assert!(err.to_string().contains("no entities"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_required_field_is_fatal() {
        // No name
        let path = write_temp(r#"[{"id":"a","address":"1 Main St"}]"#);
        let err = load_catalog(&path, CatalogFormat::Auto).unwrap_err();
        assert!(err.to_string().contains("invalid static catalog"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn unsafe_id_is_fatal() {
        let path = write_temp(r#"[{"id":"has space","name":"Acme","address":"1 Main St"}]"#);
        let err = load_catalog(&path, CatalogFormat::Auto).unwrap_err();
        assert!(err.to_string().contains("invalid id"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn duplicate_id_is_fatal() {
        let path = write_temp(
            r#"[{"id":"a","name":"Acme","address":"1 Main St"},
                {"id":"a","name":"Acme Two","address":"2 Main St"}]"#,
        );
        let err = load_catalog(&path, CatalogFormat::Auto).unwrap_err();
        assert!(err.to_string().contains("duplicate entity id 'a'"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn format_parses_from_str() {
        assert_eq!("auto".parse::<CatalogFormat>().unwrap(), CatalogFormat::Auto);
        assert_eq!(
            "export".parse::<CatalogFormat>().unwrap(),
            CatalogFormat::Export
        );
        assert!("yaml".parse::<CatalogFormat>().is_err());
    }
}
