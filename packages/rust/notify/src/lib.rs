//! Best-effort indexing notification.
//!
//! After publication, the sitemap's URL list is submitted to an IndexNow
//! endpoint and the sitemap URL is pinged to the configured search engines.
//! Every call is a single attempt with a bounded timeout; a failure is
//! logged and recorded in the report, never propagated — notification
//! outcomes are not part of the build's success criteria.

use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::Client;
use serde::Serialize;
use tracing::{info, instrument, warn};

use placepress_shared::{NotifySection, PlacepressError, Result, SiteConfig};

/// User-Agent string for notification requests.
const USER_AGENT: &str = concat!("placepress/", env!("CARGO_PKG_VERSION"));

/// File name of the persisted notification report.
const REPORT_FILE_NAME: &str = "notify-report.json";

static LOC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<loc>(.*?)</loc>").unwrap());

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Runtime notification configuration, resolved from config + site identity.
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// Host as submitted in the IndexNow payload.
    pub host: String,
    /// IndexNow verification key.
    pub key: String,
    /// Public URL of the published key file.
    pub key_location: String,
    /// Absolute URL of the published sitemap.
    pub sitemap_url: String,
    /// IndexNow submission endpoint.
    pub indexnow_endpoint: String,
    /// Sitemap ping endpoints; each receives `?sitemap=<url>`.
    pub ping_endpoints: Vec<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl NotifyConfig {
    /// Resolve from the `[notify]` config section and the site identity.
    pub fn resolve(section: &NotifySection, site: &SiteConfig) -> Self {
        Self {
            host: site.host.clone(),
            key: site.indexnow_key.clone(),
            key_location: site.key_file_url(),
            sitemap_url: site.sitemap_url(),
            indexnow_endpoint: section.indexnow_endpoint.clone(),
            ping_endpoints: section.ping_endpoints.clone(),
            timeout_secs: section.timeout_secs,
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Outcome of one endpoint call.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum Outcome {
    /// 2xx (202 means accepted pending key verification).
    Accepted { status: u16 },
    /// Any other HTTP status.
    Rejected { status: u16, detail: String },
    /// Transport error or timeout.
    Failed { error: String },
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accepted { status } => write!(f, "accepted ({status})"),
            Self::Rejected { status, detail } if detail.is_empty() => {
                write!(f, "rejected ({status})")
            }
            Self::Rejected { status, detail } => write!(f, "rejected ({status}: {detail})"),
            Self::Failed { error } => write!(f, "failed: {error}"),
        }
    }
}

/// One endpoint together with its outcome.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointOutcome {
    pub endpoint: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// The persisted notification report.
#[derive(Debug, Clone, Serialize)]
pub struct NotifyReport {
    /// Build date, `YYYY-MM-DD`.
    pub generated: String,
    pub urls_submitted: usize,
    pub urls: Vec<String>,
    pub outcomes: Vec<EndpointOutcome>,
}

impl NotifyReport {
    pub fn accepted_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, Outcome::Accepted { .. }))
            .count()
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.accepted_count()
    }
}

/// Persist the report into the output directory.
pub fn write_report(report: &NotifyReport, out_dir: &Path) -> Result<()> {
    let path = out_dir.join(REPORT_FILE_NAME);
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| PlacepressError::parse(format!("report serialization failed: {e}")))?;
    std::fs::write(&path, json).map_err(|e| PlacepressError::io(&path, e))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Sitemap URL extraction
// ---------------------------------------------------------------------------

/// Extract the literal URL list from a sitemap document.
pub fn extract_sitemap_urls(xml: &str) -> Vec<String> {
    LOC_RE
        .captures_iter(xml)
        .map(|caps| unescape_xml(&caps[1]))
        .collect()
}

fn unescape_xml(s: &str) -> String {
    // `&amp;` last, so `&amp;lt;` round-trips as the literal `&lt;`
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

// ---------------------------------------------------------------------------
// Notification run
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexNowPayload<'a> {
    host: &'a str,
    key: &'a str,
    key_location: &'a str,
    url_list: &'a [String],
}

/// Run the notification step: one IndexNow submission plus the sitemap
/// pings, all concurrent, each independently best-effort.
#[instrument(skip_all, fields(urls = urls.len()))]
pub async fn run(config: &NotifyConfig, urls: &[String], build_date: &str) -> NotifyReport {
    let mut report = NotifyReport {
        generated: build_date.to_string(),
        urls_submitted: urls.len(),
        urls: urls.to_vec(),
        outcomes: Vec::new(),
    };

    let client = match build_client(config) {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "could not build HTTP client, skipping notification");
            report.outcomes.push(EndpointOutcome {
                endpoint: config.indexnow_endpoint.clone(),
                outcome: Outcome::Failed {
                    error: e.to_string(),
                },
            });
            return report;
        }
    };

    let (indexnow_outcome, ping_outcomes) = tokio::join!(
        submit_indexnow(&client, config, urls),
        ping_all(&client, config),
    );

    report.outcomes.push(indexnow_outcome);
    report.outcomes.extend(ping_outcomes);

    info!(
        accepted = report.accepted_count(),
        failed = report.failure_count(),
        "notification complete"
    );

    report
}

fn build_client(config: &NotifyConfig) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| PlacepressError::Network(format!("failed to build HTTP client: {e}")))
}

/// Submit the URL list to the IndexNow endpoint as one JSON POST.
async fn submit_indexnow(
    client: &Client,
    config: &NotifyConfig,
    urls: &[String],
) -> EndpointOutcome {
    let payload = IndexNowPayload {
        host: &config.host,
        key: &config.key,
        key_location: &config.key_location,
        url_list: urls,
    };

    let endpoint = config.indexnow_endpoint.clone();
    let outcome = match client.post(&endpoint).json(&payload).send().await {
        Ok(response) => {
            let status = response.status();
            if status.is_success() {
                if status.as_u16() == 202 {
                    info!(%endpoint, "IndexNow accepted (202, key verification pending)");
                } else {
                    info!(%endpoint, status = status.as_u16(), "IndexNow submission succeeded");
                }
                Outcome::Accepted {
                    status: status.as_u16(),
                }
            } else {
                let detail = response
                    .text()
                    .await
                    .unwrap_or_default()
                    .chars()
                    .take(100)
                    .collect::<String>();
                warn!(%endpoint, status = status.as_u16(), %detail, "IndexNow submission rejected");
                Outcome::Rejected {
                    status: status.as_u16(),
                    detail,
                }
            }
        }
        Err(e) => {
            warn!(%endpoint, error = %e, "IndexNow submission failed");
            Outcome::Failed {
                error: e.to_string(),
            }
        }
    };

    EndpointOutcome { endpoint, outcome }
}

/// Ping every configured endpoint concurrently with the sitemap URL.
async fn ping_all(client: &Client, config: &NotifyConfig) -> Vec<EndpointOutcome> {
    let mut handles = Vec::with_capacity(config.ping_endpoints.len());
    for endpoint in &config.ping_endpoints {
        handles.push(tokio::spawn(ping_sitemap(
            client.clone(),
            endpoint.clone(),
            config.sitemap_url.clone(),
        )));
    }

    let mut outcomes = Vec::with_capacity(handles.len());
    for (handle, endpoint) in handles.into_iter().zip(&config.ping_endpoints) {
        match handle.await {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => outcomes.push(EndpointOutcome {
                endpoint: endpoint.clone(),
                outcome: Outcome::Failed {
                    error: format!("task join error: {e}"),
                },
            }),
        }
    }
    outcomes
}

/// One GET ping carrying the sitemap URL as a query parameter.
async fn ping_sitemap(client: Client, endpoint: String, sitemap_url: String) -> EndpointOutcome {
    let encoded: String = url::form_urlencoded::byte_serialize(sitemap_url.as_bytes()).collect();
    let url = format!("{endpoint}?sitemap={encoded}");

    let outcome = match client.get(&url).send().await {
        Ok(response) => {
            let status = response.status();
            if status.is_success() {
                info!(%endpoint, "sitemap ping succeeded");
                Outcome::Accepted {
                    status: status.as_u16(),
                }
            } else {
                warn!(%endpoint, status = status.as_u16(), "sitemap ping rejected");
                Outcome::Rejected {
                    status: status.as_u16(),
                    detail: String::new(),
                }
            }
        }
        Err(e) => {
            warn!(%endpoint, error = %e, "sitemap ping failed");
            Outcome::Failed {
                error: e.to_string(),
            }
        }
    };

    EndpointOutcome { endpoint, outcome }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(server_uri: &str) -> NotifyConfig {
        NotifyConfig {
            host: "places.example.com".into(),
            key: "testkey123".into(),
            key_location: "https://places.example.com/testkey123.txt".into(),
            sitemap_url: "https://places.example.com/sitemap.xml".into(),
            indexnow_endpoint: format!("{server_uri}/indexnow"),
            ping_endpoints: vec![format!("{server_uri}/ping")],
            timeout_secs: 5,
        }
    }

    fn urls() -> Vec<String> {
        vec![
            "https://places.example.com/".into(),
            "https://places.example.com/places/a/".into(),
        ]
    }

    #[test]
    fn extracts_urls_from_sitemap() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://places.example.com/</loc>
    <lastmod>2026-02-19</lastmod>
  </url>
  <url>
    <loc>https://places.example.com/places/a/?x=1&amp;y=2</loc>
  </url>
</urlset>"#;

        let urls = extract_sitemap_urls(xml);
        assert_eq!(
            urls,
            vec![
                "https://places.example.com/",
                "https://places.example.com/places/a/?x=1&y=2",
            ]
        );
    }

    #[test]
    fn extracts_nothing_from_empty_document() {
        assert!(extract_sitemap_urls("").is_empty());
        assert!(extract_sitemap_urls("<urlset></urlset>").is_empty());
    }

    #[tokio::test]
    async fn indexnow_submission_carries_payload() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/indexnow"))
            .and(body_partial_json(serde_json::json!({
                "host": "places.example.com",
                "key": "testkey123",
                "keyLocation": "https://places.example.com/testkey123.txt",
                "urlList": [
                    "https://places.example.com/",
                    "https://places.example.com/places/a/",
                ],
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(query_param(
                "sitemap",
                "https://places.example.com/sitemap.xml",
            ))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let report = run(&config(&server.uri()), &urls(), "2026-02-19").await;

        assert_eq!(report.urls_submitted, 2);
        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.accepted_count(), 2);
        assert_eq!(report.failure_count(), 0);
    }

    #[tokio::test]
    async fn accepted_202_counts_as_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/indexnow"))
            .respond_with(ResponseTemplate::new(202))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let report = run(&config(&server.uri()), &urls(), "2026-02-19").await;

        assert!(matches!(
            report.outcomes[0].outcome,
            Outcome::Accepted { status: 202 }
        ));
    }

    #[tokio::test]
    async fn rejections_are_recorded_not_raised() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/indexnow"))
            .respond_with(ResponseTemplate::new(422).set_body_string("invalid key"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let report = run(&config(&server.uri()), &urls(), "2026-02-19").await;

        assert_eq!(report.accepted_count(), 0);
        assert_eq!(report.failure_count(), 2);
        match &report.outcomes[0].outcome {
            Outcome::Rejected { status, detail } => {
                assert_eq!(*status, 422);
                assert_eq!(detail, "invalid key");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_recorded_failure() {
        // Nothing listens here; the run must still complete
        let mut cfg = config("http://127.0.0.1:1");
        cfg.ping_endpoints.clear();

        let report = run(&cfg, &urls(), "2026-02-19").await;

        assert_eq!(report.outcomes.len(), 1);
        assert!(matches!(report.outcomes[0].outcome, Outcome::Failed { .. }));
    }

    #[tokio::test]
    async fn timeout_is_a_recorded_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/indexnow"))
            .respond_with(
                ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let mut cfg = config(&server.uri());
        cfg.timeout_secs = 1;
        cfg.ping_endpoints.clear();

        let report = run(&cfg, &urls(), "2026-02-19").await;

        assert!(matches!(report.outcomes[0].outcome, Outcome::Failed { .. }));
    }

    #[test]
    fn report_serializes_with_outcome_tags() {
        let report = NotifyReport {
            generated: "2026-02-19".into(),
            urls_submitted: 1,
            urls: vec!["https://places.example.com/".into()],
            outcomes: vec![
                EndpointOutcome {
                    endpoint: "https://api.indexnow.org/indexnow".into(),
                    outcome: Outcome::Accepted { status: 200 },
                },
                EndpointOutcome {
                    endpoint: "https://www.google.com/ping".into(),
                    outcome: Outcome::Failed {
                        error: "timeout".into(),
                    },
                },
            ],
        };

        let json = serde_json::to_string_pretty(&report).expect("serialize report");
        assert!(json.contains("\"result\": \"accepted\""));
        assert!(json.contains("\"result\": \"failed\""));
        assert!(json.contains("\"urlsSubmitted\"") || json.contains("\"urls_submitted\""));
    }
}
