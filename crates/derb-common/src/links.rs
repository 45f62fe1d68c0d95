//! Cross-site links owned by an external "Nexus" content network: the footer
//! list of sister sites and the sections of shared legal pages.
//!
//! Every lookup is best-effort. A provider never fails; it logs and returns
//! an empty result so pages render without the block.

use std::time::Duration;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CommonError;

const CONTENT_SITES_TABLE: &str = "nexus_content_sites";
const LEGAL_SECTIONS_TABLE: &str = "nexus_legal_sections";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ContentSite {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LegalSection {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LegalPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub sections: Vec<LegalSection>,
}

impl LegalPage {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[async_trait]
pub trait ContentLinksProvider: Send + Sync {
    /// Active sister sites in display order.
    async fn content_sites(&self) -> Vec<ContentSite>;

    /// Sections of one legal page (`terms`, `privacy`, ...). Empty when the
    /// page is unknown.
    async fn legal_page(&self, page_id: &str) -> LegalPage;
}

/// Provider used when no Nexus credentials are configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLinks;

#[async_trait]
impl ContentLinksProvider for NoLinks {
    async fn content_sites(&self) -> Vec<ContentSite> {
        Vec::new()
    }

    async fn legal_page(&self, _page_id: &str) -> LegalPage {
        LegalPage::default()
    }
}

#[derive(Debug, Deserialize)]
struct SiteRow {
    site_label: String,
    site_url: String,
}

#[derive(Debug, Deserialize)]
struct LegalRow {
    #[serde(default)]
    page_title: Option<String>,
    section_title: String,
    section_content: String,
}

/// Reads the Nexus tables through a Supabase-style PostgREST endpoint.
pub struct NexusLinks {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl NexusLinks {
    pub fn new(base_url: &str, anon_key: &str, timeout: Duration) -> Result<Self, CommonError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        })
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, CommonError> {
        let url = format!("{}/rest/v1/{table}", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CommonError::LinksStatus {
                status: status.as_u16(),
                body,
            });
        }

        let rows = response.json::<Vec<T>>().await?;
        debug!(table, rows = rows.len(), "nexus rows fetched");
        Ok(rows)
    }
}

#[async_trait]
impl ContentLinksProvider for NexusLinks {
    async fn content_sites(&self) -> Vec<ContentSite> {
        let query = [
            ("select", "site_label,site_url"),
            ("is_active", "eq.true"),
            ("order", "display_order.asc"),
        ];
        match self.select::<SiteRow>(CONTENT_SITES_TABLE, &query).await {
            Ok(rows) => rows
                .into_iter()
                .map(|row| ContentSite {
                    label: row.site_label,
                    url: row.site_url,
                })
                .collect(),
            Err(e) => {
                warn!(error = %e, "nexus content sites fetch failed");
                Vec::new()
            }
        }
    }

    async fn legal_page(&self, page_id: &str) -> LegalPage {
        let page_filter = format!("eq.{page_id}");
        let query = [
            ("select", "page_title,section_title,section_content"),
            ("page_id", page_filter.as_str()),
            ("order", "display_order.asc"),
        ];
        match self.select::<LegalRow>(LEGAL_SECTIONS_TABLE, &query).await {
            Ok(rows) => {
                let title = rows.iter().find_map(|row| row.page_title.clone());
                let sections = rows
                    .into_iter()
                    .map(|row| LegalSection {
                        title: row.section_title,
                        content: row.section_content,
                    })
                    .collect();
                LegalPage { title, sections }
            }
            Err(e) => {
                warn!(error = %e, page_id, "nexus legal page fetch failed");
                LegalPage::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> NexusLinks {
        NexusLinks::new(&server.uri(), "anon-key", Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn no_links_is_empty() {
        assert!(NoLinks.content_sites().await.is_empty());
        assert!(NoLinks.legal_page("terms").await.is_empty());
    }

    #[tokio::test]
    async fn content_sites_maps_rows_and_sends_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/nexus_content_sites"))
            .and(header("apikey", "anon-key"))
            .and(header("authorization", "Bearer anon-key"))
            .and(query_param("is_active", "eq.true"))
            .and(query_param("order", "display_order.asc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"site_label": "Slow Morocco", "site_url": "https://slowmorocco.com"},
                {"site_label": "Riad Notes", "site_url": "https://riad.example"}
            ])))
            .mount(&server)
            .await;

        let sites = provider(&server).content_sites().await;
        assert_eq!(
            sites,
            vec![
                ContentSite {
                    label: "Slow Morocco".into(),
                    url: "https://slowmorocco.com".into()
                },
                ContentSite {
                    label: "Riad Notes".into(),
                    url: "https://riad.example".into()
                },
            ]
        );
    }

    #[tokio::test]
    async fn server_error_degrades_to_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let links = provider(&server);
        assert!(links.content_sites().await.is_empty());
        assert!(links.legal_page("terms").await.is_empty());
    }

    #[tokio::test]
    async fn malformed_body_degrades_to_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        assert!(provider(&server).content_sites().await.is_empty());
    }

    #[tokio::test]
    async fn legal_page_filters_by_page_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/nexus_legal_sections"))
            .and(query_param("page_id", "eq.privacy"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"page_title": "Privacy Policy", "section_title": "Data", "section_content": "We keep none."},
                {"page_title": null, "section_title": "Cookies", "section_content": "None either."}
            ])))
            .mount(&server)
            .await;

        let page = provider(&server).legal_page("privacy").await;
        assert_eq!(page.title.as_deref(), Some("Privacy Policy"));
        assert_eq!(page.sections.len(), 2);
        assert_eq!(page.sections[1].title, "Cookies");
    }

    #[tokio::test]
    async fn unreachable_host_degrades_to_empty() {
        let links = NexusLinks::new("http://127.0.0.1:9", "k", Duration::from_millis(200)).unwrap();
        assert!(links.content_sites().await.is_empty());
    }
}
