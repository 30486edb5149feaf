use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::moderation::{
    AnalysisRequest, BlocklistInfo, BlocklistMatch, CategoryScore, ContentSafetyApi,
    ModerationError, TextAnalysis,
};

const API_VERSION: &str = "2024-09-01";

/// The analyze call gets a hard cap; the listing calls do not.
const ANALYZE_TIMEOUT: Duration = Duration::from_secs(30);

/// Minimal Azure Content Safety REST client. It deliberately exposes only the
/// calls the core layer needs.
pub struct AzureContentSafetyClient {
    client: Client,
    endpoint: String,
}

impl AzureContentSafetyClient {
    pub fn new(endpoint: &str, api_key: &str) -> Result<Self, ModerationError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Ocp-Apim-Subscription-Key",
            HeaderValue::from_str(api_key)
                .map_err(|e| ModerationError::Config(e.to_string()))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ModerationError::Config(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn map_analysis(raw: serde_json::Value) -> Result<TextAnalysis, ModerationError> {
        let parsed: ApiAnalyzeResponse = serde_json::from_value(raw.clone())
            .map_err(|e| ModerationError::Malformed(e.to_string()))?;

        Ok(TextAnalysis {
            blocklist_matches: parsed
                .blocklists_match
                .unwrap_or_default()
                .into_iter()
                .map(|m| BlocklistMatch {
                    blocklist_name: m
                        .blocklist_name
                        .unwrap_or_else(|| "Unknown".to_string()),
                    matched_text: m.blocklist_item_text.filter(|t| !t.is_empty()),
                })
                .collect(),
            category_scores: parsed
                .categories_analysis
                .unwrap_or_default()
                .into_iter()
                .map(|c| CategoryScore {
                    category: c.category.unwrap_or_else(|| "Unknown".to_string()),
                    severity: c.severity.unwrap_or(0),
                })
                .collect(),
            raw,
        })
    }

    async fn read_error(resp: reqwest::Response) -> ModerationError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        ModerationError::Api { status, body }
    }
}

#[async_trait]
impl ContentSafetyApi for AzureContentSafetyClient {
    async fn analyze_text(
        &self,
        request: &AnalysisRequest,
    ) -> Result<TextAnalysis, ModerationError> {
        let url = format!(
            "{}/contentsafety/text:analyze?api-version={}",
            self.endpoint, API_VERSION
        );

        let body = ApiAnalyzeRequest {
            text: &request.text,
            categories: request.categories.iter().map(|c| c.as_str()).collect(),
            blocklist_names: &request.blocklist_names,
            halt_on_blocklist_hit: request.halt_on_blocklist_hit,
            output_type: request.output_type.as_str(),
        };

        tracing::debug!("POST {}", url);
        let resp = self
            .client
            .post(&url)
            .timeout(ANALYZE_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| ModerationError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Self::read_error(resp).await);
        }

        let raw: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| ModerationError::Malformed(e.to_string()))?;

        Self::map_analysis(raw)
    }

    async fn list_blocklists(&self) -> Result<Vec<BlocklistInfo>, ModerationError> {
        let url = format!(
            "{}/contentsafety/text/blocklists?api-version={}",
            self.endpoint, API_VERSION
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ModerationError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Self::read_error(resp).await);
        }

        let page: ApiPage<ApiBlocklist> = resp
            .json()
            .await
            .map_err(|e| ModerationError::Malformed(e.to_string()))?;

        Ok(page
            .value
            .into_iter()
            .filter_map(|b| {
                b.blocklist_name.map(|name| BlocklistInfo {
                    name,
                    description: b
                        .description
                        .unwrap_or_else(|| "No description".to_string()),
                })
            })
            .collect())
    }

    async fn count_blocklist_items(
        &self,
        blocklist_name: &str,
    ) -> Result<usize, ModerationError> {
        let url = format!(
            "{}/contentsafety/text/blocklists/{}/blocklistItems?api-version={}",
            self.endpoint, blocklist_name, API_VERSION
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ModerationError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Self::read_error(resp).await);
        }

        // Single page only; the tester does not paginate item collections.
        let page: ApiPage<serde_json::Value> = resp
            .json()
            .await
            .map_err(|e| ModerationError::Malformed(e.to_string()))?;

        Ok(page.value.len())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiAnalyzeRequest<'a> {
    text: &'a str,
    categories: Vec<&'static str>,
    blocklist_names: &'a [String],
    halt_on_blocklist_hit: bool,
    output_type: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiAnalyzeResponse {
    blocklists_match: Option<Vec<ApiBlocklistMatch>>,
    categories_analysis: Option<Vec<ApiCategoryAnalysis>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiBlocklistMatch {
    blocklist_name: Option<String>,
    blocklist_item_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiCategoryAnalysis {
    category: Option<String>,
    severity: Option<u8>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiBlocklist {
    blocklist_name: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiPage<T> {
    #[serde(default)]
    value: Vec<T>,
}
