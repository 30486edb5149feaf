// Moderation service - core business logic for blocked/allowed decisions.
//
// This service handles:
// - Translating text checks into analysis requests
// - Interpreting blocklist hits and category severities into a verdict
// - Fail-open conversion of API failures (unreachable service never blocks)
//
// NO HTTP dependencies here - just pure domain logic.

use super::moderation_models::{
    AnalysisRequest, BlocklistInfo, BlocklistSummary, Category, ModerationConfig, OutputType,
    TextAnalysis, Verdict,
};
use async_trait::async_trait;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("API call failed: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected response shape: {0}")]
    Malformed(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

// ============================================================================
// API TRAIT (PORT)
// ============================================================================

/// Trait for the remote content safety service.
///
/// Following the same pattern as the other core ports: the infra layer
/// provides the HTTP-backed implementation, tests provide mocks.
#[async_trait]
pub trait ContentSafetyApi: Send + Sync {
    /// Submit text for analysis against the given categories and blocklists.
    async fn analyze_text(
        &self,
        request: &AnalysisRequest,
    ) -> Result<TextAnalysis, ModerationError>;

    /// Fetch all configured blocklists. Single page, no pagination.
    async fn list_blocklists(&self) -> Result<Vec<BlocklistInfo>, ModerationError>;

    /// Count the items in one blocklist.
    async fn count_blocklist_items(&self, blocklist_name: &str)
        -> Result<usize, ModerationError>;
}

// ============================================================================
// CORE SERVICE
// ============================================================================

/// Moderation service that turns analysis responses into verdicts.
pub struct ModerationService<C: ContentSafetyApi> {
    api: C,
    config: ModerationConfig,
}

impl<C: ContentSafetyApi> ModerationService<C> {
    /// Create a new moderation service with the given API client.
    pub fn new(api: C, config: ModerationConfig) -> Self {
        Self { api, config }
    }

    /// Check text against the given blocklists.
    ///
    /// Never fails: an unreachable or erroring service yields a fail-open
    /// verdict (not blocked) with the error attached, so callers always get
    /// something to print and move on.
    pub async fn check_text(&self, text: &str, blocklist_names: &[String]) -> Verdict {
        let request = AnalysisRequest {
            text: text.to_string(),
            categories: Category::ALL.to_vec(),
            blocklist_names: blocklist_names.to_vec(),
            halt_on_blocklist_hit: self.config.halt_on_blocklist_hit,
            output_type: OutputType::FourSeverityLevels,
        };

        match self.api.analyze_text(&request).await {
            Ok(analysis) => self.interpret(analysis),
            Err(err) => {
                tracing::warn!("Text analysis failed, failing open: {}", err);
                Verdict::fail_open(err.to_string())
            }
        }
    }

    /// Derive the blocked/allowed decision from a parsed analysis.
    fn interpret(&self, analysis: TextAnalysis) -> Verdict {
        let mut blocked = false;
        let mut reasons = Vec::new();

        for hit in &analysis.blocklist_matches {
            blocked = true;
            reasons.push(format!("Blocklist '{}' hit", hit.blocklist_name));
            if let Some(term) = hit.matched_text.as_deref().filter(|t| !t.is_empty()) {
                reasons.push(format!("Matched term: {}", term));
            }
        }

        for score in &analysis.category_scores {
            if score.severity >= self.config.severity_threshold {
                blocked = true;
                reasons.push(format!(
                    "Category '{}' severity: {}",
                    score.category, score.severity
                ));
            }
        }

        Verdict {
            blocked,
            reasons,
            error: None,
            raw: Some(analysis.raw),
        }
    }

    /// Fetch all blocklists with their item counts.
    ///
    /// A failed item-count fetch leaves that summary's count empty rather
    /// than aborting the listing.
    pub async fn blocklist_summaries(&self) -> Result<Vec<BlocklistSummary>, ModerationError> {
        let infos = self.api.list_blocklists().await?;

        let mut summaries = Vec::with_capacity(infos.len());
        for info in infos {
            let item_count = match self.api.count_blocklist_items(&info.name).await {
                Ok(count) => Some(count),
                Err(err) => {
                    tracing::warn!("Failed to count items in '{}': {}", info.name, err);
                    None
                }
            };

            summaries.push(BlocklistSummary {
                name: info.name,
                description: info.description,
                item_count,
            });
        }

        Ok(summaries)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::moderation::moderation_models::{BlocklistMatch, CategoryScore};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Canned-response API for testing
    struct MockSafetyApi {
        analysis: Option<TextAnalysis>,
        blocklists: Vec<BlocklistInfo>,
        counts: HashMap<String, usize>,
        last_request: Mutex<Option<AnalysisRequest>>,
    }

    impl MockSafetyApi {
        fn new(analysis: Option<TextAnalysis>) -> Self {
            Self {
                analysis,
                blocklists: Vec::new(),
                counts: HashMap::new(),
                last_request: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl ContentSafetyApi for MockSafetyApi {
        async fn analyze_text(
            &self,
            request: &AnalysisRequest,
        ) -> Result<TextAnalysis, ModerationError> {
            *self.last_request.lock().unwrap() = Some(request.clone());
            self.analysis.clone().ok_or(ModerationError::Api {
                status: 401,
                body: "Access denied".to_string(),
            })
        }

        async fn list_blocklists(&self) -> Result<Vec<BlocklistInfo>, ModerationError> {
            Ok(self.blocklists.clone())
        }

        async fn count_blocklist_items(
            &self,
            blocklist_name: &str,
        ) -> Result<usize, ModerationError> {
            self.counts
                .get(blocklist_name)
                .copied()
                .ok_or_else(|| ModerationError::Transport("connection reset".to_string()))
        }
    }

    fn analysis(
        matches: Vec<BlocklistMatch>,
        scores: Vec<CategoryScore>,
    ) -> TextAnalysis {
        TextAnalysis {
            blocklist_matches: matches,
            category_scores: scores,
            raw: json!({"categoriesAnalysis": []}),
        }
    }

    fn score(category: &str, severity: u8) -> CategoryScore {
        CategoryScore {
            category: category.to_string(),
            severity,
        }
    }

    #[tokio::test]
    async fn test_blocklist_match_blocks() {
        let api = MockSafetyApi::new(Some(analysis(
            vec![BlocklistMatch {
                blocklist_name: "political-content-filter".to_string(),
                matched_text: Some("vote".to_string()),
            }],
            vec![score("Hate", 0)],
        )));
        let service = ModerationService::new(api, ModerationConfig::default());

        let verdict = service
            .check_text(
                "Who should I vote for in the presidential election?",
                &["political-content-filter".to_string()],
            )
            .await;

        assert!(verdict.blocked);
        assert_eq!(verdict.label(), "BLOCKED");
        assert!(verdict
            .reasons
            .iter()
            .any(|r| r.contains("political-content-filter")));
        assert!(verdict.reasons.iter().any(|r| r.contains("vote")));
    }

    #[tokio::test]
    async fn test_severity_at_threshold_blocks() {
        let api = MockSafetyApi::new(Some(analysis(
            Vec::new(),
            vec![score("Hate", 0), score("Violence", 2)],
        )));
        let service = ModerationService::new(api, ModerationConfig::default());

        let verdict = service.check_text("some text", &[]).await;

        assert!(verdict.blocked);
        assert_eq!(verdict.reasons, vec!["Category 'Violence' severity: 2"]);
    }

    #[tokio::test]
    async fn test_low_severity_and_no_match_allowed() {
        let api = MockSafetyApi::new(Some(analysis(
            Vec::new(),
            vec![
                score("Hate", 1),
                score("SelfHarm", 0),
                score("Sexual", 0),
                score("Violence", 1),
            ],
        )));
        let service = ModerationService::new(api, ModerationConfig::default());

        let verdict = service
            .check_text(
                "What is machine learning and how does it work?",
                &[
                    "political-content-filter".to_string(),
                    "religious-content-filter".to_string(),
                ],
            )
            .await;

        assert!(!verdict.blocked);
        assert_eq!(verdict.label(), "ALLOWED");
        assert!(verdict.reasons.is_empty());
        assert!(verdict.error.is_none());
    }

    #[tokio::test]
    async fn test_api_failure_fails_open() {
        let api = MockSafetyApi::new(None);
        let service = ModerationService::new(api, ModerationConfig::default());

        let verdict = service.check_text("anything", &[]).await;

        assert!(!verdict.blocked);
        let error = verdict.error.expect("error should be populated");
        assert!(error.contains("401"));
        assert!(verdict.raw.is_none());
    }

    #[tokio::test]
    async fn test_custom_threshold_respected() {
        let api = MockSafetyApi::new(Some(analysis(
            Vec::new(),
            vec![score("Violence", 2)],
        )));
        let config = ModerationConfig {
            severity_threshold: 3,
            ..Default::default()
        };
        let service = ModerationService::new(api, config);

        // Severity 2 is below a threshold of 3
        let verdict = service.check_text("some text", &[]).await;

        assert!(!verdict.blocked);
    }

    #[tokio::test]
    async fn test_request_carries_fixed_categories_and_halt_flag() {
        let api = MockSafetyApi::new(Some(analysis(Vec::new(), Vec::new())));
        let service = ModerationService::new(api, ModerationConfig::default());

        service
            .check_text("hello", &["political-content-filter".to_string()])
            .await;

        let request = service
            .api
            .last_request
            .lock()
            .unwrap()
            .clone()
            .expect("request should have been sent");
        assert_eq!(request.categories, Category::ALL.to_vec());
        assert!(request.halt_on_blocklist_hit);
        assert_eq!(request.output_type, OutputType::FourSeverityLevels);
        assert_eq!(
            request.blocklist_names,
            vec!["political-content-filter".to_string()]
        );
    }

    #[tokio::test]
    async fn test_summaries_tolerate_count_failure() {
        let mut api = MockSafetyApi::new(None);
        api.blocklists = vec![
            BlocklistInfo {
                name: "political-content-filter".to_string(),
                description: "Political terms".to_string(),
            },
            BlocklistInfo {
                name: "religious-content-filter".to_string(),
                description: "Religious terms".to_string(),
            },
        ];
        // Only the first list has a reachable item collection
        api.counts.insert("political-content-filter".to_string(), 12);

        let service = ModerationService::new(api, ModerationConfig::default());

        let summaries = service.blocklist_summaries().await.unwrap();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].item_count, Some(12));
        assert_eq!(summaries[1].item_count, None);
    }
}
