// Moderation domain models - data structures for content safety checks.
//
// These are pure domain types with no HTTP dependencies.
// The infra layer converts these to and from the service's wire format.

/// Moderation categories scored by the service. The set is fixed for the
/// API version this client targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Hate,
    SelfHarm,
    Sexual,
    Violence,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Hate,
        Category::SelfHarm,
        Category::Sexual,
        Category::Violence,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Hate => "Hate",
            Category::SelfHarm => "SelfHarm",
            Category::Sexual => "Sexual",
            Category::Violence => "Violence",
        }
    }
}

/// Severity granularity requested from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputType {
    /// 0-3 severity scale.
    FourSeverityLevels,
    /// 0-7 severity scale.
    #[allow(dead_code)]
    EightSeverityLevels,
}

impl OutputType {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputType::FourSeverityLevels => "FourSeverityLevels",
            OutputType::EightSeverityLevels => "EightSeverityLevels",
        }
    }
}

/// A single text-analysis request. Immutable once built.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub text: String,
    pub categories: Vec<Category>,
    pub blocklist_names: Vec<String>,
    pub halt_on_blocklist_hit: bool,
    pub output_type: OutputType,
}

/// One blocklist hit reported by the service.
#[derive(Debug, Clone)]
pub struct BlocklistMatch {
    pub blocklist_name: String,
    /// The term that matched, when the service reports it.
    pub matched_text: Option<String>,
}

/// Severity score for one category, on the scale selected by `OutputType`.
#[derive(Debug, Clone)]
pub struct CategoryScore {
    pub category: String,
    pub severity: u8,
}

/// Parsed analysis response, with the raw payload kept for display.
#[derive(Debug, Clone)]
pub struct TextAnalysis {
    pub blocklist_matches: Vec<BlocklistMatch>,
    pub category_scores: Vec<CategoryScore>,
    pub raw: serde_json::Value,
}

/// Name and description of a server-managed blocklist.
#[derive(Debug, Clone)]
pub struct BlocklistInfo {
    pub name: String,
    pub description: String,
}

/// Blocklist listing entry with its item count.
#[derive(Debug, Clone)]
pub struct BlocklistSummary {
    pub name: String,
    pub description: String,
    /// `None` when the per-list item fetch failed.
    pub item_count: Option<usize>,
}

/// Final blocked/allowed decision for one piece of text.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub blocked: bool,
    /// Human-readable reasons for a block.
    pub reasons: Vec<String>,
    /// Populated when the service could not be reached or rejected the call.
    pub error: Option<String>,
    /// Raw API response, when one was received.
    pub raw: Option<serde_json::Value>,
}

impl Verdict {
    /// Fail-open result: inability to complete a check never blocks.
    pub fn fail_open(error: impl Into<String>) -> Self {
        Self {
            blocked: false,
            reasons: Vec::new(),
            error: Some(error.into()),
            raw: None,
        }
    }

    pub fn label(&self) -> &'static str {
        if self.blocked {
            "BLOCKED"
        } else {
            "ALLOWED"
        }
    }
}

/// Configuration for moderation decisions.
#[derive(Debug, Clone)]
pub struct ModerationConfig {
    /// A category severity at or above this value blocks the content.
    pub severity_threshold: u8,
    /// Ask the service to stop scanning after the first blocklist hit.
    pub halt_on_blocklist_hit: bool,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            severity_threshold: 2, // On the four-level 0-3 scale
            halt_on_blocklist_hit: true,
        }
    }
}
