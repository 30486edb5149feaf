pub mod moderation_models;
pub mod moderation_service;

pub use moderation_models::{
    AnalysisRequest, BlocklistInfo, BlocklistMatch, BlocklistSummary, Category, CategoryScore,
    ModerationConfig, OutputType, TextAnalysis, Verdict,
};
pub use moderation_service::{ContentSafetyApi, ModerationError, ModerationService};
