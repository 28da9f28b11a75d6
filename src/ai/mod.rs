//! AI Integration Layer
//!
//! Mood analysis over pluggable LLM providers.

pub mod client;
pub mod prompt;
pub mod provider;
pub mod response;
pub mod timeout;

pub use client::{AnalysisClient, MoodAnalyzer, UnavailableAnalyzer};
pub use prompt::build_analysis_prompt;
pub use provider::{
    LlmProvider, LlmResponse, ProviderConfig, ResponseMetadata, ResponseTiming, SharedProvider,
    TokenUsage, create_provider,
};
pub use response::{
    AnalysisResult, coerce_mood_score, extract_summary, parse_analysis_object,
    parse_analysis_response, strip_code_fences,
};
pub use timeout::with_timeout;
