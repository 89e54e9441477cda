//! `ItinerAI` - AI-powered travel itinerary planning
//!
//! This library provides the core functionality for destination enrichment,
//! prompt composition, and single-shot itinerary generation with a locally
//! loaded causal language model.

pub mod config;
pub mod enrichment;
pub mod error;
pub mod llm;
pub mod models;
pub mod planner;
pub mod prompt;

// Re-export core types for public API
pub use config::ItinerAiConfig;
pub use enrichment::EnrichmentClient;
pub use error::ItinerAiError;
pub use llm::{GenerationOutput, LanguageModel, ModelContext, TextGenerator, TokenizerWrapper};
pub use models::{Budget, EnrichmentResult, GeneratedItinerary, TripRequest};
pub use planner::ItineraryPlanner;
pub use prompt::compose_prompt;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ItinerAiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
