//! Data models for trip requests and generated itineraries
//!
//! This module contains the request-scoped value structures that flow through
//! the planning pipeline. None of them are persisted; each is created,
//! consumed, and discarded within a single request.

use crate::{ItinerAiError, Result};
use serde::{Deserialize, Serialize};

/// Traveler budget tier
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Budget {
    /// Budget-conscious travel
    Low,
    /// Mid-range comfort
    Moderate,
    /// High-end travel
    Luxury,
}

impl std::fmt::Display for Budget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Budget::Low => write!(f, "Low"),
            Budget::Moderate => write!(f, "Moderate"),
            Budget::Luxury => write!(f, "Luxury"),
        }
    }
}

/// Minimum accepted trip duration in days
pub const MIN_DURATION_DAYS: u32 = 1;
/// Maximum accepted trip duration in days
pub const MAX_DURATION_DAYS: u32 = 30;

/// A single trip-planning request as entered by the traveler
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TripRequest {
    /// Where the trip starts (city, region, etc.)
    pub start_location: String,
    /// Destination to plan for
    pub destination: String,
    /// Budget tier
    pub budget: Budget,
    /// Trip length in days (1-30)
    pub duration_days: u32,
    /// Free-text purpose of the trip
    pub purpose: String,
    /// Free-text traveler preferences (e.g. adventure, food, history)
    pub preferences: String,
}

impl TripRequest {
    /// Validate that all text fields are non-empty and the duration is in range.
    ///
    /// The pipeline is never invoked for an invalid request, so the enrichment
    /// fetcher cannot be called with an empty destination path segment.
    pub fn validate(&self) -> Result<()> {
        if self.start_location.trim().is_empty() {
            return Err(ItinerAiError::validation("Starting location cannot be empty"));
        }
        if self.destination.trim().is_empty() {
            return Err(ItinerAiError::validation("Destination cannot be empty"));
        }
        if self.purpose.trim().is_empty() {
            return Err(ItinerAiError::validation("Purpose of trip cannot be empty"));
        }
        if self.preferences.trim().is_empty() {
            return Err(ItinerAiError::validation("Preferences cannot be empty"));
        }
        if !(MIN_DURATION_DAYS..=MAX_DURATION_DAYS).contains(&self.duration_days) {
            return Err(ItinerAiError::validation(format!(
                "Trip duration must be between {MIN_DURATION_DAYS} and {MAX_DURATION_DAYS} days, got: {}",
                self.duration_days
            )));
        }
        Ok(())
    }
}

/// Destination summary text used to enrich the prompt
///
/// Always populated: either a genuine encyclopedia extract or one of the
/// fixed fallback sentences. Never absent.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EnrichmentResult {
    /// Summary or fallback text
    pub text: String,
}

/// Decoded model output for one request
///
/// Contains the composed prompt followed by the model's continuation; the
/// design does not separate prompt from completion.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeneratedItinerary {
    /// Full decoded text (prompt included)
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn valid_request() -> TripRequest {
        TripRequest {
            start_location: "Paris".to_string(),
            destination: "Rome".to_string(),
            budget: Budget::Moderate,
            duration_days: 5,
            purpose: "sightseeing".to_string(),
            preferences: "food, history".to_string(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[rstest]
    #[case::empty_start("start_location")]
    #[case::empty_destination("destination")]
    #[case::empty_purpose("purpose")]
    #[case::empty_preferences("preferences")]
    fn test_empty_fields_rejected(#[case] field: &str) {
        let mut request = valid_request();
        match field {
            "start_location" => request.start_location = String::new(),
            "destination" => request.destination = String::new(),
            "purpose" => request.purpose = String::new(),
            "preferences" => request.preferences = "   ".to_string(),
            _ => unreachable!(),
        }
        let result = request.validate();
        assert!(matches!(
            result,
            Err(ItinerAiError::Validation { .. })
        ));
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(3, true)]
    #[case(30, true)]
    #[case(31, false)]
    fn test_duration_bounds(#[case] days: u32, #[case] ok: bool) {
        let mut request = valid_request();
        request.duration_days = days;
        assert_eq!(request.validate().is_ok(), ok);
    }

    #[test]
    fn test_budget_display() {
        assert_eq!(Budget::Low.to_string(), "Low");
        assert_eq!(Budget::Moderate.to_string(), "Moderate");
        assert_eq!(Budget::Luxury.to_string(), "Luxury");
    }
}
