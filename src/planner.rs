//! Itinerary planning pipeline
//!
//! Orchestrates one request end to end: validate the trip request, fetch the
//! destination summary, compose the prompt, and run one generation pass. The
//! loaded model context lives inside the planner for the process lifetime;
//! there is no global state.

use crate::config::{ItinerAiConfig, ModelConfig};
use crate::enrichment::EnrichmentClient;
use crate::llm::{ModelContext, TextGenerator};
use crate::models::{GeneratedItinerary, TripRequest};
use crate::prompt::compose_prompt;
use crate::Result;
use tracing::{info, instrument};

/// One-request-at-a-time itinerary planner holding the loaded model
pub struct ItineraryPlanner {
    enrichment: EnrichmentClient,
    context: ModelContext,
    model_config: ModelConfig,
}

impl ItineraryPlanner {
    /// Build the planner, loading the model and tokenizer.
    ///
    /// Model loading failure is fatal by design: without a model no request
    /// can be served, so the process should fail fast here rather than start
    /// in a broken state.
    pub fn new(config: &ItinerAiConfig) -> Result<Self> {
        let enrichment = EnrichmentClient::new(&config.enrichment)?;
        let context = ModelContext::load(&config.model)?;
        Ok(Self {
            enrichment,
            context,
            model_config: config.model.clone(),
        })
    }

    /// Plan an itinerary for a single trip request.
    ///
    /// The request is validated first; the enrichment fetcher is never
    /// invoked for an invalid request (in particular, never with an empty
    /// destination).
    #[instrument(skip(self, trip), fields(destination = %trip.destination))]
    pub fn plan(&mut self, trip: &TripRequest) -> Result<GeneratedItinerary> {
        trip.validate()?;

        let enrichment = self.enrichment.fetch_summary(&trip.destination);
        let prompt = compose_prompt(trip, &enrichment.text);
        info!(
            "Composed prompt of {} chars for '{}'",
            prompt.len(),
            trip.destination
        );

        let mut generator = TextGenerator::new(&mut self.context);
        let output = generator.generate(&prompt, &self.model_config)?;

        info!(
            "Itinerary generated: {} prompt + {} new tokens in {}ms",
            output.prompt_tokens, output.generated_tokens, output.total_time_ms
        );

        Ok(GeneratedItinerary { text: output.text })
    }

    /// Identifier of the loaded model
    #[must_use]
    pub fn model_id(&self) -> &str {
        &self.context.model_id
    }
}
