//! Prompt composition for itinerary generation
//!
//! Pure, deterministic rendering of the instruction block handed to the
//! language model. No I/O and no randomness: identical inputs always produce
//! byte-identical output.

use crate::models::TripRequest;

/// Role-setting instruction that opens every prompt
const SYSTEM_INSTRUCTION: &str = "You are an expert travel guide. Your goal is to create a well-structured, detailed itinerary based on the user's preferences.";

/// Render the full instruction prompt for a trip request.
///
/// The rendered text contains, in order: the role-setting sentence, a labeled
/// block of traveler inputs, the requested itinerary sections, additional
/// considerations, the verbatim enrichment text, and a closing instruction.
/// All user-provided fields are substituted verbatim; brace characters or
/// markup in them cannot corrupt the surrounding structure.
#[must_use]
pub fn compose_prompt(trip: &TripRequest, enrichment: &str) -> String {
    format!(
        "{SYSTEM_INSTRUCTION}\n\
         \n\
         ### Traveler Information:\n\
         - Budget: {budget}\n\
         - Trip Duration: {duration} days\n\
         - Purpose of Travel: {purpose}\n\
         - Preferences: {preferences}\n\
         \n\
         ### Day-wise Itinerary:\n\
         - Day-by-day activities, including morning, afternoon, and evening plans\n\
         - Must-visit attractions (famous landmarks and hidden gems)\n\
         - Local cuisines and top dining recommendations\n\
         - Best places to stay (based on budget)\n\
         - Transportation options (from {start} to {destination} and local travel)\n\
         \n\
         ### Additional Considerations:\n\
         - Cultural experiences, festivals, or seasonal events\n\
         - Shopping and souvenir recommendations\n\
         - Safety tips, best times to visit, and local customs\n\
         - Alternative plans for bad weather days\n\
         \n\
         ### Additional Information from External Sources:\n\
         {enrichment}\n\
         \n\
         Make sure the itinerary is engaging, practical, and customized based on the user's budget and preferences.\n",
        budget = trip.budget,
        duration = trip.duration_days,
        purpose = trip.purpose,
        preferences = trip.preferences,
        start = trip.start_location,
        destination = trip.destination,
        enrichment = enrichment,
    )
}
