//! Tokenizer wrapper with input truncation

use crate::{ItinerAiError, Result};
use std::path::Path;
use tokenizers::Tokenizer;
use tracing::{info, warn};

/// Wrapper over the checkpoint's tokenizer
pub struct TokenizerWrapper {
    tokenizer: Tokenizer,
}

impl TokenizerWrapper {
    /// Load a tokenizer from a `tokenizer.json` file
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading tokenizer from {:?}", path);
        let tokenizer = Tokenizer::from_file(path)
            .map_err(|e| ItinerAiError::tokenizer(e.to_string()))?;

        info!(
            "Tokenizer loaded with {} tokens",
            tokenizer.get_vocab_size(true)
        );
        Ok(Self { tokenizer })
    }

    /// Encode text, truncating to at most `max_tokens` ids.
    ///
    /// Truncation keeps the front of the prompt; the tail (including parts of
    /// the closing instruction) is dropped when the prompt is too long.
    pub fn encode_truncated(&self, text: &str, max_tokens: usize) -> Result<Vec<u32>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| ItinerAiError::tokenizer(e.to_string()))?;

        let mut ids = encoding.get_ids().to_vec();
        if ids.len() > max_tokens {
            warn!(
                "Prompt of {} tokens truncated to the {}-token input limit",
                ids.len(),
                max_tokens
            );
            ids.truncate(max_tokens);
        }
        Ok(ids)
    }

    /// Decode token ids back to text, skipping special/control tokens
    pub fn decode(&self, ids: &[u32]) -> Result<String> {
        self.tokenizer
            .decode(ids, true)
            .map_err(|e| ItinerAiError::tokenizer(e.to_string()))
    }

    /// Vocabulary size including added tokens
    pub fn vocab_size(&self) -> usize {
        self.tokenizer.get_vocab_size(true)
    }

    /// End-of-sequence token id, probing the markers common across supported
    /// checkpoints
    pub fn eos_token_id(&self) -> Option<u32> {
        self.tokenizer
            .token_to_id("<|end_of_text|>")
            .or_else(|| self.tokenizer.token_to_id("<|eot_id|>"))
            .or_else(|| self.tokenizer.token_to_id("</s>"))
            .or_else(|| self.tokenizer.token_to_id("<|endoftext|>"))
            .or_else(|| self.tokenizer.token_to_id("<eos>"))
    }
}
