//! Single-shot bounded text generation
//!
//! One prefill pass over the whole prompt, then an autoregressive loop
//! bounded by the configured new-token budget. Sampling goes through
//! `LogitsProcessor`; with no temperature configured it decodes greedily.

use super::ModelContext;
use crate::config::ModelConfig;
use crate::{ItinerAiError, Result};
use candle_core::{DType, Tensor};
use candle_transformers::generation::LogitsProcessor;
use std::time::Instant;
use tracing::{debug, info};

/// Result of one generation pass
pub struct GenerationOutput {
    /// Prompt followed by the decoded continuation
    pub text: String,
    /// Token count of the (possibly truncated) prompt
    pub prompt_tokens: usize,
    /// Number of newly generated tokens
    pub generated_tokens: usize,
    /// Generation throughput
    pub tokens_per_second: f64,
    /// Wall time for the whole pass
    pub total_time_ms: u128,
}

/// Runs generation against a loaded [`ModelContext`]
pub struct TextGenerator<'a> {
    context: &'a mut ModelContext,
}

impl<'a> TextGenerator<'a> {
    pub fn new(context: &'a mut ModelContext) -> Self {
        Self { context }
    }

    /// Generate a bounded continuation of `prompt`.
    ///
    /// The prompt is truncated to `max_input_tokens` at encode time and the
    /// continuation is capped at `max_new_tokens`; the two budgets are
    /// independent, so a long prompt cannot starve the completion. The
    /// returned text is the original prompt followed by the continuation,
    /// decoded without special-token markers.
    pub fn generate(&mut self, prompt: &str, config: &ModelConfig) -> Result<GenerationOutput> {
        let start_time = Instant::now();

        self.context.model.reset_cache()?;

        let prompt_tokens = self
            .context
            .tokenizer
            .encode_truncated(prompt, config.max_input_tokens)?;
        let prompt_len = prompt_tokens.len();
        info!("Prompt tokens: {}", prompt_len);

        if prompt_tokens.is_empty() {
            return Err(ItinerAiError::generation("Empty prompt"));
        }

        let mut logits_processor =
            LogitsProcessor::new(config.seed, config.temperature, config.top_p);

        let mut stop_tokens: Vec<u32> = self.context.model.eos_token_ids().to_vec();
        if let Some(id) = self.context.tokenizer.eos_token_id() {
            if !stop_tokens.contains(&id) {
                stop_tokens.push(id);
            }
        }

        let mut generated_tokens: Vec<u32> = Vec::new();

        // Process prompt (prefill)
        let input = Tensor::new(prompt_tokens.as_slice(), &self.context.device)?.unsqueeze(0)?;
        let mut logits = self.context.model.forward(&input, 0)?;

        let generation_start = Instant::now();

        // Generate tokens autoregressively
        for index in 0..config.max_new_tokens {
            let last_logits = last_token_logits(&logits)?.to_dtype(DType::F32)?;
            let next_token = logits_processor.sample(&last_logits)?;

            if stop_tokens.contains(&next_token) {
                debug!("Stop token {} generated at position {}", next_token, index);
                break;
            }

            generated_tokens.push(next_token);

            let input = Tensor::new(&[next_token], &self.context.device)?.unsqueeze(0)?;
            logits = self.context.model.forward(&input, prompt_len + index)?;
        }

        let generation_time = generation_start.elapsed();
        let total_time = start_time.elapsed();

        let tokens_per_second = if generation_time.as_secs_f64() > 0.0 {
            generated_tokens.len() as f64 / generation_time.as_secs_f64()
        } else {
            0.0
        };

        let completion = self.context.tokenizer.decode(&generated_tokens)?;

        info!(
            "Generated {} tokens in {:?} ({:.2} tokens/sec)",
            generated_tokens.len(),
            generation_time,
            tokens_per_second
        );

        Ok(GenerationOutput {
            text: format!("{prompt}{completion}"),
            prompt_tokens: prompt_len,
            generated_tokens: generated_tokens.len(),
            tokens_per_second,
            total_time_ms: total_time.as_millis(),
        })
    }
}

/// Reduce a logits tensor to the 1-D logits of the last position.
///
/// Model wrappers disagree on output shape: some return `[vocab]`, some
/// `[batch, vocab]`, some `[batch, seq, vocab]`.
fn last_token_logits(logits: &Tensor) -> Result<Tensor> {
    let dims = logits.dims();
    match dims.len() {
        1 => Ok(logits.clone()),
        2 => Ok(logits.get(dims[0] - 1)?),
        3 => {
            let seq_len = dims[1];
            Ok(logits.get(0)?.get(seq_len - 1)?)
        }
        _ => Err(ItinerAiError::generation(format!(
            "Unexpected logits shape: {dims:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::Device;

    #[test]
    fn test_last_token_logits_1d_passthrough() {
        let logits = Tensor::new(&[0.1f32, 0.2, 0.7], &Device::Cpu).unwrap();
        let last = last_token_logits(&logits).unwrap();
        assert_eq!(last.to_vec1::<f32>().unwrap(), vec![0.1, 0.2, 0.7]);
    }

    #[test]
    fn test_last_token_logits_2d_picks_last_row() {
        let logits = Tensor::new(&[[1f32, 2., 3.], [4., 5., 6.]], &Device::Cpu).unwrap();
        let last = last_token_logits(&logits).unwrap();
        assert_eq!(last.to_vec1::<f32>().unwrap(), vec![4., 5., 6.]);
    }

    #[test]
    fn test_last_token_logits_3d_picks_last_position() {
        let logits = Tensor::new(&[[[1f32, 2.], [3., 4.], [5., 6.]]], &Device::Cpu).unwrap();
        let last = last_token_logits(&logits).unwrap();
        assert_eq!(last.to_vec1::<f32>().unwrap(), vec![5., 6.]);
    }

    #[test]
    fn test_last_token_logits_rejects_higher_rank() {
        let logits = Tensor::zeros((1, 1, 2, 3), DType::F32, &Device::Cpu).unwrap();
        assert!(last_token_logits(&logits).is_err());
    }

    #[test]
    fn test_greedy_sampling_picks_argmax() {
        // With no temperature configured the processor decodes greedily.
        let mut processor = LogitsProcessor::new(42, None, None);
        let logits = Tensor::new(&[0.1f32, 3.0, 0.2, 1.5], &Device::Cpu).unwrap();
        assert_eq!(processor.sample(&logits).unwrap(), 1);
    }
}
