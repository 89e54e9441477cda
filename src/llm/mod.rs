//! Local language model loading and single-shot text generation
//!
//! The model and tokenizer are loaded once at process start into a
//! [`ModelContext`] that is explicitly passed to the generator, then held for
//! the process lifetime. Weights resolve against the Hugging Face Hub and run
//! through candle as pure forward passes (no gradients are ever computed).

mod device;
mod generator;
mod llama;
mod loader;
mod mistral;
mod tokenizer;

pub use generator::{GenerationOutput, TextGenerator};
pub use loader::ModelFiles;
pub use tokenizer::TokenizerWrapper;

use crate::config::ModelConfig;
use crate::{ItinerAiError, Result};
use candle_core::{Device, Tensor};
use std::path::Path;
use tracing::info;

/// Trait for causal language models that produce next-token logits
pub trait LanguageModel: Send {
    /// Forward pass returning logits for the next token
    fn forward(&mut self, input_ids: &Tensor, position: usize) -> Result<Tensor>;

    /// Reset the model's KV cache before a fresh request
    fn reset_cache(&mut self) -> Result<()>;

    /// End-of-sequence token ids that terminate generation
    fn eos_token_ids(&self) -> &[u32];
}

/// Supported model architectures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelArchitecture {
    Llama,
    Mistral,
}

/// Detect the model architecture from its `config.json`
pub fn detect_architecture(config_path: &Path) -> Result<ModelArchitecture> {
    let config_str = std::fs::read_to_string(config_path)?;
    let config: serde_json::Value = serde_json::from_str(&config_str)?;

    let mut names: Vec<String> = Vec::new();
    if let Some(archs) = config.get("architectures").and_then(|v| v.as_array()) {
        names.extend(
            archs
                .iter()
                .filter_map(|v| v.as_str())
                .map(str::to_lowercase),
        );
    }
    if let Some(model_type) = config.get("model_type").and_then(|v| v.as_str()) {
        names.push(model_type.to_lowercase());
    }

    for name in &names {
        if name.contains("llama") {
            return Ok(ModelArchitecture::Llama);
        }
        if name.contains("mistral") {
            return Ok(ModelArchitecture::Mistral);
        }
    }

    Err(ItinerAiError::model_load(format!(
        "Unsupported model architecture (expected llama or mistral, config declares: {})",
        if names.is_empty() {
            "nothing".to_string()
        } else {
            names.join(", ")
        }
    )))
}

/// Read `eos_token_id` from a raw model config, accepting both the single-id
/// and list-of-ids forms used across checkpoint configs.
pub(crate) fn eos_ids_from_config(config: &serde_json::Value) -> Vec<u32> {
    match config.get("eos_token_id") {
        Some(serde_json::Value::Number(n)) => {
            n.as_u64().map(|id| vec![id as u32]).unwrap_or_default()
        }
        Some(serde_json::Value::Array(ids)) => ids
            .iter()
            .filter_map(|v| v.as_u64())
            .map(|id| id as u32)
            .collect(),
        _ => Vec::new(),
    }
}

/// Process-lifetime model state: tokenizer, model, and execution device
///
/// Constructed once during process initialization; failure here is fatal
/// because no request can be served without a model.
pub struct ModelContext {
    pub(crate) model: Box<dyn LanguageModel>,
    pub(crate) tokenizer: TokenizerWrapper,
    pub(crate) device: Device,
    /// Identifier the model was resolved from
    pub model_id: String,
}

impl ModelContext {
    /// Download and load the configured model and tokenizer
    pub fn load(config: &ModelConfig) -> Result<Self> {
        let device = device::get_device(config.cpu)?;
        info!("Using device: {}", device::device_info(&device));

        let files = loader::fetch_model_files(
            &config.model_id,
            &config.revision,
            config.hf_token.as_deref(),
        )?;

        let tokenizer = TokenizerWrapper::load(&files.tokenizer)?;

        let architecture = detect_architecture(&files.config)?;
        info!("Detected architecture: {:?}", architecture);

        let model: Box<dyn LanguageModel> = match architecture {
            ModelArchitecture::Llama => {
                Box::new(llama::LlamaModel::load(&files.config, &files.weights, &device)?)
            }
            ModelArchitecture::Mistral => Box::new(mistral::MistralModel::load(
                &files.config,
                &files.weights,
                &device,
            )?),
        };

        info!(
            "Model '{}' loaded ({} token vocabulary)",
            config.model_id,
            tokenizer.vocab_size()
        );

        Ok(Self {
            model,
            tokenizer,
            device,
            model_id: config.model_id.clone(),
        })
    }

    /// Access the loaded tokenizer
    pub fn tokenizer(&self) -> &TokenizerWrapper {
        &self.tokenizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Scoped temp file so each detection test gets its own config.json
    struct TempConfig {
        path: std::path::PathBuf,
    }

    impl TempConfig {
        fn new(name: &str, json: &str) -> Self {
            let path = std::env::temp_dir().join(format!(
                "itinerai-test-{}-{}.json",
                std::process::id(),
                name
            ));
            std::fs::write(&path, json).unwrap();
            Self { path }
        }
    }

    impl Drop for TempConfig {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.path);
        }
    }

    #[test]
    fn test_detect_llama_from_architectures() {
        let config = TempConfig::new("llama", r#"{"architectures":["LlamaForCausalLM"]}"#);
        assert_eq!(
            detect_architecture(&config.path).unwrap(),
            ModelArchitecture::Llama
        );
    }

    #[test]
    fn test_detect_mistral_from_model_type() {
        let config = TempConfig::new("mistral", r#"{"model_type":"mistral"}"#);
        assert_eq!(
            detect_architecture(&config.path).unwrap(),
            ModelArchitecture::Mistral
        );
    }

    #[test]
    fn test_detect_unknown_architecture_fails() {
        let config = TempConfig::new("unknown", r#"{"architectures":["GptBigCodeForCausalLM"]}"#);
        let result = detect_architecture(&config.path);
        assert!(matches!(result, Err(ItinerAiError::ModelLoad { .. })));
    }

    #[test]
    fn test_eos_ids_single_and_list() {
        let single: serde_json::Value = serde_json::json!({"eos_token_id": 128001});
        assert_eq!(eos_ids_from_config(&single), vec![128001]);

        let list: serde_json::Value =
            serde_json::json!({"eos_token_id": [128001, 128008, 128009]});
        assert_eq!(eos_ids_from_config(&list), vec![128001, 128008, 128009]);

        let absent: serde_json::Value = serde_json::json!({});
        assert!(eos_ids_from_config(&absent).is_empty());
    }
}
