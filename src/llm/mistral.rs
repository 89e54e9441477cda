//! Mistral architecture wrapper

use super::{eos_ids_from_config, LanguageModel};
use crate::Result;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::mistral::{Config, Model};
use std::path::{Path, PathBuf};
use tracing::info;

pub struct MistralModel {
    model: Model,
    eos_token_ids: Vec<u32>,
}

impl MistralModel {
    pub fn load(config_path: &Path, weight_paths: &[PathBuf], device: &Device) -> Result<Self> {
        info!("Loading Mistral model configuration...");
        let config_str = std::fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_str)?;

        let config_json: serde_json::Value = serde_json::from_str(&config_str)?;
        let mut eos_token_ids = eos_ids_from_config(&config_json);
        if eos_token_ids.is_empty() {
            // </s> for Mistral checkpoints
            eos_token_ids.push(2);
        }

        info!(
            "Model config: vocab_size={}, hidden_size={}, num_layers={}, num_heads={}",
            config.vocab_size,
            config.hidden_size,
            config.num_hidden_layers,
            config.num_attention_heads
        );

        let dtype = if device.is_cuda() {
            DType::BF16
        } else {
            DType::F32
        };

        info!("Loading model weights...");
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(weight_paths, dtype, device)? };

        let model = Model::new(&config, vb)?;

        info!("Mistral model loaded successfully");
        Ok(Self {
            model,
            eos_token_ids,
        })
    }
}

impl LanguageModel for MistralModel {
    fn forward(&mut self, input_ids: &Tensor, position: usize) -> Result<Tensor> {
        Ok(self.model.forward(input_ids, position)?)
    }

    fn reset_cache(&mut self) -> Result<()> {
        self.model.clear_kv_cache();
        Ok(())
    }

    fn eos_token_ids(&self) -> &[u32] {
        &self.eos_token_ids
    }
}
