//! Llama architecture wrapper

use super::{eos_ids_from_config, LanguageModel};
use crate::Result;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::llama::{Cache, Config, Llama, LlamaConfig};
use std::path::{Path, PathBuf};
use tracing::info;

pub struct LlamaModel {
    model: Llama,
    cache: Cache,
    config: Config,
    device: Device,
    dtype: DType,
    eos_token_ids: Vec<u32>,
}

impl LlamaModel {
    pub fn load(config_path: &Path, weight_paths: &[PathBuf], device: &Device) -> Result<Self> {
        info!("Loading Llama model configuration...");
        let config_str = std::fs::read_to_string(config_path)?;
        let llama_config: LlamaConfig = serde_json::from_str(&config_str)?;
        let config = llama_config.into_config(false);

        let config_json: serde_json::Value = serde_json::from_str(&config_str)?;
        let mut eos_token_ids = eos_ids_from_config(&config_json);
        if eos_token_ids.is_empty() {
            // <|end_of_text|> for Llama 3 checkpoints
            eos_token_ids.push(128001);
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

        let cache = Cache::new(true, dtype, &config, device)?;
        let model = Llama::load(vb, &config)?;

        info!("Llama model loaded successfully");
        Ok(Self {
            model,
            cache,
            config,
            device: device.clone(),
            dtype,
            eos_token_ids,
        })
    }
}

impl LanguageModel for LlamaModel {
    fn forward(&mut self, input_ids: &Tensor, position: usize) -> Result<Tensor> {
        Ok(self.model.forward(input_ids, position, &mut self.cache)?)
    }

    fn reset_cache(&mut self) -> Result<()> {
        self.cache = Cache::new(true, self.dtype, &self.config, &self.device)?;
        Ok(())
    }

    fn eos_token_ids(&self) -> &[u32] {
        &self.eos_token_ids
    }
}
