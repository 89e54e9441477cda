//! Model file resolution against the Hugging Face Hub

use crate::{ItinerAiError, Result};
use hf_hub::api::sync::{Api, ApiBuilder, ApiRepo};
use hf_hub::{Repo, RepoType};
use std::path::PathBuf;
use tracing::info;

/// Locally cached paths of a downloaded checkpoint
pub struct ModelFiles {
    /// Path to `config.json`
    pub config: PathBuf,
    /// Path to `tokenizer.json`
    pub tokenizer: PathBuf,
    /// Safetensor weight files (one or more shards)
    pub weights: Vec<PathBuf>,
}

/// Download config, tokenizer, and weights for a model identifier
pub fn fetch_model_files(
    model_id: &str,
    revision: &str,
    token: Option<&str>,
) -> Result<ModelFiles> {
    info!("Resolving model files: {} (revision: {})", model_id, revision);

    let api = match token {
        Some(t) => ApiBuilder::new()
            .with_token(Some(t.to_string()))
            .build()
            .map_err(|e| ItinerAiError::model_load(e.to_string()))?,
        None => Api::new().map_err(|e| ItinerAiError::model_load(e.to_string()))?,
    };

    let repo = api.repo(Repo::with_revision(
        model_id.to_string(),
        RepoType::Model,
        revision.to_string(),
    ));

    let config = repo.get("config.json").map_err(|e| {
        ItinerAiError::model_load(format!("Failed to download config.json: {e}"))
    })?;

    let tokenizer = repo.get("tokenizer.json").map_err(|e| {
        ItinerAiError::model_load(format!("Failed to download tokenizer.json: {e}"))
    })?;

    let weights = download_weights(&repo)?;

    info!(
        "Model files resolved: config={:?}, tokenizer={:?}, weights={} file(s)",
        config,
        tokenizer,
        weights.len()
    );

    Ok(ModelFiles {
        config,
        tokenizer,
        weights,
    })
}

/// Fetch weight files: a single `model.safetensors`, or every shard listed in
/// `model.safetensors.index.json` for sharded checkpoints.
fn download_weights(repo: &ApiRepo) -> Result<Vec<PathBuf>> {
    if let Ok(path) = repo.get("model.safetensors") {
        return Ok(vec![path]);
    }

    let index_path = repo.get("model.safetensors.index.json").map_err(|e| {
        ItinerAiError::model_load(format!(
            "Could not find model weights (no model.safetensors and no index file): {e}"
        ))
    })?;

    let index: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&index_path)?)?;
    let weight_map = index
        .get("weight_map")
        .and_then(|v| v.as_object())
        .ok_or_else(|| {
            ItinerAiError::model_load("Malformed safetensors index: missing weight_map")
        })?;

    let mut filenames: Vec<&str> = weight_map.values().filter_map(|v| v.as_str()).collect();
    filenames.sort_unstable();
    filenames.dedup();

    let mut weights = Vec::with_capacity(filenames.len());
    for filename in filenames {
        let path = repo.get(filename).map_err(|e| {
            ItinerAiError::model_load(format!("Failed to download weight shard {filename}: {e}"))
        })?;
        weights.push(path);
    }

    if weights.is_empty() {
        return Err(ItinerAiError::model_load(
            "Safetensors index listed no weight files",
        ));
    }

    Ok(weights)
}
