//! Error types and handling for the `ItinerAI` application

use thiserror::Error;

/// Main error type for the `ItinerAI` application
#[derive(Error, Debug)]
pub enum ItinerAiError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Enrichment lookup errors (HTTP client setup, unexpected responses)
    #[error("Enrichment error: {message}")]
    Enrichment { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Model download or weight loading errors
    #[error("Model loading error: {message}")]
    ModelLoad { message: String },

    /// Tokenizer errors
    #[error("Tokenizer error: {message}")]
    Tokenizer { message: String },

    /// Text generation errors
    #[error("Generation error: {message}")]
    Generation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Tensor computation errors
    #[error("Candle error: {source}")]
    Candle {
        #[from]
        source: candle_core::Error,
    },

    /// Serialization errors
    #[error("Serialization error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },
}

impl ItinerAiError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new enrichment error
    pub fn enrichment<S: Into<String>>(message: S) -> Self {
        Self::Enrichment {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new model loading error
    pub fn model_load<S: Into<String>>(message: S) -> Self {
        Self::ModelLoad {
            message: message.into(),
        }
    }

    /// Create a new tokenizer error
    pub fn tokenizer<S: Into<String>>(message: S) -> Self {
        Self::Tokenizer {
            message: message.into(),
        }
    }

    /// Create a new generation error
    pub fn generation<S: Into<String>>(message: S) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ItinerAiError::Config { .. } => {
                "Configuration error. Please check your config file and settings.".to_string()
            }
            ItinerAiError::Enrichment { .. } => {
                "Unable to reach the destination summary service. Please check your internet connection."
                    .to_string()
            }
            ItinerAiError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            ItinerAiError::ModelLoad { .. } => {
                "Failed to load the language model. Please check the model identifier and your network access to the model hub."
                    .to_string()
            }
            ItinerAiError::Tokenizer { .. } => {
                "Failed to tokenize text with the loaded model's tokenizer.".to_string()
            }
            ItinerAiError::Generation { .. } => {
                "Itinerary generation failed. Please try again with a shorter request.".to_string()
            }
            ItinerAiError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            ItinerAiError::Candle { .. } => {
                "A tensor computation failed during generation.".to_string()
            }
            ItinerAiError::Serde { .. } => {
                "Failed to parse data from an external source.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = ItinerAiError::config("missing model id");
        assert!(matches!(config_err, ItinerAiError::Config { .. }));

        let enrichment_err = ItinerAiError::enrichment("connection failed");
        assert!(matches!(enrichment_err, ItinerAiError::Enrichment { .. }));

        let validation_err = ItinerAiError::validation("empty destination");
        assert!(matches!(validation_err, ItinerAiError::Validation { .. }));

        let load_err = ItinerAiError::model_load("weights not found");
        assert!(matches!(load_err, ItinerAiError::ModelLoad { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = ItinerAiError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let enrichment_err = ItinerAiError::enrichment("test");
        assert!(enrichment_err.user_message().contains("summary service"));

        let validation_err = ItinerAiError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let itinerai_err: ItinerAiError = io_err.into();
        assert!(matches!(itinerai_err, ItinerAiError::Io { .. }));
    }
}
