//! Codec error types

use thiserror::Error;

/// Errors raised while decoding or encoding a metadata block
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("{format} decode error: {source}")]
    Decode {
        format: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{format} encode error: {source}")]
    Encode {
        format: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{format} cannot represent {what}")]
    Unrepresentable { format: &'static str, what: String },

    #[error("{format} value for key '{key}' is not a finite number")]
    NonFinite { format: &'static str, key: String },
}

impl CodecError {
    pub fn decode(format: &'static str, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        CodecError::Decode {
            format,
            source: Box::new(source),
        }
    }

    pub fn encode(format: &'static str, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        CodecError::Encode {
            format,
            source: Box::new(source),
        }
    }

    /// True if the failure happened while parsing input
    pub fn is_decode(&self) -> bool {
        matches!(self, CodecError::Decode { .. } | CodecError::NonFinite { .. })
    }
}
