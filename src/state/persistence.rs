use serde::{Serialize, Deserialize};
use thiserror::Error;
use super::field_value::FieldValue;

/// Errors that can occur while saving or restoring the field value
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize field: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid field data: {0}")]
    InvalidState(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Serializable copy of the field value, as stored by the host with the block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    #[serde(flatten)]
    pub value: FieldValue,
    /// Version of the crate that wrote the snapshot
    pub version: String,
}

impl FieldSnapshot {
    pub fn new(value: FieldValue) -> Self {
        Self {
            value,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn to_json(&self) -> PersistenceResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> PersistenceResult<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    fn validate(&self) -> PersistenceResult<()> {
        if self.version != env!("CARGO_PKG_VERSION") {
            log::warn!(
                "Snapshot version {} differs from current version {}",
                self.version,
                env!("CARGO_PKG_VERSION")
            );
        }
        if self.value.image.is_empty() {
            return Err(PersistenceError::InvalidState("image address is empty".to_owned()));
        }
        if self.value.original_image.is_empty() {
            return Err(PersistenceError::InvalidState("original image address is empty".to_owned()));
        }
        Ok(())
    }
}
