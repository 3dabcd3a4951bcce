use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading or validating a [`FieldConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse field config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid field config: {0}")]
    Invalid(&'static str),
}

/// Explicit configuration handed to the field at construction.
///
/// Everything the panel needs from its host is here; nothing is read from
/// ambient editor state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old configs
pub struct FieldConfig {
    /// Base path of the host's media directory, usually ending in `/`.
    pub media_path: String,
    /// Directory of the seed images, relative to `media_path`.
    pub gallery_dir: String,
    /// Extension of the seed images, without the dot.
    pub image_extension: String,
    /// How long a commit may stay in flight before it is reported as failed.
    #[serde(with = "duration_millis")]
    pub commit_timeout: Duration,
    /// Maximum number of images kept for undo; the oldest are dropped first.
    pub undo_depth: usize,
    /// Half-width of the square pen used when rasterizing the stroke mask.
    pub mask_pen_radius: u32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            media_path: "media/".to_owned(),
            gallery_dir: "extensions/ganpaint_images/".to_owned(),
            image_extension: "jpg".to_owned(),
            commit_timeout: Duration::from_secs(30),
            undo_depth: 10,
            mask_pen_radius: 0,
        }
    }
}

impl FieldConfig {
    pub fn with_media_path(media_path: impl Into<String>) -> Self {
        Self {
            media_path: media_path.into(),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.image_extension.is_empty() {
            return Err(ConfigError::Invalid("image extension must not be empty"));
        }
        if self.commit_timeout.is_zero() {
            return Err(ConfigError::Invalid("commit timeout must be positive"));
        }
        Ok(())
    }

    /// Full prefix every seed image address starts with.
    pub fn gallery_base(&self) -> String {
        format!("{}{}", self.media_path, self.gallery_dir)
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = FieldConfig::from_json(r#"{ "media_path": "/static/media/" }"#).unwrap();
        assert_eq!(config.media_path, "/static/media/");
        assert_eq!(config.undo_depth, 10);
        assert_eq!(config.gallery_base(), "/static/media/extensions/ganpaint_images/");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result = FieldConfig::from_json(r#"{ "commit_timeout": 0 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
