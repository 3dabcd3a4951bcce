use thiserror::Error;
use crate::config::ConfigError;
use crate::state::PersistenceError;

/// Errors surfaced to the host when building or restoring a field
#[derive(Debug, Error)]
pub enum FieldError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub type FieldResult<T> = Result<T, FieldError>;
