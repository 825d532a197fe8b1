//! Error handling for Hearth Fire
//!
//! Untrusted data (persisted tags, network requests, lookups by identifier)
//! never produces an error: it degrades to the default fire type instead.
//! The variants below cover developer-side contract violations and
//! configuration/definition parsing.

use crate::component::ComponentKind;
use crate::identifier::Identifier;

/// Main error type for Hearth Fire
#[derive(Debug, thiserror::Error)]
pub enum FireError {
    // Builder Errors
    #[error("Invalid fire type '{fire_type}': {reason}")]
    InvalidFireType { fire_type: String, reason: String },

    #[error("Invalid damage {damage} for fire '{fire_type}': damage must be finite")]
    InvalidDamage { fire_type: Identifier, damage: f32 },

    // Component Errors
    #[error("Fire '{fire_type}' has no {kind} component")]
    MissingComponent {
        fire_type: Identifier,
        kind: ComponentKind,
    },

    #[error("Component {kind} '{id}' of fire '{fire_type}' is not registered with the host")]
    UnresolvedComponent {
        fire_type: Identifier,
        kind: ComponentKind,
        id: Identifier,
    },

    #[error("Host rejected registration of '{id}': {reason}")]
    HostRegistration { id: Identifier, reason: String },

    // Data Errors
    #[error("Invalid fire definition: {0}")]
    Definition(String),

    #[error("Invalid fire settings: {0}")]
    Config(String),

    #[error("IO error for {path}: {error}")]
    Io { path: String, error: String },
}

/// Type alias for Results in Hearth Fire
pub type FireResult<T> = Result<T, FireError>;

impl From<serde_json::Error> for FireError {
    fn from(error: serde_json::Error) -> Self {
        FireError::Definition(error.to_string())
    }
}

impl From<toml::de::Error> for FireError {
    fn from(error: toml::de::Error) -> Self {
        FireError::Config(error.to_string())
    }
}

/// Convert Option to Result with context
pub trait OptionExt<T> {
    fn ok_or_fire<F>(self, f: F) -> FireResult<T>
    where
        F: FnOnce() -> FireError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_fire<F>(self, f: F) -> FireResult<T>
    where
        F: FnOnce() -> FireError,
    {
        self.ok_or_else(f)
    }
}
