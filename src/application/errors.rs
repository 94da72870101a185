//! Application layer errors

use std::path::PathBuf;
use thiserror::Error;

/// Boxed cause reported by plugin code
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while loading the properties resource
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Resource not found on search path: {0}")]
    NotFound(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Fatal errors raised while activating bot definitions
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Configuration error: [{name}] does not implement BotDefinition")]
    NotABotDefinition {
        name: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("Configuration error: failed to activate [{name}]")]
    Instantiation {
        name: String,
        #[source]
        source: BoxError,
    },

    #[error("Configuration error: {} bot definitions failed", .0.len())]
    Multiple(Vec<DiscoveryError>),
}

impl DiscoveryError {
    /// Name of the failing registration, if there is a single one
    pub fn name(&self) -> Option<&str> {
        match self {
            DiscoveryError::NotABotDefinition { name, .. }
            | DiscoveryError::Instantiation { name, .. } => Some(name.as_str()),
            DiscoveryError::Multiple(_) => None,
        }
    }
}

/// Registry errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Bot definition '{0}' already registered")]
    AlreadyRegistered(String),
}
