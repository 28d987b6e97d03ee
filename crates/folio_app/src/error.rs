//! Error types for folio_app

use std::path::PathBuf;

use thiserror::Error;

use folio_animation::AnimationError;
use folio_core::FolioError;

/// Errors raised while configuring or starting the page runtime
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration is not valid TOML for [`crate::SiteConfig`]
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration parsed but holds an unusable value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Selector or document failure
    #[error(transparent)]
    Folio(#[from] FolioError),

    /// Animation state machine could not be built
    #[error(transparent)]
    Animation(#[from] AnimationError),
}

/// Result type for folio_app operations
pub type Result<T> = std::result::Result<T, AppError>;
