//! Error types for `sitebridge-settings`.

use thiserror::Error;

/// Main error type for manifest and settings resolution.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// A required setting is not declared by the manifest.
    #[error("manifest '{manifest_id}' does not declare setting '{setting_id}'")]
    MissingSetting {
        manifest_id: String,
        setting_id: String,
    },

    /// The settings backend failed to produce a value.
    #[error("failed to resolve value for setting '{setting_id}': {message}")]
    Resolve {
        setting_id: String,
        message: String,
    },
}

/// Result type alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
