//! Error types for asset loading and settings.

use thiserror::Error;

/// Asset gate failures. Fatal to starting a session; never retried.
#[derive(Error, Debug)]
pub enum AssetError {
    /// A required asset could not be found.
    #[error("Missing asset: {asset}")]
    Missing {
        /// Asset name or path.
        asset: String,
    },

    /// An asset was found but could not be decoded.
    #[error("Failed to decode '{asset}': {reason}")]
    Decode {
        /// Asset name or path.
        asset: String,
        /// Decoder message.
        reason: String,
    },

    /// I/O error while reading an asset.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings file failures.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON.
    #[error("Invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
