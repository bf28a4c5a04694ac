//! Configuration file loading for the terminal driver.
//!
//! Settings are read from a TOML file, `chess.toml` in the current directory
//! unless another path is given on the command line.

use chess_core::PieceKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// `auto_promote` names a kind a pawn cannot become.
    #[error("Cannot auto-promote to {0}")]
    InvalidPromotion(PieceKind),
}

/// Driver settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Draw pieces with Unicode chess symbols instead of letters.
    #[serde(default)]
    pub unicode: bool,
    /// List the legal destinations after a piece is selected.
    /// Defaults to true.
    #[serde(default = "default_show_moves")]
    pub show_moves: bool,
    /// Kind chosen automatically whenever a pawn reaches its last rank.
    /// When unset the player is asked.
    #[serde(default)]
    pub auto_promote: Option<PieceKind>,
    /// Maximum level for log output, e.g. "debug". Defaults to "warn".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_show_moves() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            unicode: false,
            show_moves: default_show_moves(),
            auto_promote: None,
            log_level: default_log_level(),
        }
    }
}

impl CliConfig {
    /// Loads the configuration at `path`.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// [`ConfigError::ParseError`] if it is not valid TOML, and
    /// [`ConfigError::InvalidPromotion`] if `auto_promote` is a pawn or king.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses and validates configuration text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: CliConfig = toml::from_str(content)?;
        if let Some(kind) = config.auto_promote {
            if !kind.is_promotion_target() {
                return Err(ConfigError::InvalidPromotion(kind));
            }
        }
        Ok(config)
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        PathBuf::from("chess.toml")
    }
}
