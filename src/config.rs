//! # Configuration Management
//!
//! Centralized configuration for the serialization engine.
//!
//! This module provides structured configuration for buffer construction and
//! decode-time limits.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()` / `from_toml()`
//! - Environment variables via `from_env()`
//! - Direct instantiation with defaults
//!
//! ## Security Considerations
//! - `max_field_len` bounds how much memory a single decoded length prefix may
//!   request, so a hostile 4-byte prefix cannot force a multi-gigabyte
//!   allocation.

use crate::error::{Result, SerdesError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default initial capacity for new buffers (1 KB)
pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;

/// Default ceiling for a single decoded field (16 MB)
pub const DEFAULT_MAX_FIELD_LEN: usize = 16 * 1024 * 1024;

/// Engine configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SerdesConfig {
    /// Capacity (bytes) a fresh buffer starts with
    pub initial_capacity: usize,

    /// Maximum length a decoded String/Bytes prefix may claim
    pub max_field_len: usize,
}

impl Default for SerdesConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_field_len: DEFAULT_MAX_FIELD_LEN,
        }
    }
}

impl SerdesConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path).map_err(|e| {
            SerdesError::InvalidOperation(format!("Failed to open config file: {e}"))
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(|e| {
            SerdesError::InvalidOperation(format!("Failed to read config file: {e}"))
        })?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| SerdesError::InvalidOperation(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Start with defaults
        let mut config = Self::default();

        // Override with environment variables
        if let Ok(capacity) = std::env::var("FIELD_SERDES_INITIAL_CAPACITY") {
            if let Ok(val) = capacity.parse::<usize>() {
                config.initial_capacity = val;
            }
        }

        if let Ok(limit) = std::env::var("FIELD_SERDES_MAX_FIELD_LEN") {
            if let Ok(val) = limit.parse::<usize>() {
                config.max_field_len = val;
            }
        }

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            SerdesError::InvalidOperation(format!("Failed to serialize config: {e}"))
        })?;

        std::fs::write(path, content).map_err(|e| {
            SerdesError::InvalidOperation(format!("Failed to write config file: {e}"))
        })?;

        Ok(())
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        // Validate initial capacity
        if self.initial_capacity == 0 {
            errors.push("Initial capacity must be greater than 0".to_string());
        } else if self.initial_capacity > 1024 * 1024 * 1024 {
            errors.push(format!(
                "Initial capacity very large: {} bytes (maximum recommended: 1 GB)",
                self.initial_capacity
            ));
        }

        // Validate field length limit
        if self.max_field_len == 0 {
            errors.push("Max field length must be greater than 0".to_string());
        } else if self.max_field_len > u32::MAX as usize {
            errors.push(format!(
                "Max field length exceeds the 32-bit prefix range: {}",
                self.max_field_len
            ));
        }

        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(SerdesError::InvalidOperation(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}
