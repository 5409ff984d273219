//! Walk configuration types.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default limit on simultaneously open file handles.
pub const DEFAULT_MAX_OPEN_FILES: usize = 20;

/// Default read buffer for content hashing.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 64 * 1024;

/// Configuration for the concurrent walker.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct WalkConfig {
    /// Maximum number of file handles open at the same time.
    #[builder(default = "DEFAULT_MAX_OPEN_FILES")]
    #[serde(default = "default_max_open_files")]
    pub max_open_files: usize,

    /// Buffer size used when streaming file content into the hasher.
    #[builder(default = "DEFAULT_READ_BUFFER_SIZE")]
    #[serde(default = "default_read_buffer_size")]
    pub read_buffer_size: usize,
}

fn default_max_open_files() -> usize {
    DEFAULT_MAX_OPEN_FILES
}

fn default_read_buffer_size() -> usize {
    DEFAULT_READ_BUFFER_SIZE
}

impl WalkConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.max_open_files == Some(0) {
            return Err("max_open_files must be at least 1".to_string());
        }
        if self.read_buffer_size == Some(0) {
            return Err("read_buffer_size must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl WalkConfig {
    /// Create a new walk config builder.
    pub fn builder() -> WalkConfigBuilder {
        WalkConfigBuilder::default()
    }

    /// Create a config with the given handle limit and default buffer size.
    pub fn new(max_open_files: usize) -> Self {
        Self {
            max_open_files,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_OPEN_FILES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = WalkConfig::builder()
            .max_open_files(10usize)
            .read_buffer_size(4096usize)
            .build()
            .unwrap();

        assert_eq!(config.max_open_files, 10);
        assert_eq!(config.read_buffer_size, 4096);
    }

    #[test]
    fn test_builder_defaults() {
        let config = WalkConfig::builder().build().unwrap();
        assert_eq!(config.max_open_files, DEFAULT_MAX_OPEN_FILES);
        assert_eq!(config.read_buffer_size, DEFAULT_READ_BUFFER_SIZE);
    }

    #[test]
    fn test_builder_rejects_zero() {
        assert!(WalkConfig::builder().max_open_files(0usize).build().is_err());
        assert!(WalkConfig::builder().read_buffer_size(0usize).build().is_err());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: WalkConfig = serde_json::from_str(r#"{"max_open_files": 5}"#).unwrap();
        assert_eq!(config.max_open_files, 5);
        assert_eq!(config.read_buffer_size, DEFAULT_READ_BUFFER_SIZE);
    }
}
