//! # Front-end configuration
//!
//! Optional TOML file, every key has a default:
//!
//! ```toml
//! endpoint = "http://127.0.0.1:8000/run_maser"
//! download_filename = "MASER time series.csv"
//! figure_filename = "maser.png"
//! output_dir = "."
//! # timeout_secs = 30
//! ```
//!
//! No timeout is applied unless `timeout_secs` is set.
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::{
    constants::{DEFAULT_DOWNLOAD_FILENAME, DEFAULT_ENDPOINT, DEFAULT_FIGURE_FILENAME},
    maser_errors::MaserError,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrontConfig {
    pub endpoint: String,
    pub download_filename: String,
    pub figure_filename: String,
    pub output_dir: PathBuf,
    pub timeout_secs: Option<u64>,
}

impl Default for FrontConfig {
    fn default() -> Self {
        FrontConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            download_filename: DEFAULT_DOWNLOAD_FILENAME.to_string(),
            figure_filename: DEFAULT_FIGURE_FILENAME.to_string(),
            output_dir: PathBuf::from("."),
            timeout_secs: None,
        }
    }
}

impl FrontConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, MaserError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load the configuration from a TOML file.
    ///
    /// Arguments
    /// ---------
    /// * `path`: the configuration file
    ///
    /// Return
    /// ------
    /// * the configuration, missing keys taking their default value
    /// * `MaserError::Io` if the file cannot be read, `MaserError::Config` if it is not valid
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, MaserError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn figure_path(&self) -> PathBuf {
        self.output_dir.join(&self.figure_filename)
    }

    pub fn series_path(&self) -> PathBuf {
        self.output_dir.join(&self.download_filename)
    }
}

#[cfg(test)]
mod config_test {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FrontConfig::from_toml_str("").unwrap();
        assert_eq!(config, FrontConfig::default());
        assert_eq!(config.endpoint, "http://127.0.0.1:8000/run_maser");
        assert_eq!(config.download_filename, "MASER time series.csv");
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_partial_file() {
        let config = FrontConfig::from_toml_str(
            r#"
            endpoint = "http://maser.example:9000/run_maser"
            output_dir = "out"
            timeout_secs = 30
            "#,
        )
        .unwrap();
        assert_eq!(config.endpoint, "http://maser.example:9000/run_maser");
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.figure_path(), PathBuf::from("out").join("maser.png"));
        assert_eq!(
            config.series_path(),
            PathBuf::from("out").join("MASER time series.csv")
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = FrontConfig::from_toml_str("endpont = \"x\"").unwrap_err();
        assert!(matches!(err, MaserError::Config(_)));
    }
}
