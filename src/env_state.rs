//! # maser-front environment state
//!
//! This module defines [`crate::env_state::MaserEnv`], the **shared environment object** of the
//! front-end. It bundles:
//!
//! - the [`FrontConfig`] (endpoint, output file names, optional timeout),
//! - a persistent **HTTP client** ([`reqwest::Client`]) reused by every submission.
//!
//! ## Structure
//!
//! ```text
//! MaserEnv
//! ├── config       (FrontConfig)
//! └── http_client  (reqwest::Client)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use maser_front::{config::FrontConfig, env_state::MaserEnv};
//!
//! let env = MaserEnv::new(FrontConfig::default()).unwrap();
//! let service = env.service();
//! ```
//!
//! ## Notes
//!
//! - [`reqwest::Client`] is reference counted internally, cloning the environment is cheap and
//!   keeps the connection pool shared.
use crate::{config::FrontConfig, maser_errors::MaserError, submission::HttpService};

#[derive(Debug, Clone)]
pub struct MaserEnv {
    pub config: FrontConfig,
    pub http_client: reqwest::Client,
}

impl MaserEnv {
    /// Create a new environment
    ///
    /// Arguments
    /// ---------
    /// * `config`: the front-end configuration
    ///
    /// Return
    /// ------
    /// * A new environment, the HTTP client applying `config.timeout()` if one is set
    /// * `MaserError::Http` if the HTTP client cannot be built
    pub fn new(config: FrontConfig) -> Result<Self, MaserError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(MaserEnv {
            http_client: builder.build()?,
            config,
        })
    }

    /// Simulation service reached through the shared HTTP client.
    pub fn service(&self) -> HttpService {
        HttpService::new(self.http_client.clone(), &self.config.endpoint)
    }
}
