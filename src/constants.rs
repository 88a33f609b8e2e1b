//! # Constants and type definitions for maser-front
//!
//! This module centralizes the **fixed strings** of the remote simulation contract and the
//! shared display, together with the small type aliases used throughout the crate.
//!
//! ## Overview
//!
//! - Default endpoint of the MASER simulation service
//! - MIME prefixes used to build the data URIs of the shared display
//! - Shared error indicator texts
//! - Type aliases for request generations and parameter keys

// -------------------------------------------------------------------------------------------------
// Remote service contract
// -------------------------------------------------------------------------------------------------

/// Default address of the MASER simulation service (`POST /run_maser`)
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/run_maser";

// -------------------------------------------------------------------------------------------------
// Shared display
// -------------------------------------------------------------------------------------------------

/// Data URI prefix of the figure returned by the service
pub const FIGURE_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Data URI prefix of the downloadable time series
pub const SERIES_DATA_URI_PREFIX: &str = "data:text/csv;base64,";

/// Default file name offered by the download link
pub const DEFAULT_DOWNLOAD_FILENAME: &str = "MASER time series.csv";

/// Default file name used when the figure is written to disk
pub const DEFAULT_FIGURE_FILENAME: &str = "maser.png";

/// Prefix placed in front of every inline or shared error text
pub const ERROR_TEXT_PREFIX: &str = "- ";

/// Shared error indicator text while at least one field holds an invalid value
pub const INVALID_INPUT_TEXT: &str = "- Invalid input";

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Monotonic identifier of an issued submission; only the latest one may update the display
pub type Generation = u64;

/// Key of a field, unique within its group (and across the whole schema)
pub type ParamKey = &'static str;
