//! # maser-front
//!
//! Parameter form of the MASER simulation: labelled inputs for the star, planet, emission cone
//! and observation parameters, validated on every change and forwarded to the remote
//! simulation service, whose figure and downloadable time series are shown in a shared display.
//!
//! Start from [`app::MaserApp`].
pub mod app;
pub mod config;
pub mod constants;
pub mod display;
pub mod env_state;
pub mod fields;
pub mod maser_errors;
pub mod parameters;
pub mod session;
pub mod state;
pub mod submission;
