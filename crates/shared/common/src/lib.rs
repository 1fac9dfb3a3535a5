//! Common utilities shared across the service crates.
//!
//! This crate provides:
//! - Unified error handling for the HTTP surface
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
