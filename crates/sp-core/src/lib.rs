//! # sp-core
//!
//! Core utilities, configuration, and error handling for the SAML service
//! provider registry.
//!
//! This crate provides foundational types shared by the storage, metadata
//! and manager crates.
//!
//! ## Modules
//!
//! - [`config`] - environment-driven configuration
//! - [`telemetry`] - tracing subscriber installation
//! - [`event`] - audit events for configuration changes

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod event;
pub mod telemetry;

pub use config::Config;
pub use error::{Error, Result};
