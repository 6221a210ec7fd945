//! Core library for the weather averaging service.
//!
//! This crate defines:
//! - Configuration & credentials loaded from the environment
//! - Abstraction over temperature providers and two concrete clients
//! - The sequential, fail-fast averaging aggregator
//! - Shared domain models and the error taxonomy
//!
//! It is used by `weather-server`, but can also be reused by other binaries.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use aggregate::MultiProvider;
pub use config::{ApiKey, Config, ProviderConfig};
pub use error::{Error, Result};
pub use model::AggregateResult;
pub use provider::{ProviderId, TemperatureProvider, providers_from_config};
