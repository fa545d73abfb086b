//! Azure Speech adapter for readaloud.
//!
//! [`DefaultAzureClient`] implements the core [`SynthesisGateway`] and
//! [`VoiceCatalog`] ports over the Azure Speech REST API. Credentials travel
//! with each request, so one client serves any number of regions.
//!
//! [`SynthesisGateway`]: readaloud_core::SynthesisGateway
//! [`VoiceCatalog`]: readaloud_core::VoiceCatalog

#![deny(unused_crate_dependencies)]
// DefaultAzureClient is meant to be used through the core ports, not its
// internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod ssml;
mod url;

// ============================================================================
// Public API
// ============================================================================

pub use client::DefaultAzureClient;
pub use config::AzureClientConfig;
pub use error::{AzureError, AzureResult};
pub use models::output_format;
pub use ssml::build_ssml;

// Silence unused dev-dependency warnings
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tokio_test as _;
