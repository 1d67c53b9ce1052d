//! HTTP client for the upstream Pokédex catalog API.
//!
//! This crate provides:
//! - HTTP client construction with timeouts and default headers
//! - The catalog operations: bounded entry listing, per-entry detail
//!   enrichment, and listing by type tag
//! - Wire-to-domain conversion (image selection policy, legendary heuristic)
//!
//! ## Usage
//!
//! ```ignore
//! use pokedex_catalog::{CatalogClient, CatalogClientConfig, ClientTrait};
//!
//! let client = CatalogClient::new(CatalogClientConfig::default())?;
//! let summaries = client.list_entries(500).await?;
//! let entry = client.entry_detail(&summaries[0].name).await;
//! ```

mod client;
mod config;
mod error;
pub mod types;

pub use client::{CatalogClient, ClientTrait};
pub use config::{CatalogClientConfig, DEFAULT_CATALOG_URL};
pub use error::CatalogError;
pub use types::{Ability, CatalogEntry, EntrySummary, StatValue};
