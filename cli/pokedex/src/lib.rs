//! Top-level application logic for the Pokédex catalog viewer.
//!
//! The rendering surface, animations, and the auth provider implementation
//! are external collaborators. This crate owns what sits between them and
//! the catalog API:
//!
//! - [`loader`]: batched detail fetching with progressive snapshots
//! - [`app`]: the state container with one update entry point per field
//! - [`auth`]: the consumed auth-provider contract and session gating
//! - [`config`]: layered runtime configuration

pub mod app;
pub mod auth;
pub mod config;
pub mod loader;
