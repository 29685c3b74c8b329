//! # Providers
//!
//! Clients for the external services this crate depends on: text generation and
//! embeddings (`ai`), plus the factory that builds them from configuration and a
//! caller-held credential (`factory`).

pub mod ai;
pub mod factory;
