//! # Adapters Layer
//!
//! Outbound port implementations backed by `shared-crypto`.

pub mod crypto;
