//! # Shared Crypto - Trusted Primitives
//!
//! Thin wrappers over the RustCrypto primitives the verification gate treats
//! as a trusted black box.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256 | Model payload digests |
//! | `ecdsa` | ECDSA P-256 / secp256k1 | Detached model signatures |
//!
//! ## Security Properties
//!
//! - **P-256**: default curve, matches the publisher toolchain
//! - **secp256k1**: only reachable through an explicit `Curve` selection
//! - **PEM/SPKI**: keys are parsed from `BEGIN PUBLIC KEY` containers; the
//!   curve OID inside the container must match the requested curve

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;

// Re-exports
pub use ecdsa::{Curve, EcdsaPublicKey, SignatureEncoding};
pub use errors::CryptoError;
pub use hashing::{sha256, sha256_hex, Hash};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
