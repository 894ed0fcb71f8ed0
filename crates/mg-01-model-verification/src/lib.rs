//! # Model Verification Subsystem (MG-01)
//!
//! Fail-closed integrity gate for on-device inference models.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Package entities, digest engine, verification gate
//! - **Ports Layer** (`ports/`): Inbound API and outbound primitive/activation traits
//! - **Adapters Layer** (`adapters/`): Primitive implementations over `shared-crypto`
//! - **Service Layer** (`service.rs`): The load decision point
//!
//! ## Security Notes
//!
//! - **Fail-Closed**: every error inside the gate resolves to a rejection
//! - **Single Decision Point**: only `ModelLoadService` hands packages to an
//!   activator, and only as an `AdmittedModel`
//! - **No Hidden State**: the trusted key is an explicit parameter; nothing is
//!   cached between calls

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::crypto::EcdsaSignaturePrimitive;
pub use config::{ConfigError, GateConfig, SignatureFormat, SignatureScheme};
pub use domain::digest::{digest, Sha256DigestEngine};
pub use domain::entities::{
    AdmittedModel, BatchVerificationResult, ModelDigest, ModelPackage, TrustedKey,
    VerificationOutcome, VerificationStage,
};
pub use domain::errors::{
    ActivationError, DigestError, LoadError, PackageError, PrimitiveError, RejectionReason,
};
pub use domain::gate::VerificationGate;
pub use ports::inbound::ModelVerificationApi;
pub use ports::outbound::{DigestPrimitive, ModelActivator, SignaturePrimitive};
pub use service::ModelLoadService;
