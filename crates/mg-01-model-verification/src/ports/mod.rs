//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that the load decision point and callers use
//! - **Outbound (Driven)**: Primitives and the activation pipeline

pub mod inbound;
pub mod outbound;
