//! # Domain Layer
//!
//! Pure verification logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod digest;
pub mod entities;
pub mod errors;
pub mod gate;
