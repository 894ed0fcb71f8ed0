//! # Exploit Simulations
//!
//! Attacks against the model verification gate. Every test here asserts
//! that the attack ends in a rejection and that nothing is admitted.
//!
//! | Module | Attack surface |
//! |--------|----------------|
//! | `tampering` | Payload and signature bytes |
//! | `key_confusion` | Trusted key substitution and curve confusion |
//! | `resource_exhaustion` | Oversized inputs |

pub mod key_confusion;
