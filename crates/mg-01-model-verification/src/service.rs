//! # Model Load Service
//!
//! The single load decision point: a package reaches the activation pipeline
//! only after the gate has admitted it.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Drives the inbound port (`ModelVerificationApi`) exactly once per load
//! - Uses the outbound port (`ModelActivator`) for admitted models only
//! - Refuses every rejection the same way, whatever the reason

use crate::domain::entities::{ModelPackage, TrustedKey};
use crate::domain::errors::LoadError;
use crate::ports::inbound::ModelVerificationApi;
use crate::ports::outbound::ModelActivator;
use tracing::{debug, info, warn};

/// Model load service.
///
/// Owns the gate and the activator; the only way to reach `activate` is
/// through `load`.
pub struct ModelLoadService<V: ModelVerificationApi, A: ModelActivator> {
    gate: V,
    activator: A,
}

impl<V: ModelVerificationApi, A: ModelActivator> ModelLoadService<V, A> {
    /// Create a new load service.
    ///
    /// # Arguments
    /// * `gate` - verification gate consulted before every load
    /// * `activator` - pipeline that receives admitted models
    pub fn new(gate: V, activator: A) -> Self {
        Self { gate, activator }
    }

    /// Verification gate used by this service.
    pub fn gate(&self) -> &V {
        &self.gate
    }

    /// Verify `package` against `trusted_key` and activate it if admitted.
    ///
    /// # Errors
    /// * `LoadError::Rejected` - the gate refused the package; nothing was
    ///   handed to the activator
    /// * `LoadError::Activation` - the package was admitted but the
    ///   activator failed or declined it
    pub fn load(
        &self,
        package: ModelPackage,
        trusted_key: &TrustedKey,
    ) -> Result<A::Activated, LoadError> {
        let identifier = package.identifier().to_string();
        let version = package.version().to_string();

        let admitted = match self.gate.admit(package, trusted_key) {
            Ok(admitted) => admitted,
            Err(reason) => {
                debug!(
                    model_id = %identifier,
                    version = %version,
                    reason = reason.as_str(),
                    "Model load refused"
                );
                return Err(LoadError::Rejected(reason));
            }
        };

        let activated = self.activator.activate(admitted).map_err(|e| {
            warn!(model_id = %identifier, version = %version, error = %e, "Model activation failed");
            LoadError::from(e)
        })?;

        info!(model_id = %identifier, version = %version, "Model activated");
        Ok(activated)
    }
}
