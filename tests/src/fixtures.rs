//! Shared fixtures: key pairs, signatures and signed packages.

use mg_01_model_verification::{GateConfig, ModelPackage, TrustedKey, VerificationGate};
use p256::ecdsa::signature::Signer;
use p256::pkcs8::{EncodePublicKey, LineEnding};

/// P-256 signer plus its PEM trusted key.
pub struct P256Signer {
    pub signing_key: p256::ecdsa::SigningKey,
    pub trusted_key: TrustedKey,
    pub pem: String,
}

impl P256Signer {
    pub fn random() -> Self {
        let signing_key = p256::ecdsa::SigningKey::random(&mut rand::thread_rng());
        let pem = signing_key
            .verifying_key()
            .to_public_key_pem(LineEnding::LF)
            .expect("pem encoding");
        Self {
            signing_key,
            trusted_key: TrustedKey::from(pem.clone()),
            pem,
        }
    }

    /// DER signature over `payload`.
    pub fn sign_der(&self, payload: &[u8]) -> Vec<u8> {
        let signature: p256::ecdsa::Signature = self.signing_key.sign(payload);
        signature.to_der().as_bytes().to_vec()
    }

    /// Fixed-width `r || s` signature over `payload`.
    pub fn sign_fixed(&self, payload: &[u8]) -> Vec<u8> {
        let signature: p256::ecdsa::Signature = self.signing_key.sign(payload);
        signature.to_bytes().to_vec()
    }

    /// Signed package with an audit identity.
    pub fn package(&self, payload: &[u8], identifier: &str, version: &str) -> ModelPackage {
        ModelPackage::new(payload.to_vec(), self.sign_der(payload))
            .expect("non-empty payload")
            .with_identity(identifier, version)
    }
}

/// secp256k1 signer plus its PEM trusted key.
pub struct K256Signer {
    pub signing_key: k256::ecdsa::SigningKey,
    pub trusted_key: TrustedKey,
}

impl K256Signer {
    pub fn random() -> Self {
        let signing_key = k256::ecdsa::SigningKey::random(&mut rand::thread_rng());
        let pem = signing_key
            .verifying_key()
            .to_public_key_pem(LineEnding::LF)
            .expect("pem encoding");
        Self {
            signing_key,
            trusted_key: TrustedKey::from(pem),
        }
    }

    /// DER signature over `payload`.
    pub fn sign_der(&self, payload: &[u8]) -> Vec<u8> {
        let signature: k256::ecdsa::Signature = self.signing_key.sign(payload);
        signature.to_der().as_bytes().to_vec()
    }
}

/// Gate with default configuration.
pub fn default_gate() -> VerificationGate {
    VerificationGate::from_config(GateConfig::default()).expect("default config is valid")
}

/// Deterministic pseudo-model of `len` bytes.
pub fn model_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}
