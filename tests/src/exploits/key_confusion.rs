//! # Key Substitution and Curve Confusion
//!
//! The attacker signs with their own key and tries to get that key, or a
//! key for a different curve, accepted as the trust anchor.

#[cfg(test)]
mod tests {
    use crate::fixtures::{default_gate, model_bytes, K256Signer, P256Signer};
    use mg_01_model_verification::{
        GateConfig, ModelPackage, ModelVerificationApi, RejectionReason, SignatureFormat,
        SignatureScheme, TrustedKey, VerificationGate, VerificationOutcome,
    };

    #[test]
    fn test_attacker_key_signature_rejected_under_device_key() {
        let gate = default_gate();
        let device = P256Signer::random();
        let attacker = P256Signer::random();
        let payload = model_bytes(128);

        let package = attacker.package(&payload, "m", "1");
        assert_eq!(
            gate.verify(&package, &device.trusted_key),
            VerificationOutcome::Rejected(RejectionReason::SignatureInvalid)
        );
    }

    #[test]
    fn test_secp256k1_key_refused_by_default_gate() {
        let gate = default_gate();
        let attacker = K256Signer::random();
        let payload = model_bytes(128);

        let package = ModelPackage::new(payload.clone(), attacker.sign_der(&payload)).unwrap();
        assert_eq!(
            gate.verify(&package, &attacker.trusted_key),
            VerificationOutcome::Rejected(RejectionReason::KeyParseError)
        );
    }

    #[test]
    fn test_p256_key_refused_by_secp256k1_gate() {
        let gate = VerificationGate::from_config(GateConfig::for_scheme(
            SignatureScheme::EcdsaSecp256k1Sha256,
            SignatureFormat::Der,
        ))
        .unwrap();
        let signer = P256Signer::random();
        let payload = model_bytes(128);

        let package = signer.package(&payload, "m", "1");
        assert_eq!(
            gate.verify(&package, &signer.trusted_key),
            VerificationOutcome::Rejected(RejectionReason::KeyParseError)
        );
    }

    #[test]
    fn test_relabelled_pem_markers_refused() {
        let gate = default_gate();
        let signer = P256Signer::random();
        let package = signer.package(&model_bytes(64), "m", "1");

        for (from, to) in [
            ("PUBLIC KEY", "EC PRIVATE KEY"),
            ("PUBLIC KEY", "CERTIFICATE"),
            ("PUBLIC KEY", "RSA PUBLIC KEY"),
        ] {
            let relabelled = TrustedKey::from(signer.pem.replace(from, to));
            assert_eq!(
                gate.verify(&package, &relabelled),
                VerificationOutcome::Rejected(RejectionReason::KeyParseError)
            );
        }
    }

    #[test]
    fn test_raw_der_key_refused() {
        use p256::pkcs8::EncodePublicKey;

        let gate = default_gate();
        let signer = P256Signer::random();
        let package = signer.package(&model_bytes(64), "m", "1");
        let der = signer
            .signing_key
            .verifying_key()
            .to_public_key_der()
            .unwrap();

        assert_eq!(
            gate.verify(&package, &TrustedKey::new(der.as_bytes().to_vec())),
            VerificationOutcome::Rejected(RejectionReason::KeyParseError)
        );
    }

    #[test]
    fn test_c_string_provisioned_key_accepted() {
        let gate = default_gate();
        let signer = P256Signer::random();
        let package = signer.package(&model_bytes(64), "m", "1");

        let mut provisioned = signer.pem.clone().into_bytes();
        provisioned.push(0);
        assert!(gate
            .verify(&package, &TrustedKey::new(provisioned))
            .is_admitted());
    }
}
