use crate::{
    error, key_pem::PublicKeyDER, raw_to_der, signing_key::pkcs1v15_scheme, JWSAlgorithm, Result,
};
use pkcs8::DecodePublicKey;
use rsa::pkcs1::DecodeRsaPublicKey;
use signature::hazmat::PrehashVerifier;

/// A public key parsed for exactly one JWS algorithm.
pub(crate) enum VerifyingKey {
    RS512(rsa::RsaPublicKey),
    ES256(p256::ecdsa::VerifyingKey),
    ES256K(k256::ecdsa::VerifyingKey),
    ES384(p384::ecdsa::VerifyingKey),
    ES512(p521::ecdsa::VerifyingKey),
}

/// Parses an elliptic-curve public key of the given curve crate out of SubjectPublicKeyInfo DER.
macro_rules! ec_public_key_from_der {
    ($curve: ident, $algorithm: expr, $public_key_der: expr) => {
        match $public_key_der {
            PublicKeyDER::SubjectPublicKeyInfo(spki_der) => {
                $curve::PublicKey::from_public_key_der(&spki_der).map_err(|e| {
                    error!(
                        InvalidKey,
                        "not a {} public key: {}",
                        $algorithm.key_family(),
                        e
                    )
                })
            }
            PublicKeyDER::PKCS1(_) => Err(error!(
                InvalidKey,
                "an RSA public key can't be used with {}", $algorithm
            )),
        }
    };
}

/// Converts the raw JWS `r || s` signature into the given curve's signature type.
macro_rules! ecdsa_signature_from_raw {
    ($curve: ident, $algorithm: expr, $signature_bytes: expr) => {{
        let component_len = $algorithm.component_len_o().ok_or_else(|| {
            error!(
                MalformedToken,
                "{} has no ECDSA component length", $algorithm
            )
        })?;
        let signature_der = raw_to_der($signature_bytes, component_len)
            .map_err(|e| error!(MalformedToken, "malformed ECDSA signature: {}", e))?;
        $curve::ecdsa::Signature::from_der(&signature_der)
            .map_err(|e| error!(MalformedToken, "malformed ECDSA signature: {}", e))?
    }};
}

impl VerifyingKey {
    /// Parses a public key (or the public key of an X.509 certificate) for the given algorithm.
    /// A key of the wrong family or curve is an InvalidKey error.
    pub(crate) fn from_pem(algorithm: JWSAlgorithm, public_key_pem: &str) -> Result<Self> {
        let public_key_der = PublicKeyDER::from_pem(public_key_pem)?;
        let verifying_key = match algorithm {
            JWSAlgorithm::RS512 => {
                let public_key = match public_key_der {
                    PublicKeyDER::SubjectPublicKeyInfo(spki_der) => {
                        rsa::RsaPublicKey::from_public_key_der(&spki_der)
                            .map_err(|e| error!(InvalidKey, "not an RSA public key: {}", e))?
                    }
                    PublicKeyDER::PKCS1(pkcs1_der) => {
                        rsa::RsaPublicKey::from_pkcs1_der(&pkcs1_der).map_err(|e| {
                            error!(InvalidKey, "not a PKCS#1 RSA public key: {}", e)
                        })?
                    }
                };
                Self::RS512(public_key)
            }
            JWSAlgorithm::ES256 => {
                let public_key = ec_public_key_from_der!(p256, algorithm, public_key_der)?;
                Self::ES256(p256::ecdsa::VerifyingKey::from(&public_key))
            }
            JWSAlgorithm::ES256K => {
                let public_key = ec_public_key_from_der!(k256, algorithm, public_key_der)?;
                Self::ES256K(k256::ecdsa::VerifyingKey::from(&public_key))
            }
            JWSAlgorithm::ES384 => {
                let public_key = ec_public_key_from_der!(p384, algorithm, public_key_der)?;
                Self::ES384(p384::ecdsa::VerifyingKey::from(&public_key))
            }
            JWSAlgorithm::ES512 => {
                let public_key = ec_public_key_from_der!(p521, algorithm, public_key_der)?;
                Self::ES512(
                    p521::ecdsa::VerifyingKey::from_sec1_bytes(&public_key.to_sec1_bytes())
                        .map_err(|e| error!(InvalidKey, "unusable P-521 public key: {}", e))?,
                )
            }
        };
        Ok(verifying_key)
    }
    pub(crate) fn algorithm(&self) -> JWSAlgorithm {
        match self {
            Self::RS512(_) => JWSAlgorithm::RS512,
            Self::ES256(_) => JWSAlgorithm::ES256,
            Self::ES256K(_) => JWSAlgorithm::ES256K,
            Self::ES384(_) => JWSAlgorithm::ES384,
            Self::ES512(_) => JWSAlgorithm::ES512,
        }
    }
    /// Verifies a JWS-form signature (see SigningKey::sign) over the given signing input.  Returns
    /// Ok(false) if the signature is well-formed but does not match, and MalformedToken if the
    /// signature bytes can't be a signature of this algorithm at all.
    pub(crate) fn verify(&self, signing_input: &[u8], signature_bytes: &[u8]) -> Result<bool> {
        let algorithm = self.algorithm();
        let digest = algorithm.hash_function().digest(signing_input);
        let verified = match self {
            Self::RS512(public_key) => public_key
                .verify(
                    pkcs1v15_scheme(algorithm.hash_function()),
                    &digest,
                    signature_bytes,
                )
                .is_ok(),
            Self::ES256(verifying_key) => {
                let signature = ecdsa_signature_from_raw!(p256, algorithm, signature_bytes);
                verifying_key.verify_prehash(&digest, &signature).is_ok()
            }
            Self::ES256K(verifying_key) => {
                let signature = ecdsa_signature_from_raw!(k256, algorithm, signature_bytes);
                // secp256k1 verification only accepts low-S signatures, but DER-native signers
                // don't necessarily produce them.
                let signature = signature.normalize_s().unwrap_or(signature);
                verifying_key.verify_prehash(&digest, &signature).is_ok()
            }
            Self::ES384(verifying_key) => {
                let signature = ecdsa_signature_from_raw!(p384, algorithm, signature_bytes);
                verifying_key.verify_prehash(&digest, &signature).is_ok()
            }
            Self::ES512(verifying_key) => {
                let signature = ecdsa_signature_from_raw!(p521, algorithm, signature_bytes);
                verifying_key.verify_prehash(&digest, &signature).is_ok()
            }
        };
        Ok(verified)
    }
}
