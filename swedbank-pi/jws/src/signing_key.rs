use crate::{der_to_raw, error, key_pem::PrivateKeyDER, HashFunction, JWSAlgorithm, Result};
use pkcs8::DecodePrivateKey;
use rsa::pkcs1::DecodeRsaPrivateKey;
use signature::hazmat::PrehashSigner;

/// A private key parsed for exactly one JWS algorithm.  It lives only for the duration of a single
/// sign call; the backend key types zeroize their secrets on drop.
pub(crate) enum SigningKey {
    RS512(rsa::RsaPrivateKey),
    ES256(p256::ecdsa::SigningKey),
    ES256K(k256::ecdsa::SigningKey),
    ES384(p384::ecdsa::SigningKey),
    ES512(p521::ecdsa::SigningKey),
}

/// Parses an elliptic-curve secret key of the given curve crate out of PKCS#8 or SEC1 DER.
macro_rules! ec_secret_key_from_der {
    ($curve: ident, $algorithm: expr, $private_key_der: expr) => {
        match $private_key_der {
            PrivateKeyDER::PKCS8(document) => $curve::SecretKey::from_pkcs8_der(document.as_bytes())
                .map_err(|e| {
                    error!(
                        InvalidKey,
                        "not a PKCS#8 {} private key: {}",
                        $algorithm.key_family(),
                        e
                    )
                }),
            PrivateKeyDER::SEC1(document) => $curve::SecretKey::from_sec1_der(document.as_bytes())
                .map_err(|e| {
                    error!(
                        InvalidKey,
                        "not a SEC1 {} private key: {}",
                        $algorithm.key_family(),
                        e
                    )
                }),
            PrivateKeyDER::PKCS1(_) => Err(error!(
                InvalidKey,
                "an RSA private key can't be used with {}", $algorithm
            )),
        }
    };
}

impl SigningKey {
    pub(crate) fn from_pem(algorithm: JWSAlgorithm, private_key_pem: &str) -> Result<Self> {
        let private_key_der = PrivateKeyDER::from_pem(private_key_pem)?;
        let signing_key = match algorithm {
            JWSAlgorithm::RS512 => {
                let private_key = match private_key_der {
                    PrivateKeyDER::PKCS8(document) => {
                        rsa::RsaPrivateKey::from_pkcs8_der(document.as_bytes()).map_err(|e| {
                            error!(InvalidKey, "not a PKCS#8 RSA private key: {}", e)
                        })?
                    }
                    PrivateKeyDER::PKCS1(document) => {
                        rsa::RsaPrivateKey::from_pkcs1_der(document.as_bytes()).map_err(|e| {
                            error!(InvalidKey, "not a PKCS#1 RSA private key: {}", e)
                        })?
                    }
                    PrivateKeyDER::SEC1(_) => {
                        return Err(error!(
                            InvalidKey,
                            "an EC private key can't be used with {}", algorithm
                        ));
                    }
                };
                Self::RS512(private_key)
            }
            JWSAlgorithm::ES256 => {
                let secret_key = ec_secret_key_from_der!(p256, algorithm, private_key_der)?;
                Self::ES256(p256::ecdsa::SigningKey::from(&secret_key))
            }
            JWSAlgorithm::ES256K => {
                let secret_key = ec_secret_key_from_der!(k256, algorithm, private_key_der)?;
                Self::ES256K(k256::ecdsa::SigningKey::from(&secret_key))
            }
            JWSAlgorithm::ES384 => {
                let secret_key = ec_secret_key_from_der!(p384, algorithm, private_key_der)?;
                Self::ES384(p384::ecdsa::SigningKey::from(&secret_key))
            }
            JWSAlgorithm::ES512 => {
                let secret_key = ec_secret_key_from_der!(p521, algorithm, private_key_der)?;
                Self::ES512(
                    p521::ecdsa::SigningKey::from_bytes(&secret_key.to_bytes())
                        .map_err(|e| error!(InvalidKey, "unusable P-521 private key: {}", e))?,
                )
            }
        };
        Ok(signing_key)
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
    /// Signs the given signing input, returning the signature in its JWS form: the PKCS#1 v1.5
    /// signature for RSA, and the fixed-width `r || s` concatenation for ECDSA.
    pub(crate) fn sign(&self, signing_input: &[u8]) -> Result<Vec<u8>> {
        let algorithm = self.algorithm();
        let digest = algorithm.hash_function().digest(signing_input);
        // ECDSA backends hand out the DER encoding, which is then decomposed into r and s.
        let signature_der = match self {
            Self::RS512(private_key) => {
                return private_key
                    .sign(pkcs1v15_scheme(algorithm.hash_function()), &digest)
                    .map_err(|e| error!(SigningFailed, "RSA signing failed: {}", e));
            }
            Self::ES256(signing_key) => {
                let signature: p256::ecdsa::Signature = signing_key
                    .sign_prehash(&digest)
                    .map_err(|e| error!(SigningFailed, "ECDSA signing failed: {}", e))?;
                signature.to_der().as_bytes().to_vec()
            }
            Self::ES256K(signing_key) => {
                let signature: k256::ecdsa::Signature = signing_key
                    .sign_prehash(&digest)
                    .map_err(|e| error!(SigningFailed, "ECDSA signing failed: {}", e))?;
                signature.to_der().as_bytes().to_vec()
            }
            Self::ES384(signing_key) => {
                let signature: p384::ecdsa::Signature = signing_key
                    .sign_prehash(&digest)
                    .map_err(|e| error!(SigningFailed, "ECDSA signing failed: {}", e))?;
                signature.to_der().as_bytes().to_vec()
            }
            Self::ES512(signing_key) => {
                let signature: p521::ecdsa::Signature = signing_key
                    .sign_prehash(&digest)
                    .map_err(|e| error!(SigningFailed, "ECDSA signing failed: {}", e))?;
                signature.to_der().as_bytes().to_vec()
            }
        };
        // Every algorithm other than RS512 is ECDSA and so has a component length.
        let component_len = algorithm
            .component_len_o()
            .ok_or_else(|| error!(SigningFailed, "{} has no ECDSA component length", algorithm))?;
        der_to_raw(&signature_der, component_len).map_err(|e| {
            error!(
                SigningFailed,
                "could not convert DER signature to raw form: {}", e
            )
        })
    }
}

pub(crate) fn pkcs1v15_scheme(hash_function: HashFunction) -> rsa::Pkcs1v15Sign {
    match hash_function {
        HashFunction::SHA256 => rsa::Pkcs1v15Sign::new::<sha2::Sha256>(),
        HashFunction::SHA384 => rsa::Pkcs1v15Sign::new::<sha2::Sha384>(),
        HashFunction::SHA512 => rsa::Pkcs1v15Sign::new::<sha2::Sha512>(),
    }
}
