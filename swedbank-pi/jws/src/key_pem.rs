use crate::{error, Result};
use pkcs8::der::{Document, SecretDocument};
use x509_cert::der::{Decode, Encode};

/// DER-encoded private key material, tagged with the structure that the PEM label declared.
pub(crate) enum PrivateKeyDER {
    /// "PRIVATE KEY": PKCS#8 PrivateKeyInfo, for any key family.
    PKCS8(SecretDocument),
    /// "RSA PRIVATE KEY": PKCS#1 RSAPrivateKey.
    PKCS1(SecretDocument),
    /// "EC PRIVATE KEY": SEC1 ECPrivateKey.
    SEC1(SecretDocument),
}

impl PrivateKeyDER {
    pub(crate) fn from_pem(private_key_pem: &str) -> Result<Self> {
        let (label, document) = SecretDocument::from_pem(private_key_pem.trim())
            .map_err(|e| error!(InvalidKey, "private key is not valid PEM: {}", e))?;
        match label {
            "PRIVATE KEY" => Ok(Self::PKCS8(document)),
            "RSA PRIVATE KEY" => Ok(Self::PKCS1(document)),
            "EC PRIVATE KEY" => Ok(Self::SEC1(document)),
            _ => Err(error!(
                InvalidKey,
                "unsupported private key PEM label {:?}", label
            )),
        }
    }
}

/// DER-encoded public key material.  Certificates are reduced to their SubjectPublicKeyInfo.
pub(crate) enum PublicKeyDER {
    /// "PUBLIC KEY", or the key embedded in a "CERTIFICATE": X.509 SubjectPublicKeyInfo.
    SubjectPublicKeyInfo(Vec<u8>),
    /// "RSA PUBLIC KEY": PKCS#1 RSAPublicKey.
    PKCS1(Vec<u8>),
}

impl PublicKeyDER {
    pub(crate) fn from_pem(public_key_pem: &str) -> Result<Self> {
        let (label, document) = Document::from_pem(public_key_pem.trim())
            .map_err(|e| error!(InvalidKey, "public key is not valid PEM: {}", e))?;
        match label {
            "PUBLIC KEY" => Ok(Self::SubjectPublicKeyInfo(document.as_bytes().to_vec())),
            "RSA PUBLIC KEY" => Ok(Self::PKCS1(document.as_bytes().to_vec())),
            "CERTIFICATE" => {
                let certificate = x509_cert::Certificate::from_der(document.as_bytes())
                    .map_err(|e| error!(InvalidKey, "malformed X.509 certificate: {}", e))?;
                let spki_der = certificate
                    .tbs_certificate
                    .subject_public_key_info
                    .to_der()
                    .map_err(|e| {
                        error!(
                            InvalidKey,
                            "could not re-encode certificate public key: {}", e
                        )
                    })?;
                Ok(Self::SubjectPublicKeyInfo(spki_der))
            }
            _ => Err(error!(
                InvalidKey,
                "unsupported public key PEM label {:?}", label
            )),
        }
    }
}
