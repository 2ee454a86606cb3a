use crate::{error, Error};
use sha2::Digest;

/// The hash function applied to the JWS signing input before it is signed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum HashFunction {
    SHA256,
    SHA384,
    SHA512,
}

impl HashFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SHA256 => "SHA-256",
            Self::SHA384 => "SHA-384",
            Self::SHA512 => "SHA-512",
        }
    }
    /// Length in bytes of the digest this hash function produces.
    pub const fn output_len(&self) -> usize {
        match self {
            Self::SHA256 => 32,
            Self::SHA384 => 48,
            Self::SHA512 => 64,
        }
    }
    /// Computes the digest of the given message.
    pub fn digest(&self, message: &[u8]) -> Vec<u8> {
        match self {
            Self::SHA256 => sha2::Sha256::digest(message).to_vec(),
            Self::SHA384 => sha2::Sha384::digest(message).to_vec(),
            Self::SHA512 => sha2::Sha512::digest(message).to_vec(),
        }
    }
}

impl std::fmt::Display for HashFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The family of key that a JWS algorithm signs with.  For elliptic curves, this also determines
/// the curve, since each JWS "ES*" algorithm names exactly one curve.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum KeyFamily {
    RSA,
    P256,
    Secp256k1,
    P384,
    P521,
}

impl KeyFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RSA => "RSA",
            Self::P256 => "P-256",
            Self::Secp256k1 => "secp256k1",
            Self::P384 => "P-384",
            Self::P521 => "P-521",
        }
    }
    pub const fn is_elliptic_curve(&self) -> bool {
        !matches!(self, Self::RSA)
    }
}

impl std::fmt::Display for KeyFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The JWS "alg" values supported for signing and verifying requests and responses.
/// See <https://www.rfc-editor.org/rfc/rfc7518#section-3.1> and
/// <https://www.rfc-editor.org/rfc/rfc8812#section-3.2> (ES256K).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum JWSAlgorithm {
    /// RSASSA-PKCS1-v1_5 using SHA-512.
    #[default]
    #[cfg_attr(feature = "clap", value(name = "RS512"))]
    RS512,
    /// ECDSA using P-256 and SHA-256.
    #[cfg_attr(feature = "clap", value(name = "ES256"))]
    ES256,
    /// ECDSA using secp256k1 and SHA-256.
    #[cfg_attr(feature = "clap", value(name = "ES256K"))]
    ES256K,
    /// ECDSA using P-384 and SHA-384.
    #[cfg_attr(feature = "clap", value(name = "ES384"))]
    ES384,
    /// ECDSA using P-521 and SHA-512.
    #[cfg_attr(feature = "clap", value(name = "ES512"))]
    ES512,
}

impl JWSAlgorithm {
    /// All supported algorithms, in a fixed order.
    pub const ALL: [JWSAlgorithm; 5] = [
        JWSAlgorithm::RS512,
        JWSAlgorithm::ES256,
        JWSAlgorithm::ES256K,
        JWSAlgorithm::ES384,
        JWSAlgorithm::ES512,
    ];
    /// The JWS "alg" header value.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RS512 => "RS512",
            Self::ES256 => "ES256",
            Self::ES256K => "ES256K",
            Self::ES384 => "ES384",
            Self::ES512 => "ES512",
        }
    }
    pub const fn hash_function(&self) -> HashFunction {
        match self {
            Self::RS512 | Self::ES512 => HashFunction::SHA512,
            Self::ES256 | Self::ES256K => HashFunction::SHA256,
            Self::ES384 => HashFunction::SHA384,
        }
    }
    pub const fn key_family(&self) -> KeyFamily {
        match self {
            Self::RS512 => KeyFamily::RSA,
            Self::ES256 => KeyFamily::P256,
            Self::ES256K => KeyFamily::Secp256k1,
            Self::ES384 => KeyFamily::P384,
            Self::ES512 => KeyFamily::P521,
        }
    }
    /// For ECDSA algorithms, the byte length of each of the r and s components of the raw
    /// (JWS) signature encoding.  None for RSA.
    pub const fn component_len_o(&self) -> Option<usize> {
        match self {
            Self::RS512 => None,
            Self::ES256 | Self::ES256K => Some(32),
            Self::ES384 => Some(48),
            Self::ES512 => Some(66),
        }
    }
}

impl std::fmt::Display for JWSAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JWSAlgorithm {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str() == s)
            .ok_or_else(|| error!(UnsupportedAlgorithm, "{:?}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_table() {
        for algorithm in JWSAlgorithm::ALL {
            assert_eq!(
                algorithm.as_str().parse::<JWSAlgorithm>().expect("pass"),
                algorithm
            );
            assert_eq!(
                algorithm.key_family().is_elliptic_curve(),
                algorithm.component_len_o().is_some()
            );
            assert_eq!(
                algorithm.hash_function().digest(b"").len(),
                algorithm.hash_function().output_len()
            );
        }
        assert_eq!(JWSAlgorithm::default(), JWSAlgorithm::RS512);
        assert_eq!(JWSAlgorithm::ES512.component_len_o(), Some(66));
        assert_eq!(JWSAlgorithm::ES384.hash_function(), HashFunction::SHA384);
    }

    #[test]
    fn test_unsupported_algorithm_names() {
        for name in ["HS256", "RS256", "es256", "none", "", "ES256 "] {
            match name.parse::<JWSAlgorithm>() {
                Err(Error::UnsupportedAlgorithm(_)) => {}
                other => panic!("expected UnsupportedAlgorithm for {:?}, got {:?}", name, other),
            }
        }
    }

    #[test]
    fn test_algorithm_serde() {
        assert_eq!(
            serde_json::to_string(&JWSAlgorithm::ES256K).expect("pass"),
            r#""ES256K""#
        );
        assert_eq!(
            serde_json::from_str::<JWSAlgorithm>(r#""ES384""#).expect("pass"),
            JWSAlgorithm::ES384
        );
        serde_json::from_str::<JWSAlgorithm>(r#""PS512""#).expect_err("pass");
    }
}
