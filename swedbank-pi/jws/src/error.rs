use std::borrow::Cow;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The algorithm name is not one of the supported JWS algorithms.
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(Cow<'static, str>),
    /// The key material could not be used by the cryptographic backend.
    #[error("Invalid key: {0}")]
    InvalidKey(Cow<'static, str>),
    /// The token (or its header) does not have the expected shape.
    #[error("Malformed token: {0}")]
    MalformedToken(Cow<'static, str>),
    /// The token's "iat" is further from the current time than allowed.
    #[error("Stale signature: |now - iat| = {age_seconds}s exceeds the maximum of {max_age_seconds}s")]
    StaleSignature {
        age_seconds: u64,
        max_age_seconds: u64,
    },
    /// The signing primitive refused to produce a signature.
    #[error("Signing failed: {0}")]
    SigningFailed(Cow<'static, str>),
}

impl Error {
    /// Returns true if this error indicates a token that is out of the freshness window, which callers
    /// may want to report separately from other verification failures.
    pub fn is_stale_signature(&self) -> bool {
        matches!(self, Self::StaleSignature { .. })
    }
}

/// This will construct an Error of the given variant with a formatted message.
#[macro_export]
macro_rules! error {
    ($variant: ident, $msg: literal) => {
        $crate::Error::$variant(std::borrow::Cow::Borrowed($msg))
    };
    ($variant: ident, $format_str: literal, $($arg:tt)*) => {
        $crate::Error::$variant(std::borrow::Cow::Owned(format!($format_str, $($arg)*)))
    };
}

/// This will return with the formatted error if the condition is not met.
#[macro_export]
macro_rules! require {
    ($condition: expr, $variant: ident, $msg: literal) => {
        if !$condition {
            return Err($crate::error!($variant, $msg));
        }
    };
    ($condition: expr, $variant: ident, $format_str: literal, $($arg:tt)*) => {
        if !$condition {
            return Err($crate::error!($variant, $format_str, $($arg)*));
        }
    };
}
