use std::borrow::Cow;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid: {0}")]
    Invalid(Cow<'static, str>),
    #[error("Malformed: {0}")]
    Malformed(Cow<'static, str>),
    #[error("Missing x-jws-signature header: {0}")]
    MissingSignature(Cow<'static, str>),
    #[error("Serialization error: {0}")]
    Serialization(Cow<'static, str>),
    #[error("Signature mismatch: {0}")]
    SignatureMismatch(Cow<'static, str>),
    #[error(transparent)]
    JWSError(#[from] swedbank_pi_jws::Error),
}

impl Error {
    /// Returns true if the error came from a response signature whose "iat" was out of the freshness
    /// window.
    pub fn is_stale_signature(&self) -> bool {
        matches!(self, Self::JWSError(e) if e.is_stale_signature())
    }
}
