use crate::{verifying_key::VerifyingKey, DetachedJWS, Result};

/// Verifies a detached JWS received in the `x-jws-signature` header against the exact bytes of the
/// body it accompanied.  See [`verify_at`].
pub fn verify(
    jws: &str,
    payload: &[u8],
    public_key_pem: &str,
    max_age_seconds: u64,
) -> Result<bool> {
    verify_at(
        jws,
        payload,
        public_key_pem,
        max_age_seconds,
        time::OffsetDateTime::now_utc(),
    )
}

/// Verifies a detached JWS against the given payload and public key (or certificate), using the
/// algorithm the JWS header declares.
///
/// Returns Ok(true) if the signature matches and Ok(false) if it's well-formed but doesn't match.
/// Errors are reserved for input that can't be checked at all: MalformedToken for a JWS that isn't
/// `<header>..<signature>` with a JSON header containing "alg" and "iat", StaleSignature if
/// max_age_seconds is nonzero and "iat" is more than that many seconds away from `now` (checked
/// before any public key operation), and InvalidKey for a key that can't be used with the declared
/// algorithm.
pub fn verify_at(
    jws: &str,
    payload: &[u8],
    public_key_pem: &str,
    max_age_seconds: u64,
    now: time::OffsetDateTime,
) -> Result<bool> {
    let detached_jws = DetachedJWS::try_from(jws)?;
    tracing::trace!(
        alg = %detached_jws.header().alg,
        iat = detached_jws.header().iat,
        kid = ?detached_jws.header().kid_o,
        url = ?detached_jws.header().url_o,
        payload_len = payload.len(),
        "verifying detached JWS"
    );
    detached_jws.check_freshness(now, max_age_seconds)?;
    let verifying_key = VerifyingKey::from_pem(detached_jws.header().alg, public_key_pem)?;
    let verified = detached_jws.verify_signature(payload, &verifying_key)?;
    if !verified {
        tracing::debug!(
            alg = %detached_jws.header().alg,
            kid = ?detached_jws.header().kid_o,
            "detached JWS signature does not match"
        );
    }
    Ok(verified)
}
