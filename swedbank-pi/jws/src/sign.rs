use crate::{signing_key::SigningKey, DetachedJWS, JWSAlgorithm, JWSHeader, Result};

/// Produces the detached JWS for an outgoing request, to be sent in the `x-jws-signature` header.
/// The header's "iat" is the current time.  See [`sign_at`].
///
/// Callers holding the algorithm as a name should obtain it with `name.parse::<JWSAlgorithm>()`,
/// which returns `Error::UnsupportedAlgorithm` for names outside the supported set.
pub fn sign(
    payload: &[u8],
    url: &str,
    merchant_id: &str,
    country: &str,
    private_key_pem: &str,
    algorithm: JWSAlgorithm,
) -> Result<DetachedJWS<'static>> {
    sign_at(
        payload,
        url,
        merchant_id,
        country,
        private_key_pem,
        algorithm,
        time::OffsetDateTime::now_utc(),
    )
}

/// Produces the detached JWS `<base64url(header)>..<base64url(signature)>` over the signing input
/// `base64url(header) || '.' || payload`, where the header records the given time as "iat", the
/// URL verbatim, and "<country>:<merchant_id>" as "kid".
pub fn sign_at(
    payload: &[u8],
    url: &str,
    merchant_id: &str,
    country: &str,
    private_key_pem: &str,
    algorithm: JWSAlgorithm,
    iat: time::OffsetDateTime,
) -> Result<DetachedJWS<'static>> {
    tracing::trace!(
        %algorithm,
        url,
        merchant_id,
        country,
        iat = iat.unix_timestamp(),
        payload_len = payload.len(),
        "signing detached JWS"
    );
    let header = JWSHeader::new(algorithm, iat.unix_timestamp(), url, merchant_id, country);
    let signing_key = SigningKey::from_pem(algorithm, private_key_pem)?;
    DetachedJWS::signed(header, payload, &signing_key)
}
