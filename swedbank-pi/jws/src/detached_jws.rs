use crate::{
    base64url_decode, base64url_encode, error, signing_key::SigningKey,
    verifying_key::VerifyingKey, Error, JWSHeader, Result,
};
use std::borrow::Cow;

/// The separator between the header and signature segments of a detached JWS.  The payload
/// segment between them is always empty, since the payload travels separately (as the HTTP body).
const DETACHED_SEPARATOR: &str = "..";

/// This is the compact, encoded form of a JWS whose payload is detached and unencoded.  Has the form
/// <base64url(JSON(header))>..<base64url(signature)>
/// See RFC 7515 Appendix F https://datatracker.ietf.org/doc/html/rfc7515#appendix-F and
/// RFC 7797 https://datatracker.ietf.org/doc/html/rfc7797.
/// Here, base64url(x) is the base64url-no-pad encoding of x.
#[derive(Clone, Debug)]
pub struct DetachedJWS<'j> {
    /// String representation of the JWS.
    string: Cow<'j, str>,
    /// Parsed header.
    header: JWSHeader,
    /// Decoded signature.
    signature_byte_v: Vec<u8>,
}

impl<'j> DetachedJWS<'j> {
    pub fn into_string(self) -> String {
        self.string.into_owned()
    }
    /// Return a reference to the str representation of the JWS.
    pub fn as_str(&self) -> &str {
        self.string.as_ref()
    }
    /// Returns the parsed header.
    pub fn header(&self) -> &JWSHeader {
        &self.header
    }
    /// This is the base64url-encoded header, which is the substring of the JWS up to the "..".
    pub fn raw_header_base64(&self) -> &str {
        self.split_segments().0
    }
    /// This is the base64url-encoded signature, which is the substring of the JWS after the "..".
    pub fn raw_signature_base64(&self) -> &str {
        self.split_segments().1
    }
    /// This is the decoded signature.  For ECDSA algorithms, it's the raw `r || s` concatenation.
    pub fn signature_bytes(&self) -> &[u8] {
        self.signature_byte_v.as_slice()
    }
    fn split_segments(&self) -> (&str, &str) {
        // By construction, the string contains the separator exactly once.
        self.string
            .split_once(DETACHED_SEPARATOR)
            .unwrap_or((self.string.as_ref(), ""))
    }
    /// Checks that the "iat" of this JWS is within max_age_seconds of now, in either direction.
    /// A max_age_seconds of 0 disables the check.
    pub fn check_freshness(&self, now: time::OffsetDateTime, max_age_seconds: u64) -> Result<()> {
        if max_age_seconds == 0 {
            return Ok(());
        }
        let age_seconds = now
            .unix_timestamp()
            .saturating_sub(self.header.iat)
            .unsigned_abs();
        if age_seconds > max_age_seconds {
            return Err(Error::StaleSignature {
                age_seconds,
                max_age_seconds,
            });
        }
        Ok(())
    }
    /// Produce the signed, detached JWS for the given header and payload.  The header must specify
    /// the algorithm of the signing key.
    pub(crate) fn signed(
        header: JWSHeader,
        payload: &[u8],
        signing_key: &SigningKey,
    ) -> Result<DetachedJWS<'static>> {
        if header.alg != signing_key.algorithm() {
            return Err(error!(
                SigningFailed,
                "JWS header alg {} does not match that of the signing key {}",
                header.alg,
                signing_key.algorithm()
            ));
        }
        let header_base64 = header.to_base64url()?;
        let signing_input = signing_input(&header_base64, payload);
        let signature_byte_v = signing_key.sign(&signing_input)?;

        let mut jws_string = header_base64;
        jws_string.push_str(DETACHED_SEPARATOR);
        jws_string.push_str(&base64url_encode(&signature_byte_v));

        Ok(DetachedJWS {
            string: Cow::Owned(jws_string),
            header,
            signature_byte_v,
        })
    }
    /// Verifies the signature over the given detached payload.  Returns Ok(false) if the signature
    /// does not match.  The verifying key must be for the algorithm declared in the header.
    pub(crate) fn verify_signature(
        &self,
        payload: &[u8],
        verifying_key: &VerifyingKey,
    ) -> Result<bool> {
        if self.header.alg != verifying_key.algorithm() {
            return Err(error!(
                InvalidKey,
                "JWS alg {} does not match that of the verifying key {}",
                self.header.alg,
                verifying_key.algorithm()
            ));
        }
        let signing_input = signing_input(self.raw_header_base64(), payload);
        verifying_key.verify(&signing_input, &self.signature_byte_v)
    }
}

/// The signing input of an unencoded-payload JWS: `base64url(json(header)) || '.' || payload`.
pub(crate) fn signing_input(header_base64: &str, payload: &[u8]) -> Vec<u8> {
    let mut signing_input = Vec::with_capacity(header_base64.len() + 1 + payload.len());
    signing_input.extend_from_slice(header_base64.as_bytes());
    signing_input.push(b'.');
    signing_input.extend_from_slice(payload);
    signing_input
}

impl<'j> std::ops::Deref for DetachedJWS<'j> {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        self.string.as_ref()
    }
}

impl<'j> std::fmt::Display for DetachedJWS<'j> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.string.as_ref())
    }
}

impl<'j> TryFrom<String> for DetachedJWS<'j> {
    type Error = Error;
    fn try_from(jws_string: String) -> std::result::Result<Self, Self::Error> {
        Self::try_from(Cow::Owned(jws_string))
    }
}

impl<'j> TryFrom<&'j str> for DetachedJWS<'j> {
    type Error = Error;
    fn try_from(jws_str: &'j str) -> std::result::Result<Self, Self::Error> {
        Self::try_from(Cow::Borrowed(jws_str))
    }
}

impl<'j> TryFrom<Cow<'j, str>> for DetachedJWS<'j> {
    type Error = Error;
    fn try_from(jws_str: Cow<'j, str>) -> std::result::Result<Self, Self::Error> {
        let mut split = jws_str.split(DETACHED_SEPARATOR);
        let header_base64 = split
            .next()
            .filter(|s| !s.is_empty())
            .ok_or(error!(MalformedToken, "JWS missing header"))?;
        let signature_base64 = split.next().ok_or(error!(
            MalformedToken,
            "JWS is missing the \"..\" separator of a detached payload"
        ))?;
        if signature_base64.is_empty() {
            return Err(error!(MalformedToken, "JWS missing signature"));
        }
        if split.next().is_some() {
            return Err(error!(MalformedToken, "JWS has too many parts"));
        }

        let header_byte_v = base64url_decode(header_base64)
            .map_err(|e| error!(MalformedToken, "JWS header: {}", e))?;
        let header = serde_json::from_slice::<JWSHeader>(&header_byte_v).map_err(|e| {
            error!(
                MalformedToken,
                "JWS header failed to parse as expected JSON structure: {}", e
            )
        })?;
        header.validate_unencoded_payload()?;

        let signature_byte_v = base64url_decode(signature_base64)
            .map_err(|e| error!(MalformedToken, "JWS signature: {}", e))?;

        Ok(DetachedJWS {
            string: jws_str,
            header,
            signature_byte_v,
        })
    }
}
