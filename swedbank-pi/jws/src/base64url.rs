use base64::Engine;

/// Base64url-no-pad encoding, as used for every segment of a JWS.
pub fn base64url_encode(bytes: &[u8]) -> String {
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Decodes base64url-no-pad.  Padding characters, whitespace and the standard (non-URL-safe)
/// alphabet are all rejected.
pub fn base64url_decode(s: &str) -> Result<Vec<u8>, &'static str> {
    if !is_base64url_encoded(s) {
        return Err("not base64url-no-pad encoded");
    }
    base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(s.as_bytes())
        .map_err(|_| "invalid base64url-no-pad encoding")
}

/// This is base64url without padding.
pub(crate) fn is_base64url_encoded(s: &str) -> bool {
    // Base64urlnopad encoding is a subset of base64url encoding, so we can just check for the presence of
    // characters that are not in the base64url-nopad alphabet.
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
