use crate::{base64url_encode, error, require, JWSAlgorithm, Result};

/// The JOSE header of a detached, unencoded-payload JWS (see RFC 7515 and RFC 7797).  The fields are
/// declared in the order in which they are serialized.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct JWSHeader {
    /// If present, then specifies if the payload is base64url-encoded or not.  Signed headers always
    /// carry `false`, meaning the raw payload bytes are part of the signing input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b64: Option<bool>,
    /// Specifies critical headers that must be understood and processed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crit: Option<Vec<String>>,
    /// Unix time (in seconds) at which the signature was produced.
    pub iat: i64,
    /// Signature algorithm used to sign the JWS.
    pub alg: JWSAlgorithm,
    /// The exact URL of the request this signature belongs to.
    #[serde(rename = "url", default, skip_serializing_if = "Option::is_none")]
    pub url_o: Option<String>,
    /// Identifies the signer, as "<country>:<merchantId>".
    #[serde(rename = "kid", default, skip_serializing_if = "Option::is_none")]
    pub kid_o: Option<String>,
}

impl JWSHeader {
    /// Constructs the header for signing a request or response body on behalf of the given merchant.
    pub fn new(
        alg: JWSAlgorithm,
        iat: i64,
        url: impl Into<String>,
        merchant_id: &str,
        country: &str,
    ) -> Self {
        Self {
            b64: Some(false),
            crit: Some(vec![String::from("b64")]),
            iat,
            alg,
            url_o: Some(url.into()),
            kid_o: Some(format!("{}:{}", country, merchant_id)),
        }
    }
    /// Returns the base64url-encoded compact JSON serialization of this header.
    pub fn to_base64url(&self) -> Result<String> {
        let header_json = serde_json::to_vec(self)
            .map_err(|e| error!(SigningFailed, "error while serializing JWS header: {}", e))?;
        Ok(base64url_encode(&header_json))
    }
    /// Checks that the header describes an unencoded payload, which is the only kind of payload
    /// that the signing input of a detached JWS is constructed for.
    pub(crate) fn validate_unencoded_payload(&self) -> Result<()> {
        require!(
            self.b64 != Some(true),
            MalformedToken,
            "JWS header declares a base64url-encoded payload"
        );
        if let Some(crit) = self.crit.as_ref() {
            for crit_header in crit {
                require!(
                    crit_header == "b64",
                    MalformedToken,
                    "JWS header declares unrecognized critical header {:?}",
                    crit_header
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_serialization() {
        let header = JWSHeader::new(
            JWSAlgorithm::RS512,
            1700000000,
            "https://pi.swedbank.com/public/api/v3/transactions/providers/HABALT22",
            "M1",
            "LV",
        );
        assert_eq!(
            serde_json::to_string(&header).expect("pass"),
            r#"{"b64":false,"crit":["b64"],"iat":1700000000,"alg":"RS512","url":"https://pi.swedbank.com/public/api/v3/transactions/providers/HABALT22","kid":"LV:M1"}"#
        );
        header.validate_unencoded_payload().expect("pass");
    }

    #[test]
    fn test_header_deserialization() {
        // Only "alg" and "iat" are required.
        let header: JWSHeader = serde_json::from_str(r#"{"iat":5,"alg":"ES384"}"#).expect("pass");
        assert_eq!(header.alg, JWSAlgorithm::ES384);
        assert_eq!(header.iat, 5);
        assert!(header.kid_o.is_none());
        header.validate_unencoded_payload().expect("pass");

        serde_json::from_str::<JWSHeader>(r#"{"iat":5}"#).expect_err("pass");
        serde_json::from_str::<JWSHeader>(r#"{"alg":"ES384"}"#).expect_err("pass");
        serde_json::from_str::<JWSHeader>(r#"{"iat":"5","alg":"ES384"}"#).expect_err("pass");
        serde_json::from_str::<JWSHeader>(r#"{"iat":5,"alg":"HS256"}"#).expect_err("pass");

        let header: JWSHeader =
            serde_json::from_str(r#"{"b64":true,"iat":5,"alg":"ES256"}"#).expect("pass");
        header.validate_unencoded_payload().expect_err("pass");
        let header: JWSHeader =
            serde_json::from_str(r#"{"crit":["b64","exp"],"iat":5,"alg":"ES256"}"#).expect("pass");
        header.validate_unencoded_payload().expect_err("pass");
    }
}
