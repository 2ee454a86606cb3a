use crate::{Error, Result};
use swedbank_pi_jws::JWS_SIGNATURE_HEADER;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HTTPMethod {
    GET,
    POST,
}

impl HTTPMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HTTPMethod::GET => "GET",
            HTTPMethod::POST => "POST",
        }
    }
}

impl std::fmt::Display for HTTPMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HTTPMethod {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "GET" => Ok(HTTPMethod::GET),
            "POST" => Ok(HTTPMethod::POST),
            _ => Err(Error::Invalid(
                format!("unsupported HTTP method {:?}", s).into(),
            )),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HTTPHeader {
    pub name: String,
    pub value: String,
}

impl HTTPHeader {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An HTTP request that is ready to send: the body is exactly the bytes that were signed, and the
/// URL is exactly the one in the JWS header.
#[derive(Clone, Debug)]
pub struct SignedRequest {
    pub method: HTTPMethod,
    pub url: url::Url,
    pub body: Vec<u8>,
    pub header_v: Vec<HTTPHeader>,
}

impl SignedRequest {
    /// Returns the value of the first header with the given (case-insensitive) name.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.header_v
            .iter()
            .find(|header| header.name.eq_ignore_ascii_case(name))
            .map(|header| header.value.as_str())
    }
    /// The detached JWS of this request.
    pub fn jws(&self) -> Option<&str> {
        self.header_value(JWS_SIGNATURE_HEADER)
    }
}
