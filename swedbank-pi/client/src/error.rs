use crate::HTTPError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    GatewayError(#[from] swedbank_pi_core::Error),
    #[error("HTTP request failed: {0}")]
    HTTPRequestFailure(HTTPError),
}

impl Error {
    /// The HTTP status of the failed request, if the failure was at the HTTP level.
    pub fn status_code_o(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::HTTPRequestFailure(http_error) => Some(http_error.status_code),
            Self::GatewayError(_) => None,
        }
    }
}

impl From<HTTPError> for Error {
    fn from(http_error: HTTPError) -> Self {
        Self::HTTPRequestFailure(http_error)
    }
}
