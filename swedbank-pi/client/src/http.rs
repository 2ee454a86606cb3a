use reqwest::StatusCode;
use std::borrow::Cow;
use swedbank_pi_core::{HTTPMethod, SignedRequest, JWS_SIGNATURE_HEADER};

lazy_static::lazy_static! {
    /// Building a reqwest::Client is *incredibly* slow, so we use a global instance and then clone
    /// it per use, as the documentation indicates.
    pub static ref REQWEST_CLIENT: reqwest::Client = reqwest::Client::new();
}

#[derive(Debug)]
pub struct HTTPError {
    pub status_code: reqwest::StatusCode,
    pub description: Cow<'static, str>,
}

impl std::fmt::Display for HTTPError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

pub type HTTPResult<T> = std::result::Result<T, HTTPError>;

/// A successful response, with its body exactly as received.
#[derive(Debug)]
pub(crate) struct HTTPResponse {
    pub(crate) status_code: StatusCode,
    pub(crate) signature_o: Option<String>,
    pub(crate) body: Vec<u8>,
}

/// Sends the signed request as-is and reads the whole response body.  Non-success statuses are
/// returned as HTTPError, with the response body as the description.
pub(crate) async fn http_send(
    http_client: &reqwest::Client,
    signed_request: &SignedRequest,
) -> HTTPResult<HTTPResponse> {
    let method = match signed_request.method {
        HTTPMethod::GET => reqwest::Method::GET,
        HTTPMethod::POST => reqwest::Method::POST,
    };
    let mut header_map = reqwest::header::HeaderMap::new();
    for header in signed_request.header_v.iter() {
        let header_name = reqwest::header::HeaderName::from_bytes(header.name.as_bytes())
            .map_err(|err| HTTPError {
                status_code: StatusCode::BAD_REQUEST,
                description: format!("invalid HTTP header name {:?}: {}", header.name, err).into(),
            })?;
        let header_value =
            reqwest::header::HeaderValue::from_str(&header.value).map_err(|err| HTTPError {
                status_code: StatusCode::BAD_REQUEST,
                description: format!("invalid value for HTTP header {}: {}", header.name, err)
                    .into(),
            })?;
        header_map.insert(header_name, header_value);
    }
    let mut request_builder = http_client
        .request(method, signed_request.url.clone())
        .headers(header_map);
    if signed_request.method == HTTPMethod::POST {
        request_builder = request_builder.body(signed_request.body.clone());
    }

    let response = request_builder.send().await.map_err(|err| HTTPError {
        status_code: err.status().unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        description: format!(
            "HTTP {} {} response was error: {}",
            signed_request.method, signed_request.url, err
        )
        .into(),
    })?;
    let status_code = response.status();
    let signature_o = response
        .headers()
        .get(JWS_SIGNATURE_HEADER)
        .map(|header_value| String::from_utf8_lossy(header_value.as_bytes()).into_owned());
    let body = response
        .bytes()
        .await
        .map_err(|err| HTTPError {
            status_code: err.status().unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            description: format!(
                "HTTP {} {} response body read error: {}",
                signed_request.method, signed_request.url, err
            )
            .into(),
        })?
        .to_vec();
    tracing::trace!(
        method = %signed_request.method,
        url = %signed_request.url,
        %status_code,
        body_len = body.len(),
        "HTTP response"
    );

    if status_code.is_success() {
        Ok(HTTPResponse {
            status_code,
            signature_o,
            body,
        })
    } else {
        Err(HTTPError {
            status_code,
            description: format!(
                "HTTP {} {} failed: {}",
                signed_request.method,
                signed_request.url,
                String::from_utf8_lossy(&body)
            )
            .into(),
        })
    }
}
