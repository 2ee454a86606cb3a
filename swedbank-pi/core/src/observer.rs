/// A signed request about to be sent to the bank.
#[derive(Clone, Copy, Debug)]
pub struct RequestRecord<'a> {
    pub method: &'a str,
    pub url: &'a str,
    pub body: &'a [u8],
    pub jws: &'a str,
}

/// A response received from the bank, after its signature was checked.
#[derive(Clone, Copy, Debug)]
pub struct ResponseRecord<'a> {
    pub status_code: u16,
    pub body: &'a [u8],
    pub signature_o: Option<&'a str>,
    /// True if the signature was present and verified.
    pub verified: bool,
}

/// Hook for auditing the signed exchanges with the bank.
pub trait Observer: Send + Sync {
    fn on_request(&self, request_record: &RequestRecord<'_>);
    fn on_response(&self, response_record: &ResponseRecord<'_>);
}

/// Reports exchanges through `tracing`.  Bodies are logged at trace level only.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn on_request(&self, request_record: &RequestRecord<'_>) {
        tracing::debug!(
            method = request_record.method,
            url = request_record.url,
            body_len = request_record.body.len(),
            "signed request"
        );
        tracing::trace!(
            body = %String::from_utf8_lossy(request_record.body),
            jws = request_record.jws,
            "signed request body"
        );
    }
    fn on_response(&self, response_record: &ResponseRecord<'_>) {
        if response_record.verified {
            tracing::debug!(
                status_code = response_record.status_code,
                body_len = response_record.body.len(),
                "verified response"
            );
        } else {
            tracing::warn!(
                status_code = response_record.status_code,
                body_len = response_record.body.len(),
                signature_present = response_record.signature_o.is_some(),
                "response failed signature verification"
            );
        }
        tracing::trace!(
            body = %String::from_utf8_lossy(response_record.body),
            signature = ?response_record.signature_o,
            "response body"
        );
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn on_request(&self, _request_record: &RequestRecord<'_>) {}
    fn on_response(&self, _response_record: &ResponseRecord<'_>) {}
}
