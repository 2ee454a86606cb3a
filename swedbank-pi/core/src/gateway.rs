use crate::{
    DefaultProviderResolver, Error, GatewayConfig, HTTPHeader, HTTPMethod, Observer,
    PaymentInitiationRequest, PaymentInitiationResponse, Provider, ProviderResolver,
    RequestRecord, ResponseRecord, Result, SignedRequest, TracingObserver,
    TransactionStatusResponse,
};
use std::sync::Arc;
use swedbank_pi_jws::JWS_SIGNATURE_HEADER;

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Signs requests to, and verifies responses from, the Swedbank Payment Initiation API on behalf of
/// one merchant.  Does no I/O; see swedbank-pi-client for the HTTP transport.
#[derive(Clone)]
pub struct Gateway {
    config: GatewayConfig,
    observer_a: Arc<dyn Observer>,
    provider_resolver_a: Arc<dyn ProviderResolver>,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("config", &self.config)
            .finish()
    }
}

impl Gateway {
    /// Creates a Gateway that reports exchanges via TracingObserver and resolves payment types via
    /// DefaultProviderResolver.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        config.validate()?;
        tracing::debug!(?config, "Gateway::new");
        Ok(Self {
            config,
            observer_a: Arc::new(TracingObserver),
            provider_resolver_a: Arc::new(DefaultProviderResolver),
        })
    }
    pub fn with_observer(mut self, observer_a: Arc<dyn Observer>) -> Self {
        self.observer_a = observer_a;
        self
    }
    pub fn with_provider_resolver(mut self, provider_resolver_a: Arc<dyn ProviderResolver>) -> Self {
        self.provider_resolver_a = provider_resolver_a;
        self
    }
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    fn endpoint_url(&self, path: &str) -> Result<url::Url> {
        let url_string = format!(
            "{}/public/api/v3/{}",
            self.config.base_url.as_str().trim_end_matches('/'),
            path
        );
        url::Url::parse(&url_string).map_err(|e| {
            Error::Invalid(format!("could not form endpoint URL {:?}: {}", url_string, e).into())
        })
    }
    /// `{base}/public/api/v3/agreement/providers`
    pub fn providers_url(&self) -> Result<url::Url> {
        self.endpoint_url("agreement/providers")
    }
    /// `{base}/public/api/v3/transactions/providers/{bic}`
    pub fn payment_initiation_url(&self, bic: &str) -> Result<url::Url> {
        if !crate::is_bic(bic) {
            return Err(Error::Invalid(format!("{:?} is not a BIC", bic).into()));
        }
        self.endpoint_url(&format!("transactions/providers/{}", bic))
    }
    /// `{base}/public/api/v3/transactions/{id}/status`
    pub fn transaction_status_url(&self, transaction_id: &str) -> Result<url::Url> {
        if transaction_id.is_empty()
            || !transaction_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(Error::Invalid(
                format!("transaction id {:?} is not a valid path segment", transaction_id).into(),
            ));
        }
        self.endpoint_url(&format!("transactions/{}/status", transaction_id))
    }

    /// Signs the given request body (empty for GET) for the given URL, producing the request to send.
    pub fn sign_request(
        &self,
        method: HTTPMethod,
        url: url::Url,
        body: Vec<u8>,
    ) -> Result<SignedRequest> {
        self.sign_request_at(method, url, body, time::OffsetDateTime::now_utc())
    }
    /// As sign_request, but with an explicit "iat".
    pub fn sign_request_at(
        &self,
        method: HTTPMethod,
        url: url::Url,
        body: Vec<u8>,
        iat: time::OffsetDateTime,
    ) -> Result<SignedRequest> {
        let jws = swedbank_pi_jws::sign_at(
            &body,
            url.as_str(),
            &self.config.merchant_id,
            self.config.country.as_str(),
            &self.config.private_key_pem,
            self.config.algorithm,
            iat,
        )?;
        self.observer_a.on_request(&RequestRecord {
            method: method.as_str(),
            url: url.as_str(),
            body: &body,
            jws: jws.as_str(),
        });
        Ok(SignedRequest {
            method,
            url,
            body,
            header_v: vec![
                HTTPHeader::new(JWS_SIGNATURE_HEADER, jws.into_string()),
                HTTPHeader::new("content-type", CONTENT_TYPE_JSON),
            ],
        })
    }

    /// Verifies the x-jws-signature header of a response against its exact body bytes, using the
    /// bank's public key and the configured maximum signature age.
    pub fn verify_response(
        &self,
        status_code: u16,
        signature_header_o: Option<&str>,
        body: &[u8],
    ) -> Result<()> {
        self.verify_response_at(
            status_code,
            signature_header_o,
            body,
            time::OffsetDateTime::now_utc(),
        )
    }
    /// As verify_response, but with an explicit current time.
    pub fn verify_response_at(
        &self,
        status_code: u16,
        signature_header_o: Option<&str>,
        body: &[u8],
        now: time::OffsetDateTime,
    ) -> Result<()> {
        let result = match signature_header_o {
            None => Err(Error::MissingSignature(
                format!("response with status {} was not signed", status_code).into(),
            )),
            Some(signature) => swedbank_pi_jws::verify_at(
                signature.trim(),
                body,
                &self.config.bank_public_key_pem,
                self.config.max_age_seconds,
                now,
            )
            .map_err(Error::from)
            .and_then(|verified| {
                if verified {
                    Ok(())
                } else {
                    Err(Error::SignatureMismatch(
                        format!(
                            "response with status {} does not match its signature",
                            status_code
                        )
                        .into(),
                    ))
                }
            }),
        };
        self.observer_a.on_response(&ResponseRecord {
            status_code,
            body,
            signature_o: signature_header_o,
            verified: result.is_ok(),
        });
        result
    }

    /// Resolves the BIC for the given payment type, using resolver_override_o if given and this
    /// Gateway's resolver otherwise.
    pub fn resolve_provider(
        &self,
        payment_type: &str,
        resolver_override_o: Option<&dyn ProviderResolver>,
    ) -> Result<String> {
        let provider_resolver: &dyn ProviderResolver = match resolver_override_o {
            Some(provider_resolver) => provider_resolver,
            None => self.provider_resolver_a.as_ref(),
        };
        let bic = provider_resolver.resolve(payment_type).ok_or_else(|| {
            Error::Invalid(format!("unknown payment type {:?}", payment_type).into())
        })?;
        tracing::trace!(payment_type, bic = bic.as_str(), "resolved provider");
        Ok(bic)
    }

    /// Validates the payment initiation, resolves the bank it goes to, and signs it.
    pub fn prepare_payment_initiation(
        &self,
        request: &PaymentInitiationRequest,
        payment_type: &str,
        resolver_override_o: Option<&dyn ProviderResolver>,
    ) -> Result<SignedRequest> {
        let request = request.validated(self.config.default_locale)?;
        let bic = self.resolve_provider(payment_type, resolver_override_o)?;
        let url = self.payment_initiation_url(&bic)?;
        let body = serde_json::to_vec(&request).map_err(|e| {
            Error::Serialization(format!("could not serialize payment initiation: {}", e).into())
        })?;
        self.sign_request(HTTPMethod::POST, url, body)
    }
    pub fn prepare_transaction_status(&self, transaction_id: &str) -> Result<SignedRequest> {
        let url = self.transaction_status_url(transaction_id)?;
        self.sign_request(HTTPMethod::GET, url, Vec::new())
    }
    pub fn prepare_providers(&self) -> Result<SignedRequest> {
        let url = self.providers_url()?;
        self.sign_request(HTTPMethod::GET, url, Vec::new())
    }

    pub fn parse_payment_initiation_response(
        &self,
        body: &[u8],
    ) -> Result<PaymentInitiationResponse> {
        parse_json(body, "payment initiation response")
    }
    pub fn parse_transaction_status_response(
        &self,
        body: &[u8],
    ) -> Result<TransactionStatusResponse> {
        parse_json(body, "transaction status response")
    }
    pub fn parse_providers_response(&self, body: &[u8]) -> Result<Vec<Provider>> {
        parse_json(body, "providers response")
    }
}

fn parse_json<T: serde::de::DeserializeOwned>(body: &[u8], what: &'static str) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|e| Error::Malformed(format!("could not parse {}: {}", what, e).into()))
}
