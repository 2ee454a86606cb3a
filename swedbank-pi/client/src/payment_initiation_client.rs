use crate::{http::http_send, Result, REQWEST_CLIENT};
use swedbank_pi_core::{
    Gateway, PaymentInitiationRequest, PaymentInitiationResponse, Provider, ProviderResolver,
    SignedRequest, TransactionStatusResponse,
};

/// Async client for the Swedbank Payment Initiation API.  Every request is signed, and every
/// response body is verified against the bank's signature before it is parsed.
#[derive(Clone, Debug)]
pub struct PaymentInitiationClient {
    http_client: reqwest::Client,
    gateway: Gateway,
}

impl PaymentInitiationClient {
    pub fn new(gateway: Gateway) -> Self {
        Self::new_with_http_client(gateway, REQWEST_CLIENT.clone())
    }
    /// Use this to supply a client with custom timeouts, proxies or TLS settings.
    pub fn new_with_http_client(gateway: Gateway, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            gateway,
        }
    }
    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Lists the banks that payments can be initiated through.
    pub async fn providers(&self) -> Result<Vec<Provider>> {
        let signed_request = self.gateway.prepare_providers()?;
        let body = self.exchange(&signed_request).await?;
        Ok(self.gateway.parse_providers_response(&body)?)
    }
    /// Initiates a payment through the bank that payment_type resolves to, returning the
    /// transaction id and the URL to redirect the payer to.
    pub async fn initiate_payment(
        &self,
        request: &PaymentInitiationRequest,
        payment_type: &str,
        resolver_override_o: Option<&dyn ProviderResolver>,
    ) -> Result<PaymentInitiationResponse> {
        let signed_request =
            self.gateway
                .prepare_payment_initiation(request, payment_type, resolver_override_o)?;
        let body = self.exchange(&signed_request).await?;
        Ok(self.gateway.parse_payment_initiation_response(&body)?)
    }
    pub async fn transaction_status(&self, transaction_id: &str) -> Result<TransactionStatusResponse> {
        let signed_request = self.gateway.prepare_transaction_status(transaction_id)?;
        let body = self.exchange(&signed_request).await?;
        Ok(self.gateway.parse_transaction_status_response(&body)?)
    }

    /// Sends the signed request and returns the response body once its signature has been verified.
    async fn exchange(&self, signed_request: &SignedRequest) -> Result<Vec<u8>> {
        let http_response = http_send(&self.http_client, signed_request).await?;
        self.gateway.verify_response(
            http_response.status_code.as_u16(),
            http_response.signature_o.as_deref(),
            &http_response.body,
        )?;
        Ok(http_response.body)
    }
}
