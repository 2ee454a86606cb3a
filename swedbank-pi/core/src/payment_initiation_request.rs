use crate::{
    validation::{
        normalize_amount, validate_currency, validate_description, validate_ip_address,
        validate_reference, validate_url, CURRENCY_EUR,
    },
    Locale, Result,
};

/// JSON body of `POST {base}/public/api/v3/transactions/providers/{bic}`.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInitiationRequest {
    /// Decimal amount, e.g. "10.00".
    pub amount: String,
    pub currency: String,
    pub description: String,
    /// Optional structured creditor reference (7-3-1 check digit).
    #[serde(rename = "reference", default, skip_serializing_if = "Option::is_none")]
    pub reference_o: Option<String>,
    /// Where the payer's browser is sent after the payment flow.
    pub redirect_url: String,
    /// Where the bank posts status notifications.
    pub notification_url: String,
    /// Language of the bank's payment pages.  Filled in from the gateway's default if absent.
    #[serde(rename = "locale", default, skip_serializing_if = "Option::is_none")]
    pub locale_o: Option<Locale>,
    /// IP address of the payer, if known.
    #[serde(rename = "ipAddress", default, skip_serializing_if = "Option::is_none")]
    pub ip_address_o: Option<String>,
    /// User agent of the payer's browser, if known.
    #[serde(rename = "userAgent", default, skip_serializing_if = "Option::is_none")]
    pub user_agent_o: Option<String>,
}

impl PaymentInitiationRequest {
    /// Creates a EUR payment initiation with no reference, locale or client info.
    pub fn new(
        amount: impl Into<String>,
        description: impl Into<String>,
        redirect_url: impl Into<String>,
        notification_url: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            currency: CURRENCY_EUR.to_string(),
            description: description.into(),
            reference_o: None,
            redirect_url: redirect_url.into(),
            notification_url: notification_url.into(),
            locale_o: None,
            ip_address_o: None,
            user_agent_o: None,
        }
    }
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference_o = Some(reference.into());
        self
    }
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale_o = Some(locale);
        self
    }
    pub fn with_client_info(
        mut self,
        ip_address_o: Option<String>,
        user_agent_o: Option<String>,
    ) -> Self {
        self.ip_address_o = ip_address_o;
        self.user_agent_o = user_agent_o;
        self
    }
    /// Validates every field and returns the request as it should be sent, with the amount
    /// normalized to two fraction digits and the locale defaulted.
    pub fn validated(&self, default_locale: Locale) -> Result<Self> {
        let amount = normalize_amount(&self.amount)?;
        validate_currency(&self.currency)?;
        validate_description(&self.description)?;
        if let Some(reference) = self.reference_o.as_deref() {
            validate_reference(reference)?;
        }
        validate_url("redirectUrl", &self.redirect_url)?;
        validate_url("notificationUrl", &self.notification_url)?;
        if let Some(ip_address) = self.ip_address_o.as_deref() {
            validate_ip_address(ip_address)?;
        }
        Ok(Self {
            amount,
            locale_o: Some(self.locale_o.unwrap_or(default_locale)),
            ..self.clone()
        })
    }
}

/// Response to a payment initiation: the transaction id and the URL to send the payer to.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInitiationResponse {
    pub id: String,
    pub redirect_url: String,
}
