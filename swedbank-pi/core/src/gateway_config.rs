use crate::{Country, Environment, Error, Locale, Result};
use swedbank_pi_jws::JWSAlgorithm;

/// The default tolerance between a response signature's "iat" and the local clock.
pub const DEFAULT_MAX_AGE_SECONDS: u64 = 120;

fn default_max_age_seconds() -> u64 {
    DEFAULT_MAX_AGE_SECONDS
}

/// Everything needed to sign requests on behalf of a merchant and to verify the bank's responses.
#[derive(Clone, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    /// Merchant identifier assigned by the bank; the second component of the "kid" header.
    pub merchant_id: String,
    pub country: Country,
    /// Algorithm used to sign outgoing requests.  Responses are verified using whatever algorithm
    /// they declare.
    #[serde(default)]
    pub algorithm: JWSAlgorithm,
    /// PEM-encoded private key of the merchant.
    pub private_key_pem: String,
    /// PEM-encoded public key (or certificate) of the bank.
    pub bank_public_key_pem: String,
    /// Base URL of the API, e.g. "https://pi.swedbank.com".
    pub base_url: url::Url,
    /// Maximum allowed |now - iat| of response signatures.  0 disables the check.
    #[serde(default = "default_max_age_seconds")]
    pub max_age_seconds: u64,
    /// Locale used for payment initiations that don't specify one.
    #[serde(default)]
    pub default_locale: Locale,
}

impl GatewayConfig {
    pub fn new(
        merchant_id: String,
        country: Country,
        private_key_pem: String,
        bank_public_key_pem: String,
        environment: Environment,
    ) -> Self {
        Self {
            merchant_id,
            country,
            algorithm: JWSAlgorithm::default(),
            private_key_pem,
            bank_public_key_pem,
            base_url: environment.base_url(),
            max_age_seconds: DEFAULT_MAX_AGE_SECONDS,
            default_locale: Locale::default(),
        }
    }
    pub fn with_algorithm(mut self, algorithm: JWSAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
    pub fn with_base_url(mut self, base_url: url::Url) -> Self {
        self.base_url = base_url;
        self
    }
    pub fn with_max_age_seconds(mut self, max_age_seconds: u64) -> Self {
        self.max_age_seconds = max_age_seconds;
        self
    }
    pub fn with_default_locale(mut self, default_locale: Locale) -> Self {
        self.default_locale = default_locale;
        self
    }
    /// Checks the parts of the config that can be checked without touching the keys.
    pub fn validate(&self) -> Result<()> {
        if self.merchant_id.is_empty() {
            return Err(Error::Invalid("merchantId must not be empty".into()));
        }
        if self.merchant_id.contains(':') {
            return Err(Error::Invalid(
                format!("merchantId {:?} must not contain ':'", self.merchant_id).into(),
            ));
        }
        if self.base_url.scheme() != "https" && self.base_url.scheme() != "http" {
            return Err(Error::Invalid(
                format!("baseUrl {} must be an http(s) URL", self.base_url).into(),
            ));
        }
        if self.base_url.cannot_be_a_base()
            || self.base_url.query().is_some()
            || self.base_url.fragment().is_some()
        {
            return Err(Error::Invalid(
                format!(
                    "baseUrl {} must not have a query or fragment",
                    self.base_url
                )
                .into(),
            ));
        }
        if self.private_key_pem.trim().is_empty() {
            return Err(Error::Invalid("privateKeyPem must not be empty".into()));
        }
        if self.bank_public_key_pem.trim().is_empty() {
            return Err(Error::Invalid("bankPublicKeyPem must not be empty".into()));
        }
        Ok(())
    }
}

// The key material is left out.
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("merchant_id", &self.merchant_id)
            .field("country", &self.country)
            .field("algorithm", &self.algorithm)
            .field("base_url", &self.base_url.as_str())
            .field("max_age_seconds", &self.max_age_seconds)
            .field("default_locale", &self.default_locale)
            .finish()
    }
}
