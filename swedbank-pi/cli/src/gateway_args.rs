use crate::{MerchantArgs, PrivateKeyFileArgs, PublicKeyFileArgs, Result};
use swedbank_pi_core::{Environment, Gateway, GatewayConfig, Locale, DEFAULT_MAX_AGE_SECONDS};

/// Everything needed to talk to the payment initiation API on behalf of a merchant.
#[derive(clap::Args)]
pub struct GatewayArgs {
    #[command(flatten)]
    pub merchant_args: MerchantArgs,
    #[command(flatten)]
    pub private_key_file_args: PrivateKeyFileArgs,
    #[command(flatten)]
    pub public_key_file_args: PublicKeyFileArgs,
    /// Specify which hosted deployment of the API to use.  Overridden by --base-url.
    #[arg(
        env = "SWEDBANK_PI_ENVIRONMENT",
        short,
        long,
        value_name = "ENV",
        default_value = "sandbox",
        value_enum
    )]
    pub environment: Environment,
    /// Specify the base URL of the API explicitly, e.g. for a proxy.  If no scheme is given, then
    /// "https" is used.
    #[arg(
        name = "base-url",
        env = "SWEDBANK_PI_BASE_URL",
        long,
        value_name = "URL",
        value_parser = crate::parse_url
    )]
    pub base_url_o: Option<url::Url>,
    /// Specify the maximum allowed difference in seconds between the local clock and the "iat" of
    /// response signatures.  0 disables the check.
    #[arg(
        env = "SWEDBANK_PI_MAX_AGE",
        long,
        value_name = "SECONDS",
        default_value_t = DEFAULT_MAX_AGE_SECONDS
    )]
    pub max_age: u64,
    /// Specify the locale of the bank's payment pages, when a payment doesn't specify one.
    #[arg(
        env = "SWEDBANK_PI_DEFAULT_LOCALE",
        long,
        value_name = "LOCALE",
        default_value = "en",
        value_enum
    )]
    pub default_locale: Locale,
}

impl GatewayArgs {
    pub fn gateway_config(&self) -> Result<GatewayConfig> {
        let mut gateway_config = GatewayConfig::new(
            self.merchant_args.merchant_id.clone(),
            self.merchant_args.country,
            self.private_key_file_args.read_private_key_pem()?,
            self.public_key_file_args.read_public_key_pem()?,
            self.environment,
        )
        .with_algorithm(self.merchant_args.algorithm)
        .with_max_age_seconds(self.max_age)
        .with_default_locale(self.default_locale);
        if let Some(base_url) = self.base_url_o.as_ref() {
            gateway_config = gateway_config.with_base_url(base_url.clone());
        }
        Ok(gateway_config)
    }
    pub fn payment_initiation_client(&self) -> Result<swedbank_pi_client::PaymentInitiationClient> {
        let gateway = Gateway::new(self.gateway_config()?)?;
        Ok(swedbank_pi_client::PaymentInitiationClient::new(gateway))
    }
}
