use crate::{GatewayArgs, NewlineArgs, Result};
use swedbank_pi_core::{Locale, PaymentInitiationRequest};

/// Initiate a EUR payment.  The transaction id and the URL to send the payer to are written to
/// stdout as JSON.
#[derive(clap::Parser)]
pub struct PaymentInitiate {
    /// Specify the amount, e.g. "10" or "10.50".
    #[arg(long, value_name = "AMOUNT")]
    pub amount: String,
    /// Specify the payment description shown to the payer (at most 140 characters).
    #[arg(short, long, value_name = "TEXT")]
    pub description: String,
    /// Specify the structured creditor reference (with its 7-3-1 check digit).
    #[arg(name = "reference", short, long, value_name = "REFERENCE")]
    pub reference_o: Option<String>,
    /// Specify where the payer is sent after the payment flow.
    #[arg(long, value_name = "URL")]
    pub redirect_url: String,
    /// Specify where the bank sends status notifications.
    #[arg(long, value_name = "URL")]
    pub notification_url: String,
    /// Specify the bank to pay through: a BIC, or one of SWEDBANK_EE, SWEDBANK_LV, SWEDBANK_LT.
    #[arg(short, long, value_name = "TYPE")]
    pub payment_type: String,
    /// Specify the locale of the bank's payment pages.  Defaults to --default-locale.
    #[arg(name = "locale", short, long, value_name = "LOCALE", value_enum)]
    pub locale_o: Option<Locale>,
    /// Specify the IP address of the payer.
    #[arg(name = "ip-address", long, value_name = "IP")]
    pub ip_address_o: Option<String>,
    /// Specify the user agent of the payer's browser.
    #[arg(name = "user-agent", long, value_name = "UA")]
    pub user_agent_o: Option<String>,
    #[command(flatten)]
    pub gateway_args: GatewayArgs,
    #[command(flatten)]
    pub newline_args: NewlineArgs,
}

impl PaymentInitiate {
    pub async fn handle(self) -> Result<()> {
        let mut request = PaymentInitiationRequest::new(
            self.amount,
            self.description,
            self.redirect_url,
            self.notification_url,
        )
        .with_client_info(self.ip_address_o, self.user_agent_o);
        if let Some(reference) = self.reference_o {
            request = request.with_reference(reference);
        }
        if let Some(locale) = self.locale_o {
            request = request.with_locale(locale);
        }

        let client = self.gateway_args.payment_initiation_client()?;
        let response = client
            .initiate_payment(&request, &self.payment_type, None)
            .await?;
        tracing::info!(id = response.id.as_str(), "payment initiated");
        crate::print_json(&response, &self.newline_args)
    }
}
