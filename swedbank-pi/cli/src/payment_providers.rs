use crate::{GatewayArgs, NewlineArgs, Result};

/// List the banks that payments can be initiated through, as JSON.
#[derive(clap::Parser)]
pub struct PaymentProviders {
    #[command(flatten)]
    pub gateway_args: GatewayArgs,
    #[command(flatten)]
    pub newline_args: NewlineArgs,
}

impl PaymentProviders {
    pub async fn handle(self) -> Result<()> {
        let client = self.gateway_args.payment_initiation_client()?;
        let provider_v = client.providers().await?;
        crate::print_json(&provider_v, &self.newline_args)
    }
}
