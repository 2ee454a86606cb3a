use crate::{GatewayArgs, NewlineArgs, Result};

/// Fetch the status of a payment initiation transaction, as JSON.
#[derive(clap::Parser)]
pub struct PaymentStatus {
    /// Specify the transaction id returned when the payment was initiated.
    #[arg(short, long, value_name = "ID")]
    pub id: String,
    #[command(flatten)]
    pub gateway_args: GatewayArgs,
    #[command(flatten)]
    pub newline_args: NewlineArgs,
}

impl PaymentStatus {
    pub async fn handle(self) -> Result<()> {
        let client = self.gateway_args.payment_initiation_client()?;
        let transaction_status_response = client.transaction_status(&self.id).await?;
        tracing::debug!(status = %transaction_status_response.status, "transaction status");
        crate::print_json(&transaction_status_response, &self.newline_args)
    }
}
