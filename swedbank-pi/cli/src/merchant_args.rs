use swedbank_pi_core::Country;
use swedbank_pi_jws::JWSAlgorithm;

/// Identifies the merchant on whose behalf requests are signed.
#[derive(clap::Args, Debug)]
pub struct MerchantArgs {
    /// Specify the merchant id assigned by the bank.
    #[arg(env = "SWEDBANK_PI_MERCHANT_ID", short, long, value_name = "ID")]
    pub merchant_id: String,
    /// Specify the country of the merchant agreement.
    #[arg(env = "SWEDBANK_PI_COUNTRY", short, long, value_name = "COUNTRY", value_enum)]
    pub country: Country,
    /// Specify the algorithm to sign with.  It must match the type of the private key.
    #[arg(
        env = "SWEDBANK_PI_ALGORITHM",
        short,
        long,
        value_name = "ALG",
        default_value = "RS512",
        value_enum
    )]
    pub algorithm: JWSAlgorithm,
}
