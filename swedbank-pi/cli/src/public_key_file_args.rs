use crate::Result;

#[derive(clap::Args)]
pub struct PublicKeyFileArgs {
    /// Specify the path of the signer's PEM-encoded public key or X.509 certificate, which is the
    /// bank's for responses.
    #[arg(
        env = "SWEDBANK_PI_BANK_PUBLIC_KEY_PATH",
        short = 'b',
        long,
        value_name = "PATH",
        default_value = "~/.swedbank-pi/bank.pem"
    )]
    public_key_path: String,
}

impl PublicKeyFileArgs {
    pub fn read_public_key_pem(&self) -> Result<String> {
        crate::read_pem_file(&self.public_key_path, "--public-key-path")
    }
}
