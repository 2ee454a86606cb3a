use crate::Result;

#[derive(clap::Args)]
pub struct PrivateKeyFileArgs {
    /// Specify the path of the merchant's PEM-encoded private key (PKCS#8, PKCS#1 or SEC1).
    #[arg(
        env = "SWEDBANK_PI_PRIVATE_KEY_PATH",
        short = 'k',
        long,
        value_name = "PATH",
        default_value = "~/.swedbank-pi/privkey.pem"
    )]
    private_key_path: String,
}

impl PrivateKeyFileArgs {
    pub fn read_private_key_pem(&self) -> Result<String> {
        crate::read_pem_file(&self.private_key_path, "--private-key-path")
    }
}
