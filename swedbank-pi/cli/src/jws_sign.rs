use crate::{MerchantArgs, NewlineArgs, PrivateKeyFileArgs, Result};
use std::io::{Read, Write};

/// Produce the detached JWS for an API request, to be sent in its `x-jws-signature` header.  The
/// request body is read from stdin, byte for byte, and the JWS is written to stdout.
#[derive(clap::Parser)]
pub struct JWSSign {
    /// Specify the exact URL that the request will be sent to.
    #[arg(short, long, value_name = "URL")]
    pub url: String,
    #[command(flatten)]
    pub merchant_args: MerchantArgs,
    #[command(flatten)]
    pub private_key_file_args: PrivateKeyFileArgs,
    #[command(flatten)]
    pub newline_args: NewlineArgs,
}

impl JWSSign {
    pub fn handle(self) -> Result<()> {
        // Handle CLI args and input
        let private_key_pem = self.private_key_file_args.read_private_key_pem()?;
        let mut payload = Vec::new();
        std::io::stdin().read_to_end(&mut payload)?;

        // Do the processing
        let jws = swedbank_pi_jws::sign(
            &payload,
            &self.url,
            &self.merchant_args.merchant_id,
            self.merchant_args.country.as_str(),
            &private_key_pem,
            self.merchant_args.algorithm,
        )?;

        // Print the JWS and optional newline.
        std::io::stdout().write_all(jws.as_bytes())?;
        self.newline_args
            .print_newline_if_necessary(&mut std::io::stdout())?;

        Ok(())
    }
}
