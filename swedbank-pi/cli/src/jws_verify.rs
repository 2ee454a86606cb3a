use crate::{NewlineArgs, PublicKeyFileArgs, Result};
use std::io::{Read, Write};
use swedbank_pi_core::DEFAULT_MAX_AGE_SECONDS;

/// Verify the detached JWS of an API request or response against its body.  The JWS is read from
/// stdin.  If the JWS is valid, then the JWS is written to stdout, and otherwise the exit status is
/// nonzero.
#[derive(clap::Parser)]
pub struct JWSVerify {
    #[command(flatten)]
    pub public_key_file_args: PublicKeyFileArgs,
    /// Specify the maximum allowed difference in seconds between the local clock and the "iat" of
    /// the JWS.  0 disables the check.
    #[arg(
        env = "SWEDBANK_PI_MAX_AGE",
        long,
        value_name = "SECONDS",
        default_value_t = DEFAULT_MAX_AGE_SECONDS
    )]
    pub max_age: u64,
    /// Specify the detached payload (the body) directly on the command line.  This is only suitable
    /// for small payloads that don't contain sensitive information, since typically the commandline
    /// that invoked a process is visible in the process list on a Unix system.  This argument is
    /// mutually exclusive with the `--detached-payload-file` argument.
    #[arg(name = "detached-payload", short = 'p', long, value_name = "PAYLOAD")]
    pub detached_payload_o: Option<String>,
    /// Specify the file from which to read the detached payload (the body).  The file is read byte for
    /// byte.  This argument is mutually exclusive with the `--detached-payload` argument.
    #[arg(name = "detached-payload-file", short = 'f', long, value_name = "FILE")]
    pub detached_payload_file_o: Option<std::path::PathBuf>,
    #[command(flatten)]
    pub newline_args: NewlineArgs,
}

impl JWSVerify {
    pub fn handle(self) -> Result<()> {
        // Handle CLI args and input

        // Read the JWS from stdin, making sure to trim whitespace off the ends.
        let mut jws_string = String::new();
        std::io::stdin().read_to_string(&mut jws_string)?;
        let jws_str = jws_string.trim();

        let public_key_pem = self.public_key_file_args.read_public_key_pem()?;

        anyhow::ensure!(
            self.detached_payload_o.is_none() || self.detached_payload_file_o.is_none(),
            "Cannot specify both --detached-payload and --detached-payload-file"
        );
        let payload = if let Some(detached_payload) = self.detached_payload_o {
            detached_payload.into_bytes()
        } else if let Some(detached_payload_file) = self.detached_payload_file_o.as_ref() {
            std::fs::read(detached_payload_file)?
        } else {
            anyhow::bail!("One of --detached-payload or --detached-payload-file must be specified");
        };

        // Do the processing
        let verified = swedbank_pi_jws::verify(jws_str, &payload, &public_key_pem, self.max_age)?;
        anyhow::ensure!(verified, "JWS signature does not match the payload");
        tracing::info!("Input JWS was successfully validated.");

        // Print the JWS and optional newline.
        std::io::stdout().write_all(jws_str.as_bytes())?;
        self.newline_args
            .print_newline_if_necessary(&mut std::io::stdout())?;

        Ok(())
    }
}
