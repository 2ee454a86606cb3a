mod cmd;
mod gateway_args;
mod jws_sign;
mod jws_verify;
mod merchant_args;
mod newline_args;
mod payment_initiate;
mod payment_providers;
mod payment_status;
mod private_key_file_args;
mod public_key_file_args;

pub use crate::{
    gateway_args::GatewayArgs, jws_sign::JWSSign, jws_verify::JWSVerify,
    merchant_args::MerchantArgs, newline_args::NewlineArgs, payment_initiate::PaymentInitiate,
    payment_providers::PaymentProviders, payment_status::PaymentStatus,
    private_key_file_args::PrivateKeyFileArgs, public_key_file_args::PublicKeyFileArgs,
};
pub use anyhow::{Error, Result};

pub(crate) fn parse_url(s: &str) -> anyhow::Result<url::Url> {
    let parsed_url = if !s.contains("://") {
        // If no scheme was specified, slap "https://" on the front before parsing.
        url::Url::parse(format!("https://{}", s).as_str())?
    } else {
        // Otherwise, parse directly.
        url::Url::parse(s)?
    };
    Ok(parsed_url)
}

/// Reads the given path (after `~` expansion) into a String, for PEM files.
pub(crate) fn read_pem_file(path: &str, arg_name: &str) -> Result<String> {
    let path = expanduser::expanduser(path)?;
    anyhow::ensure!(
        path.exists(),
        "Path {:?} specified by {} does not exist.",
        path,
        arg_name
    );
    Ok(std::fs::read_to_string(&path)?)
}

/// Writes the value as pretty JSON to stdout, followed by the optional newline.
pub(crate) fn print_json<T: serde::Serialize>(
    value: &T,
    newline_args: &NewlineArgs,
) -> Result<()> {
    use std::io::Write;
    serde_json::to_writer_pretty(std::io::stdout(), value)?;
    newline_args.print_newline_if_necessary(&mut std::io::stdout())?;
    std::io::stdout().flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // It's necessary to specify EnvFilter::from_default_env in order to use RUST_LOG env var.
    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .compact()
        .init();

    use clap::Parser;
    // Note that if the env var RUST_BACKTRACE is set to 1 (or "full"), then the backtrace will be printed
    // to stderr if this returns error.
    cmd::Root::parse().handle().await
}
