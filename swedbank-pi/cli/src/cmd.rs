use crate::{JWSSign, JWSVerify, PaymentInitiate, PaymentProviders, PaymentStatus, Result};

/// Swedbank Payment Initiation CLI tool: detached JWS signing and verification of API messages, and
/// signed calls to the API itself.
#[derive(clap::Parser)]
pub enum Root {
    #[command(subcommand)]
    JWS(JWS),
    #[command(subcommand)]
    Payment(Payment),
}

impl Root {
    pub async fn handle(self) -> Result<()> {
        match self {
            Self::JWS(x) => x.handle(),
            Self::Payment(x) => x.handle().await,
        }
    }
}

/// Detached JWS operations (the `x-jws-signature` header of requests and responses).
#[derive(clap::Subcommand)]
pub enum JWS {
    Sign(JWSSign),
    Verify(JWSVerify),
}

impl JWS {
    pub fn handle(self) -> Result<()> {
        match self {
            Self::Sign(x) => x.handle(),
            Self::Verify(x) => x.handle(),
        }
    }
}

/// Signed calls to the payment initiation API.  Each response is verified against the bank's
/// public key before it is printed.
#[derive(clap::Subcommand)]
pub enum Payment {
    Initiate(PaymentInitiate),
    Providers(PaymentProviders),
    Status(PaymentStatus),
}

impl Payment {
    pub async fn handle(self) -> Result<()> {
        match self {
            Self::Initiate(x) => x.handle().await,
            Self::Providers(x) => x.handle().await,
            Self::Status(x) => x.handle().await,
        }
    }
}
