mod error;
mod http;
mod payment_initiation_client;

pub use crate::{
    error::Error,
    http::{HTTPError, HTTPResult, REQWEST_CLIENT},
    payment_initiation_client::PaymentInitiationClient,
};
pub type Result<T> = std::result::Result<T, Error>;
