mod country;
mod environment;
mod error;
mod gateway;
mod gateway_config;
mod locale;
mod observer;
mod payment_initiation_request;
mod provider;
mod provider_resolver;
mod signed_request;
mod transaction_status;
pub mod validation;

pub use crate::{
    country::Country,
    environment::Environment,
    error::Error,
    gateway::{Gateway, CONTENT_TYPE_JSON},
    gateway_config::{GatewayConfig, DEFAULT_MAX_AGE_SECONDS},
    locale::Locale,
    observer::{NoopObserver, Observer, RequestRecord, ResponseRecord, TracingObserver},
    payment_initiation_request::{PaymentInitiationRequest, PaymentInitiationResponse},
    provider::Provider,
    provider_resolver::{is_bic, DefaultProviderResolver, ProviderResolver},
    signed_request::{HTTPHeader, HTTPMethod, SignedRequest},
    transaction_status::{TransactionStatus, TransactionStatusResponse},
};
pub use swedbank_pi_jws::{JWSAlgorithm, JWS_SIGNATURE_HEADER};

pub type Result<T> = std::result::Result<T, Error>;
