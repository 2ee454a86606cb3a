mod base64url;
mod detached_jws;
mod ecdsa_der;
mod error;
mod jws_algorithm;
mod jws_header;
mod key_pem;
mod sign;
mod signing_key;
mod verify;
mod verifying_key;

pub use crate::{
    base64url::{base64url_decode, base64url_encode},
    detached_jws::DetachedJWS,
    ecdsa_der::{der_to_raw, raw_to_der},
    error::Error,
    jws_algorithm::{HashFunction, JWSAlgorithm, KeyFamily},
    jws_header::JWSHeader,
    sign::{sign, sign_at},
    verify::{verify, verify_at},
};
pub type Result<T> = std::result::Result<T, Error>;

/// The HTTP header that carries the detached JWS of a request or response.
pub const JWS_SIGNATURE_HEADER: &str = "x-jws-signature";
