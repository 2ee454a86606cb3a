use crate::Country;

/// A bank that payments can be initiated through, as listed by
/// `GET {base}/public/api/v3/agreement/providers`.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Provider {
    pub bic: String,
    pub name: String,
    pub country: Country,
}
