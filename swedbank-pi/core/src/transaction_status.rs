/// Lifecycle state of a payment initiation transaction, as reported by the bank.  States this
/// crate doesn't know about are preserved verbatim in `Unknown`.
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionStatus {
    NotInitiated,
    Initiated,
    Started,
    InProgress,
    Executed,
    Abandoned,
    Failed,
    Expired,
    Unknown(String),
}

impl TransactionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::NotInitiated => "NOT_INITIATED",
            Self::Initiated => "INITIATED",
            Self::Started => "STARTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Executed => "EXECUTED",
            Self::Abandoned => "ABANDONED",
            Self::Failed => "FAILED",
            Self::Expired => "EXPIRED",
            Self::Unknown(s) => s.as_str(),
        }
    }
    /// Returns true if the transaction will not change state anymore.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            Self::Executed | Self::Abandoned | Self::Failed | Self::Expired
        )
    }
}

impl From<String> for TransactionStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "NOT_INITIATED" => Self::NotInitiated,
            "INITIATED" => Self::Initiated,
            "STARTED" => Self::Started,
            "IN_PROGRESS" => Self::InProgress,
            "EXECUTED" => Self::Executed,
            "ABANDONED" => Self::Abandoned,
            "FAILED" => Self::Failed,
            "EXPIRED" => Self::Expired,
            _ => Self::Unknown(s),
        }
    }
}

impl From<TransactionStatus> for String {
    fn from(transaction_status: TransactionStatus) -> Self {
        match transaction_status {
            TransactionStatus::Unknown(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON body of `GET {base}/public/api/v3/transactions/{id}/status`.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStatusResponse {
    pub status: TransactionStatus,
    #[serde(rename = "bic", default, skip_serializing_if = "Option::is_none")]
    pub bic_o: Option<String>,
    #[serde(rename = "amount", default, skip_serializing_if = "Option::is_none")]
    pub amount_o: Option<String>,
    #[serde(rename = "currency", default, skip_serializing_if = "Option::is_none")]
    pub currency_o: Option<String>,
    #[serde(rename = "debtorIban", default, skip_serializing_if = "Option::is_none")]
    pub debtor_iban_o: Option<String>,
    #[serde(rename = "debtorName", default, skip_serializing_if = "Option::is_none")]
    pub debtor_name_o: Option<String>,
}
