use crate::Error;

/// The two hosted Swedbank Payment Initiation deployments.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Sandbox => "sandbox",
            Environment::Production => "production",
        }
    }
    /// Base URL of the API, without a trailing slash.
    pub fn base_url_str(&self) -> &'static str {
        match self {
            Environment::Sandbox => "https://pi-playground.swedbank.com",
            Environment::Production => "https://pi.swedbank.com",
        }
    }
    pub fn base_url(&self) -> url::Url {
        lazy_static::lazy_static! {
            static ref SANDBOX_BASE_URL: url::Url =
                url::Url::parse(Environment::Sandbox.base_url_str()).expect("valid sandbox URL");
            static ref PRODUCTION_BASE_URL: url::Url =
                url::Url::parse(Environment::Production.base_url_str()).expect("valid production URL");
        }
        match self {
            Environment::Sandbox => SANDBOX_BASE_URL.clone(),
            Environment::Production => PRODUCTION_BASE_URL.clone(),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Environment {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sandbox" => Ok(Environment::Sandbox),
            "production" => Ok(Environment::Production),
            _ => Err(Error::Invalid(
                format!("environment {:?} is not one of sandbox, production", s).into(),
            )),
        }
    }
}
