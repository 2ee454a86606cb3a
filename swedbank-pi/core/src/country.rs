use crate::Error;

/// The Baltic countries in which Swedbank offers payment initiation.  Used as the first component of
/// the "kid" JWS header ("<country>:<merchantId>").
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize,
)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Country {
    #[default]
    #[cfg_attr(feature = "clap", value(name = "EE"))]
    EE,
    #[cfg_attr(feature = "clap", value(name = "LV"))]
    LV,
    #[cfg_attr(feature = "clap", value(name = "LT"))]
    LT,
}

impl Country {
    pub const ALL: [Country; 3] = [Country::EE, Country::LV, Country::LT];
    pub fn as_str(&self) -> &'static str {
        match self {
            Country::EE => "EE",
            Country::LV => "LV",
            Country::LT => "LT",
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Country {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EE" => Ok(Country::EE),
            "LV" => Ok(Country::LV),
            "LT" => Ok(Country::LT),
            _ => Err(Error::Invalid(
                format!("country {:?} is not one of EE, LV, LT", s).into(),
            )),
        }
    }
}
