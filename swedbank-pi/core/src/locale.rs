use crate::Error;

/// Language of the bank's payment pages.
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize,
)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Locale {
    #[default]
    En,
    Et,
    Lv,
    Lt,
    Ru,
}

impl Locale {
    pub const ALL: [Locale; 5] = [Locale::En, Locale::Et, Locale::Lv, Locale::Lt, Locale::Ru];
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Et => "et",
            Locale::Lv => "lv",
            Locale::Lt => "lt",
            Locale::Ru => "ru",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Locale {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|locale| locale.as_str() == s)
            .ok_or_else(|| {
                Error::Invalid(format!("locale {:?} is not one of en, et, lv, lt, ru", s).into())
            })
    }
}
