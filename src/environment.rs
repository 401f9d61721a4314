use crate::consts::dashboard_consts::network::DEFAULT_API_URL;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// The market-data backend the dashboard polls.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Public CoinGecko API.
    #[default]
    Production,
    /// Any API serving the same `coins/markets` shape, e.g. a local mirror.
    Custom { api_url: String },
}

impl Environment {
    /// Returns the API root URL associated with the environment.
    pub fn api_url(&self) -> String {
        match self {
            Environment::Production => DEFAULT_API_URL.to_string(),
            Environment::Custom { api_url } => api_url.clone(),
        }
    }

    /// Picks the environment from an override URL, if one is set and non-empty.
    pub fn resolve(api_url_override: Option<&str>) -> Self {
        api_url_override
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .and_then(|url| url.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        match lowered.as_str() {
            "production" | "prod" => Ok(Environment::Production),
            _ if lowered.starts_with("http://") || lowered.starts_with("https://") => {
                Ok(Environment::Custom {
                    api_url: s.to_string(),
                })
            }
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "Production"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.api_url())
    }
}
