use std::time::Duration;

use serde::Deserialize;

/// CORS configuration for browser clients calling the proxy from another origin
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins (`"*"` or a list)
    #[serde(default)]
    pub origins: AllowList,
    /// Allowed request headers (`"*"` or a list)
    #[serde(default)]
    pub headers: AllowList,
    /// Max age for preflight cache in seconds
    #[serde(default)]
    pub max_age: Option<u64>,
}

impl CorsConfig {
    pub fn max_age_duration(&self) -> Option<Duration> {
        self.max_age.map(Duration::from_secs)
    }
}

/// Either a wildcard or an explicit list of values
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawAllowList")]
pub enum AllowList {
    #[default]
    Any,
    Only(Vec<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAllowList {
    One(String),
    Many(Vec<String>),
}

impl From<RawAllowList> for AllowList {
    fn from(raw: RawAllowList) -> Self {
        let values = match raw {
            RawAllowList::One(value) => vec![value],
            RawAllowList::Many(values) => values,
        };

        if values.iter().any(|v| v == "*") {
            Self::Any
        } else {
            Self::Only(values)
        }
    }
}
