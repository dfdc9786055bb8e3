use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Runtime environment an instance is configured for.
///
/// ```
/// use hearth_instance::Environment;
///
/// let environment: Environment = "production".parse().unwrap_or_default();
/// assert!(environment.is_production());
/// assert_eq!(Environment::from("staging").as_str(), "staging");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum Environment {
    /// Local development.
    #[default]
    Development,
    /// Live, user-facing deployment.
    Production,
    /// Any other environment name.
    Custom(String),
}

impl Environment {
    /// Returns the environment name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Custom(name) => name.as_str(),
        }
    }

    /// Returns `true` for the production environment.
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Name of the configuration file that holds this environment's settings.
    #[must_use]
    pub fn config_file_name(&self) -> String {
        format!("config.{}.json", self.as_str())
    }
}

impl From<&str> for Environment {
    fn from(name: &str) -> Self {
        match name.trim() {
            "development" => Self::Development,
            "production" => Self::Production,
            other => Self::Custom(other.to_owned()),
        }
    }
}

impl From<String> for Environment {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<Environment> for String {
    fn from(environment: Environment) -> Self {
        environment.as_str().to_owned()
    }
}

impl FromStr for Environment {
    type Err = Infallible;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(name))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
