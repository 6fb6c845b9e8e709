//! Domain newtypes and enums shared by the project container and observations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Name given to a project when none is supplied.
pub const DEFAULT_PROJECT_NAME: &str = "PROJECT_DEFAULT";

/// Code given to an observation created without one.
pub const DEFAULT_OBSERVATION_CODE: &str = "OBS_DEFAULT";

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed project name.
///
/// Construction does not validate; [`crate::Project`] rejects empty names
/// wherever one is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(pub String);

impl ProjectName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ProjectName {
    fn default() -> Self {
        Self(DEFAULT_PROJECT_NAME.to_owned())
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProjectName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Observing mode of an [`crate::Observation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ObservationType {
    #[default]
    #[serde(rename = "VLBI")]
    Vlbi,
    #[serde(rename = "SINGLE_DISH")]
    SingleDish,
}

impl fmt::Display for ObservationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObservationType::Vlbi => write!(f, "VLBI"),
            ObservationType::SingleDish => write!(f, "SINGLE_DISH"),
        }
    }
}

impl FromStr for ObservationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "vlbi" => Ok(Self::Vlbi),
            "single_dish" => Ok(Self::SingleDish),
            _ => Err(format!(
                "unknown observation type '{s}'; expected: vlbi, single-dish"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
