//! Text encodings of the project mapping.
//!
//! A project document is the output of [`Project::to_value`] written as JSON
//! or YAML. The format is picked from the file extension unless the caller
//! overrides it.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde_json::Value;

use crate::error::ProjectError;
use crate::observation::ObservationRecord;
use crate::project::Project;

/// Supported document encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.yaml` / `.yml` → YAML, anything else → JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                DocumentFormat::Yaml
            }
            _ => DocumentFormat::Json,
        }
    }

    pub fn decode(self, text: &str) -> Result<Value, ProjectError> {
        match self {
            DocumentFormat::Json => Ok(serde_json::from_str(text)?),
            DocumentFormat::Yaml => Ok(serde_yaml::from_str(text)?),
        }
    }

    /// JSON is pretty-printed; both encodings end with a newline.
    pub fn encode(self, value: &Value) -> Result<String, ProjectError> {
        match self {
            DocumentFormat::Json => {
                let mut text = serde_json::to_string_pretty(value)?;
                text.push('\n');
                Ok(text)
            }
            DocumentFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Json => write!(f, "json"),
            DocumentFormat::Yaml => write!(f, "yaml"),
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(format!("unknown document format '{s}'; expected: json, yaml")),
        }
    }
}

/// Decodes `text` and rebuilds the project it describes.
pub fn decode_project<O: ObservationRecord>(
    text: &str,
    format: DocumentFormat,
) -> Result<Project<O>, ProjectError> {
    let value = format.decode(text)?;
    Project::from_value(&value)
}

pub fn encode_project<O: ObservationRecord>(
    project: &Project<O>,
    format: DocumentFormat,
) -> Result<String, ProjectError> {
    format.encode(&project.to_value())
}
