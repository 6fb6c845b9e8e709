//! Observation entity and the capability contract the project container relies on.
//!
//! [`crate::Project`] is generic over [`ObservationRecord`]; it only needs a
//! code for diagnostics, a mapping form for serialization, a reconstruction
//! function, and the two-argument constructor behind
//! [`crate::Project::create_observation`]. [`Observation`] is the concrete
//! record shipped with the crate.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{ProjectError, ValidationError};
use crate::types::{ObservationType, DEFAULT_OBSERVATION_CODE};
use crate::validation::check_non_empty;

// ---------------------------------------------------------------------------
// Capability contract
// ---------------------------------------------------------------------------

/// What the project container needs from the values it stores.
pub trait ObservationRecord: Sized {
    /// Identifying code, used only for diagnostics and events.
    fn observation_code(&self) -> &str;

    fn is_active(&self) -> bool;

    /// Plain key-value form of this observation.
    fn to_value(&self) -> Value;

    /// Rebuilds an observation from the output of [`ObservationRecord::to_value`].
    fn from_value(value: &Value) -> Result<Self, ProjectError>;

    /// Two-argument constructor.
    fn create(observation_code: &str, is_active: bool) -> Result<Self, ProjectError>;

    /// Structural check run by the container before accepting a value.
    fn validate(&self) -> Result<(), ValidationError> {
        if self.observation_code().trim().is_empty() {
            return Err(ValidationError::Observation {
                code: self.observation_code().to_owned(),
                reason: "observation code must be a non-empty string".to_owned(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Observation
// ---------------------------------------------------------------------------

fn default_active() -> bool {
    true
}

/// A single scheduled observation: code, observing mode, activation flag and
/// the results downstream calculators attached to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    observation_code: String,
    #[serde(default)]
    observation_type: ObservationType,
    #[serde(rename = "isactive", default = "default_active")]
    is_active: bool,
    #[serde(default)]
    calculated_data: BTreeMap<String, Value>,
}

impl Default for Observation {
    fn default() -> Self {
        Self::new(DEFAULT_OBSERVATION_CODE, true)
    }
}

impl Observation {
    /// Creates a VLBI observation. The code is not checked here; the project
    /// container validates it on insertion.
    pub fn new(observation_code: impl Into<String>, is_active: bool) -> Self {
        Self {
            observation_code: observation_code.into(),
            observation_type: ObservationType::default(),
            is_active,
            calculated_data: BTreeMap::new(),
        }
    }

    pub fn with_type(mut self, observation_type: ObservationType) -> Self {
        self.observation_type = observation_type;
        self
    }

    pub fn code(&self) -> &str {
        &self.observation_code
    }

    pub fn observation_type(&self) -> ObservationType {
        self.observation_type
    }

    pub fn set_observation_code(&mut self, code: impl Into<String>) -> Result<(), ValidationError> {
        let code = code.into();
        check_non_empty(&code, "Observation code")?;
        tracing::debug!(from = %self.observation_code, to = %code, "observation code changed");
        self.observation_code = code;
        Ok(())
    }

    /// Switching mode invalidates anything computed for the old one.
    pub fn set_observation_type(&mut self, observation_type: ObservationType) {
        if self.observation_type != observation_type {
            self.observation_type = observation_type;
            self.calculated_data.clear();
        }
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    pub fn set_calculated_data(&mut self, key: &str, data: Value) -> Result<(), ValidationError> {
        check_non_empty(key, "Key")?;
        self.calculated_data.insert(key.to_owned(), data);
        tracing::debug!(code = %self.observation_code, key, "stored calculated data");
        Ok(())
    }

    pub fn calculated_data(&self, key: &str) -> Option<&Value> {
        self.calculated_data.get(key)
    }

    pub fn calculated_data_len(&self) -> usize {
        self.calculated_data.len()
    }

    pub fn clear_calculated_data(&mut self) {
        self.calculated_data.clear();
    }
}

impl ObservationRecord for Observation {
    fn observation_code(&self) -> &str {
        &self.observation_code
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn to_value(&self) -> Value {
        json!({
            "observation_code": self.observation_code,
            "observation_type": self.observation_type,
            "isactive": self.is_active,
            "calculated_data": self.calculated_data,
        })
    }

    fn from_value(value: &Value) -> Result<Self, ProjectError> {
        if value.get("observation_code").is_none() {
            return Err(ProjectError::MissingField {
                field: "observation_code",
            });
        }
        let observation: Observation = serde_json::from_value(value.clone())
            .map_err(|source| ProjectError::Malformed {
                field: "observations",
                source,
            })?;
        observation.validate()?;
        Ok(observation)
    }

    fn create(observation_code: &str, is_active: bool) -> Result<Self, ProjectError> {
        check_non_empty(observation_code, "Observation code")?;
        Ok(Self::new(observation_code, is_active))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let invalid = |reason: &str| ValidationError::Observation {
            code: self.observation_code.clone(),
            reason: reason.to_owned(),
        };
        if self.observation_code.trim().is_empty() {
            return Err(invalid("observation code must be a non-empty string"));
        }
        if self.calculated_data.keys().any(|k| k.trim().is_empty()) {
            return Err(invalid("calculated data keys must be non-empty strings"));
        }
        Ok(())
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Observation(code='{}', type={}, isactive={}, calculated_data={} items)",
            self.observation_code,
            self.observation_type,
            self.is_active,
            self.calculated_data.len()
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults_to_vlbi_without_data() {
        let obs = Observation::new("OBS1", false);
        assert_eq!(obs.code(), "OBS1");
        assert_eq!(obs.observation_type(), ObservationType::Vlbi);
        assert!(!ObservationRecord::is_active(&obs));
        assert_eq!(obs.calculated_data_len(), 0);
    }

    #[test]
    fn mapping_uses_isactive_key() {
        let value = Observation::new("OBS1", false).to_value();
        assert_eq!(value["observation_code"], "OBS1");
        assert_eq!(value["observation_type"], "VLBI");
        assert_eq!(value["isactive"], false);
        assert!(value["calculated_data"].as_object().unwrap().is_empty());
    }

    #[test]
    fn from_value_fills_defaults() {
        let obs = Observation::from_value(&json!({ "observation_code": "OBS9" })).unwrap();
        assert_eq!(obs, Observation::new("OBS9", true));
    }

    #[test]
    fn from_value_requires_code() {
        let err = Observation::from_value(&json!({ "isactive": true })).unwrap_err();
        assert!(matches!(err, ProjectError::MissingField { field: "observation_code" }));
    }

    #[test]
    fn from_value_rejects_unknown_type() {
        let err = Observation::from_value(&json!({
            "observation_code": "OBS1",
            "observation_type": "RADAR",
        }))
        .unwrap_err();
        assert!(matches!(err, ProjectError::Malformed { .. }), "got: {err}");
    }

    #[test]
    fn from_value_rejects_empty_code() {
        let err = Observation::from_value(&json!({ "observation_code": "" })).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn create_rejects_empty_code() {
        assert!(Observation::create("", true).unwrap_err().is_validation());
        assert_eq!(Observation::create("OBS1", true).unwrap().code(), "OBS1");
    }

    #[test]
    fn type_change_clears_calculated_data() {
        let mut obs = Observation::new("OBS1", true);
        obs.set_calculated_data("uv_coverage", json!([1.0, 2.0])).unwrap();
        obs.set_observation_code("OBS2").unwrap();
        assert_eq!(obs.calculated_data("uv_coverage"), Some(&json!([1.0, 2.0])));

        obs.set_observation_type(ObservationType::SingleDish);
        assert_eq!(obs.calculated_data("uv_coverage"), None);
    }

    #[test]
    fn clear_calculated_data_keeps_identity() {
        let mut obs = Observation::new("OBS1", false);
        obs.set_calculated_data("uv_coverage", json!([1.0])).unwrap();
        obs.set_calculated_data("sensitivity", json!(0.3)).unwrap();
        assert_eq!(obs.calculated_data_len(), 2);

        obs.clear_calculated_data();
        assert_eq!(obs.calculated_data_len(), 0);
        assert_eq!(obs.code(), "OBS1");
        assert!(!obs.is_active());
    }

    #[test]
    fn calculated_data_key_must_be_non_empty() {
        let mut obs = Observation::default();
        assert!(obs.set_calculated_data("", json!(1)).is_err());
        assert_eq!(obs.calculated_data_len(), 0);
    }

    #[test]
    fn activation_toggles() {
        let mut obs = Observation::new("OBS1", true);
        obs.deactivate();
        assert!(!ObservationRecord::is_active(&obs));
        obs.activate();
        assert!(ObservationRecord::is_active(&obs));
    }

    #[test]
    fn display_summarises_fields() {
        let obs = Observation::new("OBS1", true).with_type(ObservationType::SingleDish);
        assert_eq!(
            obs.to_string(),
            "Observation(code='OBS1', type=SINGLE_DISH, isactive=true, calculated_data=0 items)"
        );
    }
}
