//! Validation helpers called at every point where the container accepts input.
//!
//! Each helper returns `Ok(())` on success and never mutates anything, so a
//! caller can run all checks before touching its own state.

use crate::error::ValidationError;
use crate::observation::ObservationRecord;

/// Rejects empty and whitespace-only text. `field` names the value in the
/// error message.
pub fn check_non_empty(value: &str, field: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyString {
            field: field.to_owned(),
        });
    }
    Ok(())
}

/// Runs the observation's own structural check.
pub fn check_observation<O: ObservationRecord>(observation: &O) -> Result<(), ValidationError> {
    observation.validate()
}

/// Checks every element of `observations`, reporting the position of the
/// first one that fails.
pub fn check_observations<O: ObservationRecord>(observations: &[O]) -> Result<(), ValidationError> {
    for (position, observation) in observations.iter().enumerate() {
        check_observation(observation).map_err(|e| ValidationError::InvalidObservation {
            position,
            reason: e.to_string(),
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::Observation;

    #[test]
    fn non_empty_accepts_text() {
        assert!(check_non_empty("Alpha", "Project name").is_ok());
    }

    #[test]
    fn non_empty_rejects_blank_and_names_field() {
        let err = check_non_empty("   ", "Project name").unwrap_err();
        assert_eq!(err.to_string(), "Project name must be a non-empty string");
        assert!(check_non_empty("", "Key").is_err());
    }

    #[test]
    fn sequence_check_reports_first_offender() {
        let good = Observation::new("OBS1", true);
        let bad = Observation::new("", true);
        let err = check_observations(&[good.clone(), bad.clone(), bad]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidObservation { position: 1, .. }));
        assert!(check_observations(&[good]).is_ok());
        assert!(check_observations::<Observation>(&[]).is_ok());
    }
}
