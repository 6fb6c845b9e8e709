//! The project container: a named, ordered sequence of observations.
//!
//! # Validation
//!
//! Every operation that accepts input checks it before touching state, so a
//! failed call leaves the project exactly as it was and emits no event.
//! Observations are re-validated on every insertion path, not just at
//! construction.
//!
//! # Index ranges
//!
//! | Operation              | Valid `index`  |
//! |------------------------|----------------|
//! | `insert_observation`   | `0..=len`      |
//! | `remove_observation`   | `0..len`       |
//! | `set_observation`      | `0..len`       |
//! | `get_by_index`         | `0..len`       |
//!
//! Out-of-range indices are never clamped; they fail with
//! [`ProjectError::IndexOutOfRange`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

use crate::error::ProjectError;
use crate::events::{ProjectEvent, ProjectObserver, TracingObserver};
use crate::observation::{Observation, ObservationRecord};
use crate::types::{ProjectName, DEFAULT_OBSERVATION_CODE};
use crate::validation::{check_non_empty, check_observation, check_observations};

const NAME_FIELD: &str = "Project name";

/// An ordered, mutable collection of observations identified by a name.
#[derive(Clone)]
pub struct Project<O = Observation> {
    name: ProjectName,
    observations: Vec<O>,
    observer: Arc<dyn ProjectObserver>,
}

// ---------------------------------------------------------------------------
// 1. Construction
// ---------------------------------------------------------------------------

impl<O: ObservationRecord> Project<O> {
    /// Creates a project that reports events through [`TracingObserver`].
    pub fn new(
        name: impl Into<ProjectName>,
        observations: Vec<O>,
    ) -> Result<Self, ProjectError> {
        Self::with_observer(name, observations, Arc::new(TracingObserver))
    }

    /// Creates an empty project.
    pub fn named(name: impl Into<ProjectName>) -> Result<Self, ProjectError> {
        Self::new(name, Vec::new())
    }

    /// Creates a project that reports events to `observer`.
    ///
    /// Fails if `name` is blank or if any observation is rejected; the error
    /// names the position of the first offending element.
    pub fn with_observer(
        name: impl Into<ProjectName>,
        observations: Vec<O>,
        observer: Arc<dyn ProjectObserver>,
    ) -> Result<Self, ProjectError> {
        let name = name.into();
        check_non_empty(name.as_str(), NAME_FIELD)?;
        check_observations(&observations)?;

        let project = Self {
            name,
            observations,
            observer,
        };
        project.emit(ProjectEvent::Created {
            project: project.name.as_str(),
            observations: project.observations.len(),
        });
        Ok(project)
    }

    // -----------------------------------------------------------------------
    // 2. Mutation
    // -----------------------------------------------------------------------

    /// Appends `observation` to the end of the sequence.
    pub fn add_observation(&mut self, observation: O) -> Result<(), ProjectError> {
        check_observation(&observation)?;
        self.observations.push(observation);
        let added = &self.observations[self.observations.len() - 1];
        self.emit(ProjectEvent::Added {
            project: self.name.as_str(),
            code: added.observation_code(),
        });
        Ok(())
    }

    /// Builds an observation with the two-argument constructor and appends it.
    pub fn create_observation(
        &mut self,
        observation_code: &str,
        is_active: bool,
    ) -> Result<(), ProjectError> {
        check_non_empty(observation_code, "Observation code")?;
        let observation = O::create(observation_code, is_active)?;
        self.add_observation(observation)
    }

    /// `create_observation("OBS_DEFAULT", true)`.
    pub fn create_default_observation(&mut self) -> Result<(), ProjectError> {
        self.create_observation(DEFAULT_OBSERVATION_CODE, true)
    }

    /// Inserts `observation` at `index`, shifting later elements back by one.
    /// `index == len` appends.
    pub fn insert_observation(&mut self, observation: O, index: usize) -> Result<(), ProjectError> {
        check_observation(&observation)?;
        self.check_index(index, self.observations.len() + 1)?;
        self.observations.insert(index, observation);
        self.emit(ProjectEvent::Inserted {
            project: self.name.as_str(),
            code: self.observations[index].observation_code(),
            index,
        });
        Ok(())
    }

    /// Removes the observation at `index` and hands it back; later elements
    /// move forward by one.
    pub fn remove_observation(&mut self, index: usize) -> Result<O, ProjectError> {
        self.check_index(index, self.observations.len())?;
        let removed = self.observations.remove(index);
        self.emit(ProjectEvent::Removed {
            project: self.name.as_str(),
            code: removed.observation_code(),
            index,
        });
        Ok(removed)
    }

    /// Replaces the observation at `index` in place and returns the old one.
    /// There is no append form.
    pub fn set_observation(&mut self, observation: O, index: usize) -> Result<O, ProjectError> {
        check_observation(&observation)?;
        self.check_index(index, self.observations.len())?;
        let previous = std::mem::replace(&mut self.observations[index], observation);
        self.emit(ProjectEvent::Replaced {
            project: self.name.as_str(),
            code: self.observations[index].observation_code(),
            index,
        });
        Ok(previous)
    }

    pub fn set_name(&mut self, name: impl Into<ProjectName>) -> Result<(), ProjectError> {
        let name = name.into();
        check_non_empty(name.as_str(), NAME_FIELD)?;
        let previous = std::mem::replace(&mut self.name, name);
        self.emit(ProjectEvent::Renamed {
            from: previous.as_str(),
            to: self.name.as_str(),
        });
        Ok(())
    }

    // -----------------------------------------------------------------------
    // 3. Read access
    // -----------------------------------------------------------------------

    pub fn get_by_index(&self, index: usize) -> Result<&O, ProjectError> {
        self.check_index(index, self.observations.len())?;
        let observation = &self.observations[index];
        self.emit(ProjectEvent::Retrieved {
            project: self.name.as_str(),
            code: observation.observation_code(),
            index,
        });
        Ok(observation)
    }

    /// Read-only view of the observations in current order. Changes go
    /// through the validated operations above.
    pub fn get_observations(&self) -> &[O] {
        &self.observations
    }

    pub fn get_name(&self) -> &ProjectName {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, O> {
        self.observations.iter()
    }

    // -----------------------------------------------------------------------
    // 4. Mapping form
    // -----------------------------------------------------------------------

    /// `{"name": ..., "observations": [...]}` with observations in order.
    /// Emits no events.
    pub fn to_value(&self) -> Value {
        let observations: Vec<Value> = self.observations.iter().map(O::to_value).collect();
        json!({
            "name": self.name.as_str(),
            "observations": observations,
        })
    }

    /// Rebuilds a project from the output of [`Project::to_value`].
    ///
    /// Errors from the observation's own reconstruction are returned as-is.
    pub fn from_value(value: &Value) -> Result<Self, ProjectError> {
        Self::from_value_with_observer(value, Arc::new(TracingObserver))
    }

    pub fn from_value_with_observer(
        value: &Value,
        observer: Arc<dyn ProjectObserver>,
    ) -> Result<Self, ProjectError> {
        let name = value
            .get("name")
            .ok_or(ProjectError::MissingField { field: "name" })?;
        let name: String = serde_json::from_value(name.clone())
            .map_err(|source| ProjectError::Malformed { field: "name", source })?;

        let entries = value
            .get("observations")
            .ok_or(ProjectError::MissingField { field: "observations" })?;
        let entries: Vec<Value> = serde_json::from_value(entries.clone()).map_err(|source| {
            ProjectError::Malformed {
                field: "observations",
                source,
            }
        })?;
        let observations = entries
            .iter()
            .map(O::from_value)
            .collect::<Result<Vec<_>, _>>()?;

        Self::with_observer(name, observations, observer)
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    /// `index` must be below `upper`.
    fn check_index(&self, index: usize, upper: usize) -> Result<(), ProjectError> {
        if index >= upper {
            return Err(ProjectError::IndexOutOfRange {
                index,
                len: self.observations.len(),
            });
        }
        Ok(())
    }

    fn emit(&self, event: ProjectEvent<'_>) {
        self.observer.notify(&event);
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<O: ObservationRecord> Default for Project<O> {
    fn default() -> Self {
        let project = Self {
            name: ProjectName::default(),
            observations: Vec::new(),
            observer: Arc::new(TracingObserver),
        };
        project.emit(ProjectEvent::Created {
            project: project.name.as_str(),
            observations: 0,
        });
        project
    }
}

impl<O: PartialEq> PartialEq for Project<O> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.observations == other.observations
    }
}

impl<O: fmt::Debug> fmt::Debug for Project<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Project")
            .field("name", &self.name)
            .field("observations", &self.observations)
            .finish_non_exhaustive()
    }
}

impl<O> fmt::Display for Project<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Project(name='{}', observations={})",
            self.name,
            self.observations.len()
        )
    }
}

impl<'a, O: ObservationRecord> IntoIterator for &'a Project<O> {
    type Item = &'a O;
    type IntoIter = std::slice::Iter<'a, O>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<O: ObservationRecord> Serialize for Project<O> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de, O: ObservationRecord> Deserialize<'de> for Project<O> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
