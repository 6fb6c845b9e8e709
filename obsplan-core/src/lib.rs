//! obsplan core library: project container, observations, validation, errors.
//!
//! Public API surface:
//! - [`project`]: [`Project`], the ordered observation container
//! - [`observation`]: [`ObservationRecord`] capability trait and [`Observation`]
//! - [`events`]: [`ProjectEvent`] and injectable [`ProjectObserver`]s
//! - [`document`]: JSON / YAML encodings of the project mapping
//! - [`validation`]: input checks shared by all operations
//! - [`error`]: [`ProjectError`], [`ValidationError`]

pub mod document;
pub mod error;
pub mod events;
pub mod observation;
pub mod project;
pub mod types;
pub mod validation;

pub use document::DocumentFormat;
pub use error::{ProjectError, ValidationError};
pub use events::{NullObserver, ProjectEvent, ProjectObserver, TracingObserver};
pub use observation::{Observation, ObservationRecord};
pub use project::Project;
pub use types::{ObservationType, ProjectName, DEFAULT_OBSERVATION_CODE, DEFAULT_PROJECT_NAME};
