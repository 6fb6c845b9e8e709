//! Project events and the observer they are delivered to.
//!
//! A [`crate::Project`] never logs directly. Every successful mutation or
//! positional read is reported as a [`ProjectEvent`] to the observer injected
//! at construction; [`TracingObserver`] is the default and forwards to
//! `tracing` at info level. Observers cannot fail the operation that
//! triggered them.

use std::fmt;

/// Something that happened to a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectEvent<'a> {
    Created {
        project: &'a str,
        observations: usize,
    },
    Added {
        project: &'a str,
        code: &'a str,
    },
    Inserted {
        project: &'a str,
        code: &'a str,
        index: usize,
    },
    Removed {
        project: &'a str,
        code: &'a str,
        index: usize,
    },
    Replaced {
        project: &'a str,
        code: &'a str,
        index: usize,
    },
    Retrieved {
        project: &'a str,
        code: &'a str,
        index: usize,
    },
    Renamed {
        from: &'a str,
        to: &'a str,
    },
}

impl ProjectEvent<'_> {
    /// Name of the project the event belongs to (the new name for renames).
    pub fn project(&self) -> &str {
        match *self {
            ProjectEvent::Created { project, .. }
            | ProjectEvent::Added { project, .. }
            | ProjectEvent::Inserted { project, .. }
            | ProjectEvent::Removed { project, .. }
            | ProjectEvent::Replaced { project, .. }
            | ProjectEvent::Retrieved { project, .. } => project,
            ProjectEvent::Renamed { to, .. } => to,
        }
    }
}

impl fmt::Display for ProjectEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectEvent::Created { project, observations } => write!(
                f,
                "initialized project '{project}' with {observations} observations"
            ),
            ProjectEvent::Added { project, code } => {
                write!(f, "added observation '{code}' to project '{project}'")
            }
            ProjectEvent::Inserted { project, code, index } => write!(
                f,
                "inserted observation '{code}' at index {index} in project '{project}'"
            ),
            ProjectEvent::Removed { project, code, index } => write!(
                f,
                "removed observation '{code}' at index {index} from project '{project}'"
            ),
            ProjectEvent::Replaced { project, code, index } => write!(
                f,
                "set observation '{code}' at index {index} in project '{project}'"
            ),
            ProjectEvent::Retrieved { project, code, index } => write!(
                f,
                "retrieved observation '{code}' at index {index} from project '{project}'"
            ),
            ProjectEvent::Renamed { from, to } => {
                write!(f, "renamed project '{from}' to '{to}'")
            }
        }
    }
}

/// Receives project events.
pub trait ProjectObserver: fmt::Debug + Send + Sync {
    fn notify(&self, event: &ProjectEvent<'_>);
}

/// Forwards events to `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ProjectObserver for TracingObserver {
    fn notify(&self, event: &ProjectEvent<'_>) {
        match *event {
            ProjectEvent::Created { project, observations } => {
                tracing::info!(project, observations, "project initialized");
            }
            ProjectEvent::Added { project, code } => {
                tracing::info!(project, code, "observation added");
            }
            ProjectEvent::Inserted { project, code, index } => {
                tracing::info!(project, code, index, "observation inserted");
            }
            ProjectEvent::Removed { project, code, index } => {
                tracing::info!(project, code, index, "observation removed");
            }
            ProjectEvent::Replaced { project, code, index } => {
                tracing::info!(project, code, index, "observation replaced");
            }
            ProjectEvent::Retrieved { project, code, index } => {
                tracing::info!(project, code, index, "observation retrieved");
            }
            ProjectEvent::Renamed { from, to } => {
                tracing::info!(from, to, "project renamed");
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl ProjectObserver for NullObserver {
    fn notify(&self, _event: &ProjectEvent<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_code_index_and_project() {
        let event = ProjectEvent::Inserted {
            project: "Alpha",
            code: "OBS1",
            index: 3,
        };
        assert_eq!(
            event.to_string(),
            "inserted observation 'OBS1' at index 3 in project 'Alpha'"
        );
        assert_eq!(event.project(), "Alpha");
    }

    #[test]
    fn rename_reports_new_name() {
        let event = ProjectEvent::Renamed { from: "Alpha", to: "Beta" };
        assert_eq!(event.project(), "Beta");
    }
}
