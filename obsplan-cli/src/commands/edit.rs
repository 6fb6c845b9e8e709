//! `obsplan add|insert|remove|set|rename`: one core operation per command.

use anyhow::{Context, Result};
use clap::Args;

use obsplan_core::DEFAULT_OBSERVATION_CODE;

use super::{DocumentArgs, ObservationArgs, ObservationFlags};

// ---------------------------------------------------------------------------
// add
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
pub struct AddArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// Observation code. Defaults to OBS_DEFAULT.
    #[arg(default_value = DEFAULT_OBSERVATION_CODE)]
    pub code: String,

    #[command(flatten)]
    pub flags: ObservationFlags,
}

impl AddArgs {
    pub fn run(self) -> Result<()> {
        let mut project = self.document.load()?;
        let added = match self.flags.observation_type {
            None => project.create_observation(&self.code, !self.flags.inactive),
            Some(_) => project.add_observation(self.flags.build(&self.code)),
        };
        added.with_context(|| format!("failed to add observation '{}'", self.code))?;

        self.document.store(
            &project,
            &format!("Added '{}' to project '{}'", self.code, project.get_name()),
        )
    }
}

// ---------------------------------------------------------------------------
// insert
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
pub struct InsertArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// Position to insert at (0-based; the observation count appends).
    pub index: usize,

    #[command(flatten)]
    pub observation: ObservationArgs,
}

impl InsertArgs {
    pub fn run(self) -> Result<()> {
        let mut project = self.document.load()?;
        project
            .insert_observation(self.observation.build(), self.index)
            .with_context(|| {
                format!(
                    "failed to insert '{}' at index {}",
                    self.observation.code, self.index
                )
            })?;

        self.document.store(
            &project,
            &format!(
                "Inserted '{}' at index {} in project '{}'",
                self.observation.code,
                self.index,
                project.get_name()
            ),
        )
    }
}

// ---------------------------------------------------------------------------
// remove
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
pub struct RemoveArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// Position of the observation to remove (0-based).
    pub index: usize,
}

impl RemoveArgs {
    pub fn run(self) -> Result<()> {
        let mut project = self.document.load()?;
        let removed = project
            .remove_observation(self.index)
            .with_context(|| format!("failed to remove index {}", self.index))?;

        self.document.store(
            &project,
            &format!(
                "Removed '{}' from project '{}'",
                removed.code(),
                project.get_name()
            ),
        )
    }
}

// ---------------------------------------------------------------------------
// set
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
pub struct SetArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// Position of the observation to replace (0-based).
    pub index: usize,

    #[command(flatten)]
    pub observation: ObservationArgs,
}

impl SetArgs {
    pub fn run(self) -> Result<()> {
        let mut project = self.document.load()?;
        let previous = project
            .set_observation(self.observation.build(), self.index)
            .with_context(|| {
                format!(
                    "failed to set '{}' at index {}",
                    self.observation.code, self.index
                )
            })?;

        self.document.store(
            &project,
            &format!(
                "Replaced '{}' with '{}' at index {}",
                previous.code(),
                self.observation.code,
                self.index
            ),
        )
    }
}

// ---------------------------------------------------------------------------
// rename
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
pub struct RenameArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// New project name.
    pub name: String,
}

impl RenameArgs {
    pub fn run(self) -> Result<()> {
        let mut project = self.document.load()?;
        let previous = project.get_name().clone();
        project
            .set_name(self.name.as_str())
            .with_context(|| format!("failed to rename project '{previous}'"))?;

        self.document.store(
            &project,
            &format!("Renamed project '{}' to '{}'", previous, project.get_name()),
        )
    }
}
