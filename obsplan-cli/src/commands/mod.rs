//! Subcommands and the document I/O they share.

pub mod edit;
pub mod new;
pub mod show;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use obsplan_core::{
    document::{decode_project, encode_project},
    DocumentFormat, Observation, ObservationType, Project,
};

/// The document an editing command reads and where its result goes.
#[derive(Args, Debug)]
pub struct DocumentArgs {
    /// Project document (JSON, or YAML for .yaml/.yml).
    pub file: PathBuf,

    /// Rewrite FILE instead of printing the updated document.
    #[arg(long, short = 'i')]
    pub in_place: bool,

    /// Output encoding: json | yaml. Defaults to the format of FILE.
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<DocumentFormat>,
}

impl DocumentArgs {
    pub fn load(&self) -> Result<Project> {
        read_project(&self.file)
    }

    /// Writes `project` back to FILE (`--in-place`) or prints it. `done` is
    /// reported only for in-place edits so stdout stays a clean document.
    pub fn store(&self, project: &Project, done: &str) -> Result<()> {
        let format = self.output_format()?;
        if self.in_place {
            write_project(&self.file, project, format)?;
            println!("✓ {done}");
        } else {
            print!("{}", encode_project(project, format)?);
        }
        Ok(())
    }

    /// FILE is always read by its extension, so an in-place rewrite must keep
    /// that encoding.
    fn output_format(&self) -> Result<DocumentFormat> {
        let native = DocumentFormat::from_path(&self.file);
        match self.format {
            Some(requested) if self.in_place && requested != native => bail!(
                "cannot rewrite '{}' as {requested}: its extension makes it a {native} document",
                self.file.display()
            ),
            Some(requested) => Ok(requested),
            None => Ok(native),
        }
    }
}

/// Options of an observation given on the command line.
#[derive(Args, Debug)]
pub struct ObservationFlags {
    /// Create the observation deactivated.
    #[arg(long)]
    pub inactive: bool,

    /// Observing mode: vlbi | single-dish. Defaults to vlbi.
    #[arg(long = "type", short = 't', value_name = "TYPE")]
    pub observation_type: Option<ObservationType>,
}

impl ObservationFlags {
    pub fn build(&self, code: &str) -> Observation {
        Observation::new(code, !self.inactive).with_type(self.observation_type.unwrap_or_default())
    }
}

/// A required observation code plus its options.
#[derive(Args, Debug)]
pub struct ObservationArgs {
    /// Observation code (e.g. "OBS1").
    pub code: String,

    #[command(flatten)]
    pub flags: ObservationFlags,
}

impl ObservationArgs {
    pub fn build(&self) -> Observation {
        self.flags.build(&self.code)
    }
}

pub fn read_project(path: &Path) -> Result<Project> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read project document '{}'", path.display()))?;
    decode_project(&text, DocumentFormat::from_path(path))
        .with_context(|| format!("failed to load project from '{}'", path.display()))
}

/// Atomic write: encode → `<file>.tmp` sibling → `rename`.
pub fn write_project(path: &Path, project: &Project, format: DocumentFormat) -> Result<()> {
    let text = encode_project(project, format)?;
    let mut tmp_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    std::fs::write(&tmp_path, text)
        .with_context(|| format!("cannot write '{}'", tmp_path.display()))?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e).with_context(|| format!("cannot replace '{}'", path.display()));
    }
    tracing::debug!(path = %path.display(), %format, "wrote project document");
    Ok(())
}
