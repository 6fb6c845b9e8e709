//! `obsplan new [NAME] [--code CODE]... [--output PATH]`

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use obsplan_core::{document::encode_project, DocumentFormat, Project, DEFAULT_PROJECT_NAME};

use super::write_project;

/// Create a new project document.
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Project name.
    #[arg(default_value = DEFAULT_PROJECT_NAME)]
    pub name: String,

    /// Create an active observation with this code (repeatable, kept in order).
    #[arg(long = "code", short = 'c', value_name = "CODE")]
    pub codes: Vec<String>,

    /// Write the document here instead of stdout. Refuses to overwrite.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Output encoding: json | yaml. Defaults to the extension of --output, else json.
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<DocumentFormat>,
}

impl NewArgs {
    pub fn run(self) -> Result<()> {
        let mut project: Project = Project::named(self.name.as_str())
            .with_context(|| format!("cannot create project '{}'", self.name))?;
        for code in &self.codes {
            project
                .create_observation(code, true)
                .with_context(|| format!("cannot create observation '{code}'"))?;
        }

        match &self.output {
            Some(path) => {
                if path.exists() {
                    bail!("'{}' already exists; edit it with `obsplan add`", path.display());
                }
                let format = self.format.unwrap_or_else(|| DocumentFormat::from_path(path));
                write_project(path, &project, format)?;
                println!("✓ Created {project} at {}", path.display());
            }
            None => print!("{}", encode_project(&project, self.format.unwrap_or_default())?),
        }
        Ok(())
    }
}
