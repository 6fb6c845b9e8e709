//! `obsplan show <FILE> [--index N] [--json]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use obsplan_core::{Observation, ObservationRecord, Project};

use super::read_project;

/// Print a project summary and its observations.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Project document (JSON, or YAML for .yaml/.yml).
    pub file: PathBuf,

    /// Show only the observation at this position (0-based).
    #[arg(long)]
    pub index: Option<usize>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct ObservationRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "CODE")]
    code: String,
    #[tabled(rename = "TYPE")]
    observation_type: String,
    #[tabled(rename = "ACTIVE")]
    active: String,
    #[tabled(rename = "CALCULATED")]
    calculated: usize,
}

impl ObservationRow {
    fn new(index: usize, observation: &Observation) -> Self {
        Self {
            index,
            code: observation.code().to_owned(),
            observation_type: observation.observation_type().to_string(),
            active: if observation.is_active() { "yes" } else { "no" }.to_owned(),
            calculated: observation.calculated_data_len(),
        }
    }
}

impl ShowArgs {
    pub fn run(self) -> Result<()> {
        let project = read_project(&self.file)?;

        if let Some(index) = self.index {
            let observation = project
                .get_by_index(index)
                .with_context(|| format!("cannot show index {index}"))?;
            if self.json {
                println!("{}", serde_json::to_string_pretty(&observation.to_value())?);
            } else {
                println!("{observation}");
            }
            return Ok(());
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&project.to_value())?);
            return Ok(());
        }

        print_table(&project);
        Ok(())
    }
}

fn print_table(project: &Project) {
    let active = project.iter().filter(|o| o.is_active()).count();
    println!(
        "{} | {} observations | {} active",
        project.get_name().to_string().bold(),
        project.len(),
        active.to_string().green(),
    );

    if project.is_empty() {
        println!("No observations.");
        return;
    }

    let rows: Vec<ObservationRow> = project
        .iter()
        .enumerate()
        .map(|(index, observation)| ObservationRow::new(index, observation))
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}
