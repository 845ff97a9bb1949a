use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "verkskra")]
#[command(about = "Project ledger for work hours, materials and invoices")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List projects, newest first
    List,
    /// Create a new project
    New(NewProject),
    /// Show one project with entries grouped by day
    Show {
        /// Project id (a unique prefix works) or exact name
        project: String,
    },
    /// Edit project fields
    Edit(EditProject),
    /// Delete a project and everything it owns
    Delete {
        project: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Work session entries
    #[command(subcommand)]
    Work(WorkCommands),
    /// Material entries
    #[command(subcommand)]
    Material(MaterialCommands),
    /// Import a JSON payload into a project
    Import {
        project: String,
        /// Payload file; read from stdin when omitted
        file: Option<PathBuf>,
    },
    /// Render the printable invoice
    Invoice {
        project: String,
        /// Read the shared spreadsheet snapshot instead of local data
        #[arg(long)]
        remote: bool,
    },
    /// Mirror the full local collection to the spreadsheet
    Push,
    /// Replace local data with the spreadsheet snapshot
    Pull,
    /// Print config path and create default file if missing
    ConfigPath,
}

#[derive(Debug, Args)]
pub struct NewProject {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub client: String,
    #[arg(long, default_value = "")]
    pub address: String,
    /// Hourly rate in whole kronur
    #[arg(long, default_value_t = 0.0)]
    pub rate: f64,
}

#[derive(Debug, Args)]
pub struct EditProject {
    pub project: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub client: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub rate: Option<f64>,
}

#[derive(Debug, Subcommand)]
pub enum WorkCommands {
    /// Add a blank work session (today, no times)
    Add { project: String },
    /// Update fields of a work session
    Set(SetWork),
    /// Remove a work session
    Rm { project: String, entry: String },
}

#[derive(Debug, Args)]
pub struct SetWork {
    pub project: String,
    pub entry: String,
    /// Calendar date, YYYY-MM-DD
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Start time HH:MM; an empty string clears it
    #[arg(long)]
    pub start: Option<String>,
    /// End time HH:MM; an empty string clears it
    #[arg(long)]
    pub end: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum MaterialCommands {
    /// Add a blank material line (today, zero amount)
    Add { project: String },
    /// Update fields of a material line
    Set(SetMaterial),
    /// Remove a material line
    Rm { project: String, material: String },
}

#[derive(Debug, Args)]
pub struct SetMaterial {
    pub project: String,
    pub material: String,
    /// Calendar date, YYYY-MM-DD
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub name: Option<String>,
    /// Free-text quantity, units welcome ("10 m²")
    #[arg(long)]
    pub quantity: Option<String>,
    /// Price in whole kronur; anything unparseable counts as 0
    #[arg(long)]
    pub amount: Option<String>,
}
