mod cli;
mod commands;
mod config;
mod mirror;
mod render;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use verkskra_core::storage::JsonFileStorage;
use verkskra_core::store::Ledger;
use verkskra_core::sync::{NoSync, SyncPort};

use cli::{Cli, Commands, MaterialCommands, WorkCommands};
use config::VerkskraConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = VerkskraConfig::load()?;

    let storage = JsonFileStorage::new(JsonFileStorage::default_path()?);
    let mut ledger = Ledger::open(Box::new(storage));

    let sync: Box<dyn SyncPort> = match commands::read_client(&config) {
        Some(client) => Box::new(mirror::RemoteMirror::new(client)),
        None => Box::new(NoSync),
    };

    match cli.command {
        Commands::List => commands::list(&ledger),
        Commands::New(args) => commands::new_project(&mut ledger, sync.as_ref(), args).await?,
        Commands::Show { project } => commands::show(&ledger, &project)?,
        Commands::Edit(args) => commands::edit(&mut ledger, sync.as_ref(), args).await?,
        Commands::Delete { project, yes } => {
            commands::delete(&mut ledger, sync.as_ref(), &project, yes).await?
        }
        Commands::Work(command) => match command {
            WorkCommands::Add { project } => {
                commands::work_add(&mut ledger, sync.as_ref(), &project).await?
            }
            WorkCommands::Set(args) => {
                commands::work_set(&mut ledger, sync.as_ref(), args).await?
            }
            WorkCommands::Rm { project, entry } => {
                commands::work_rm(&mut ledger, sync.as_ref(), &project, &entry).await?
            }
        },
        Commands::Material(command) => match command {
            MaterialCommands::Add { project } => {
                commands::material_add(&mut ledger, sync.as_ref(), &project).await?
            }
            MaterialCommands::Set(args) => {
                commands::material_set(&mut ledger, sync.as_ref(), args).await?
            }
            MaterialCommands::Rm { project, material } => {
                commands::material_rm(&mut ledger, sync.as_ref(), &project, &material).await?
            }
        },
        Commands::Import { project, file } => {
            commands::import(&mut ledger, sync.as_ref(), &project, file).await?
        }
        Commands::Invoice { project, remote } => {
            commands::invoice(&ledger, &config, &project, remote).await?
        }
        Commands::Push => commands::push(&ledger, sync.as_ref(), &config).await?,
        Commands::Pull => commands::pull(&mut ledger, &config).await?,
        Commands::ConfigPath => commands::config_path()?,
    }

    Ok(())
}
