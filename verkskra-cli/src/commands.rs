//! Command handlers: mutate the ledger first, then mirror the change
//! best-effort. The mirror outcome never changes what already happened
//! locally.

use std::io::Read;

use anyhow::{bail, Context, Result};
use chrono::NaiveTime;
use inquire::Confirm;
use sheetsync::{ScriptUrl, SheetsClient};
use verkskra_core::domain::{Project, ProjectDraft, ProjectPatch};
use verkskra_core::hours::parse_hhmm;
use verkskra_core::import::parse_import;
use verkskra_core::store::{Ledger, MaterialUpdate, WorkEntryUpdate};
use verkskra_core::sync::SyncPort;

use crate::cli::{EditProject, NewProject, SetMaterial, SetWork};
use crate::config::VerkskraConfig;
use crate::mirror;
use crate::render::{self, InvoiceView};

/// Client for reads against the spreadsheet (`pull`, remote invoice).
/// `None` when syncing is disabled or no URL is configured.
pub fn read_client(config: &VerkskraConfig) -> Option<SheetsClient> {
    if !config.sync_enabled {
        return None;
    }
    let url = config.effective_script_url()?;
    Some(SheetsClient::new(ScriptUrl::new(url)))
}

pub fn list(ledger: &Ledger) {
    if ledger.projects().is_empty() {
        println!("Engin verkefni skráð");
        return;
    }
    let mut projects: Vec<&Project> = ledger.projects().iter().collect();
    projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    println!("{}", render::project_table(&projects));
}

pub async fn new_project(
    ledger: &mut Ledger,
    sync: &dyn SyncPort,
    args: NewProject,
) -> Result<()> {
    let project = ledger.add_project(ProjectDraft {
        name: args.name,
        client: args.client,
        address: args.address,
        hourly_rate: args.rate,
    })?;
    sync.save_project(&project).await;
    println!("Created project [{}]", render::short_id(&project.id));
    Ok(())
}

pub fn show(ledger: &Ledger, key: &str) -> Result<()> {
    let id = resolve_project_id(ledger, key)?;
    let project = ledger.project(&id).context("project vanished mid-command")?;
    print!("{}", render::render_detail(project));
    Ok(())
}

pub async fn edit(ledger: &mut Ledger, sync: &dyn SyncPort, args: EditProject) -> Result<()> {
    let id = resolve_project_id(ledger, &args.project)?;
    let patch = ProjectPatch {
        name: args.name,
        client: args.client,
        address: args.address,
        hourly_rate: args.rate,
    };
    if let Some(updated) = ledger.update_project(&id, patch) {
        sync.update_project(&updated).await;
        println!("Updated project [{}]", render::short_id(&updated.id));
    }
    Ok(())
}

pub async fn delete(
    ledger: &mut Ledger,
    sync: &dyn SyncPort,
    key: &str,
    skip_prompt: bool,
) -> Result<()> {
    let id = resolve_project_id(ledger, key)?;
    if !skip_prompt {
        let confirmed = Confirm::new("Eyða verkefni?").with_default(false).prompt()?;
        if !confirmed {
            return Ok(());
        }
    }

    let Some(project) = ledger.delete_project(&id) else {
        return Ok(());
    };
    // Entries first, then the project itself, matching the remote's
    // expectations about orphan rows.
    for entry in &project.work_entries {
        sync.delete_work_entry(&entry.id).await;
    }
    for material in &project.materials {
        sync.delete_material(&material.id).await;
    }
    sync.delete_project(&project.id).await;
    println!("Deleted project [{}]", render::short_id(&project.id));
    Ok(())
}

pub async fn work_add(ledger: &mut Ledger, sync: &dyn SyncPort, key: &str) -> Result<()> {
    let id = resolve_project_id(ledger, key)?;
    if let Some(entry) = ledger.add_work_entry(&id) {
        sync.save_work_entry(&id, &entry).await;
        println!("Added work entry [{}]", render::short_id(&entry.id));
    }
    Ok(())
}

pub async fn work_set(ledger: &mut Ledger, sync: &dyn SyncPort, args: SetWork) -> Result<()> {
    let project_id = resolve_project_id(ledger, &args.project)?;
    let entry_id = resolve_work_entry_id(ledger, &project_id, &args.entry)?;

    let mut updated = None;
    if let Some(date) = args.date {
        updated = ledger.update_work_entry(&project_id, &entry_id, WorkEntryUpdate::Date(date));
    }
    if let Some(raw) = args.start {
        let start = parse_time_flag(&raw)?;
        updated = ledger.update_work_entry(&project_id, &entry_id, WorkEntryUpdate::Start(start));
    }
    if let Some(raw) = args.end {
        let end = parse_time_flag(&raw)?;
        updated = ledger.update_work_entry(&project_id, &entry_id, WorkEntryUpdate::End(end));
    }
    if let Some(notes) = args.notes {
        updated = ledger.update_work_entry(&project_id, &entry_id, WorkEntryUpdate::Notes(notes));
    }

    let Some(entry) = updated else {
        bail!("nothing to update; pass at least one of --date/--start/--end/--notes");
    };
    sync.save_work_entry(&project_id, &entry).await;
    println!("{} {} klst", render::short_id(&entry.id), entry.hours);
    Ok(())
}

pub async fn work_rm(
    ledger: &mut Ledger,
    sync: &dyn SyncPort,
    key: &str,
    entry_key: &str,
) -> Result<()> {
    let project_id = resolve_project_id(ledger, key)?;
    let entry_id = resolve_work_entry_id(ledger, &project_id, entry_key)?;
    if ledger.delete_work_entry(&project_id, &entry_id) {
        sync.delete_work_entry(&entry_id).await;
        println!("Removed work entry [{}]", render::short_id(&entry_id));
    }
    Ok(())
}

pub async fn material_add(ledger: &mut Ledger, sync: &dyn SyncPort, key: &str) -> Result<()> {
    let id = resolve_project_id(ledger, key)?;
    if let Some(material) = ledger.add_material(&id) {
        sync.save_material(&id, &material).await;
        println!("Added material [{}]", render::short_id(&material.id));
    }
    Ok(())
}

pub async fn material_set(
    ledger: &mut Ledger,
    sync: &dyn SyncPort,
    args: SetMaterial,
) -> Result<()> {
    let project_id = resolve_project_id(ledger, &args.project)?;
    let material_id = resolve_material_id(ledger, &project_id, &args.material)?;

    let mut updated = None;
    if let Some(date) = args.date {
        updated = ledger.update_material(&project_id, &material_id, MaterialUpdate::Date(date));
    }
    if let Some(name) = args.name {
        updated = ledger.update_material(&project_id, &material_id, MaterialUpdate::Name(name));
    }
    if let Some(quantity) = args.quantity {
        updated =
            ledger.update_material(&project_id, &material_id, MaterialUpdate::Quantity(quantity));
    }
    if let Some(amount) = args.amount {
        updated =
            ledger.update_material(&project_id, &material_id, MaterialUpdate::Amount(amount));
    }

    let Some(material) = updated else {
        bail!("nothing to update; pass at least one of --date/--name/--quantity/--amount");
    };
    sync.save_material(&project_id, &material).await;
    println!(
        "{} {}",
        render::short_id(&material.id),
        verkskra_core::format::format_currency(material.amount)
    );
    Ok(())
}

pub async fn material_rm(
    ledger: &mut Ledger,
    sync: &dyn SyncPort,
    key: &str,
    material_key: &str,
) -> Result<()> {
    let project_id = resolve_project_id(ledger, key)?;
    let material_id = resolve_material_id(ledger, &project_id, material_key)?;
    if ledger.delete_material(&project_id, &material_id) {
        sync.delete_material(&material_id).await;
        println!("Removed material [{}]", render::short_id(&material_id));
    }
    Ok(())
}

pub async fn import(
    ledger: &mut Ledger,
    sync: &dyn SyncPort,
    key: &str,
    file: Option<std::path::PathBuf>,
) -> Result<()> {
    let project_id = resolve_project_id(ledger, key)?;

    let raw = match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read payload from stdin")?;
            buffer
        }
    };

    let batch = match parse_import(&raw) {
        Ok(batch) => batch,
        Err(e) => {
            tracing::debug!("import payload rejected: {e}");
            eprintln!("Villa í JSON sniði");
            return Ok(());
        }
    };

    ledger.import(&project_id, &batch);

    for material in &batch.materials {
        sync.save_material(&project_id, material).await;
    }
    for entry in &batch.work_entries {
        sync.save_work_entry(&project_id, entry).await;
    }
    println!(
        "Gögn flutt inn! ({} efni, {} vinnufærslur)",
        batch.materials.len(),
        batch.work_entries.len()
    );
    Ok(())
}

pub async fn invoice(
    ledger: &Ledger,
    config: &VerkskraConfig,
    key: &str,
    remote: bool,
) -> Result<()> {
    let view = if remote {
        let Some(client) = read_client(config) else {
            bail!("Gat ekki hlaðið gögnum");
        };
        let data = match client.get_all().await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("getAll failed: {e}");
                bail!("Gat ekki hlaðið gögnum");
            }
        };
        let project_id = resolve_snapshot_project_id(&data, key)?;
        InvoiceView::from_snapshot(&data, &project_id).context("Verkefni fannst ekki")?
    } else {
        let id = resolve_project_id(ledger, key)?;
        let project = ledger.project(&id).context("Verkefni fannst ekki")?;
        InvoiceView::from_project(project)
    };
    print!("{}", render::render_invoice(&view));
    Ok(())
}

/// Mirror the full local collection to the spreadsheet, one record at a
/// time in submission order: projects, then work entries, then materials.
pub async fn push(ledger: &Ledger, sync: &dyn SyncPort, config: &VerkskraConfig) -> Result<()> {
    if read_client(config).is_none() {
        println!("Sync is disabled; nothing to push.");
        return Ok(());
    }

    let mut saved = 0usize;
    for project in ledger.projects() {
        sync.save_project(project).await;
        saved += 1;
    }
    for project in ledger.projects() {
        for entry in &project.work_entries {
            sync.save_work_entry(&project.id, entry).await;
            saved += 1;
        }
    }
    for project in ledger.projects() {
        for material in &project.materials {
            sync.save_material(&project.id, material).await;
            saved += 1;
        }
    }
    println!("Pushed {} records.", saved);
    Ok(())
}

/// Replace the local ledger with the remote snapshot. An empty or
/// unavailable snapshot keeps the local data untouched.
pub async fn pull(ledger: &mut Ledger, config: &VerkskraConfig) -> Result<()> {
    let Some(client) = read_client(config) else {
        println!("Sync is disabled; nothing to pull.");
        return Ok(());
    };
    let data = match client.get_all().await {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!("getAll failed: {e}");
            bail!("Gat ekki hlaðið gögnum");
        }
    };
    if data.projects.is_empty() {
        println!("Remote snapshot is empty; keeping local data.");
        return Ok(());
    }
    let projects = mirror::projects_from_snapshot(&data);
    let count = projects.len();
    ledger.replace_all(projects);
    println!("Pulled {} projects.", count);
    Ok(())
}

pub fn config_path() -> Result<()> {
    let path = VerkskraConfig::config_path()?;
    if !path.exists() {
        VerkskraConfig::default().save()?;
        println!("Created default config at {}", path.display());
    } else {
        println!("{}", path.display());
    }
    Ok(())
}

fn parse_time_flag(raw: &str) -> Result<Option<NaiveTime>> {
    if raw.is_empty() {
        return Ok(None);
    }
    parse_hhmm(raw)
        .map(Some)
        .with_context(|| format!("'{raw}' is not a valid HH:MM time"))
}

fn resolve_project_id(ledger: &Ledger, key: &str) -> Result<String> {
    if let Some(project) = ledger.project(key) {
        return Ok(project.id.clone());
    }
    let mut matches = ledger
        .projects()
        .iter()
        .filter(|p| p.id.starts_with(key) || p.name == key || p.client == key);
    match (matches.next(), matches.next()) {
        (Some(project), None) => Ok(project.id.clone()),
        (Some(_), Some(_)) => bail!("'{key}' matches more than one project"),
        (None, _) => bail!("Verkefni fannst ekki"),
    }
}

fn resolve_snapshot_project_id(data: &sheetsync::AllData, key: &str) -> Result<String> {
    let mut matches = data
        .projects
        .iter()
        .filter(|p| p.id.starts_with(key) || p.name == key);
    match (matches.next(), matches.next()) {
        (Some(record), None) => Ok(record.id.clone()),
        (Some(_), Some(_)) => bail!("'{key}' matches more than one project"),
        (None, _) => bail!("Verkefni fannst ekki"),
    }
}

fn resolve_work_entry_id(ledger: &Ledger, project_id: &str, key: &str) -> Result<String> {
    let project = ledger.project(project_id).context("Verkefni fannst ekki")?;
    let mut matches = project
        .work_entries
        .iter()
        .filter(|e| e.id.starts_with(key));
    match (matches.next(), matches.next()) {
        (Some(entry), None) => Ok(entry.id.clone()),
        (Some(_), Some(_)) => bail!("'{key}' matches more than one work entry"),
        (None, _) => bail!("no work entry matches '{key}'"),
    }
}

fn resolve_material_id(ledger: &Ledger, project_id: &str, key: &str) -> Result<String> {
    let project = ledger.project(project_id).context("Verkefni fannst ekki")?;
    let mut matches = project.materials.iter().filter(|m| m.id.starts_with(key));
    match (matches.next(), matches.next()) {
        (Some(material), None) => Ok(material.id.clone()),
        (Some(_), Some(_)) => bail!("'{key}' matches more than one material"),
        (None, _) => bail!("no material matches '{key}'"),
    }
}
