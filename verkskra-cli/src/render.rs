//! Terminal rendering: the project list table, the detail view, and the
//! printable invoice. The invoice is the artifact shared with clients and
//! stays in Icelandic.

use comfy_table::Table;
use sheetsync::AllData;
use verkskra_core::aggregate::{
    daily_work_hours, group_by_date, sort_by_date, summarize, DateOrder, Summary,
};
use verkskra_core::domain::{MaterialEntry, Project, WorkEntry};
use verkskra_core::format::{format_currency, format_date, format_time};

/// Everything the invoice needs, whether sourced from the local ledger or
/// from the collaborator's snapshot.
pub struct InvoiceView {
    pub name: String,
    pub client: String,
    pub address: String,
    pub hourly_rate: f64,
    pub work_entries: Vec<WorkEntry>,
    pub materials: Vec<MaterialEntry>,
    pub summary: Summary,
}

impl InvoiceView {
    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            client: project.client.clone(),
            address: project.address.clone(),
            hourly_rate: project.hourly_rate,
            work_entries: project.work_entries.clone(),
            materials: project.materials.clone(),
            summary: summarize(project),
        }
    }

    /// Build the shared read-only view from the remote snapshot.
    pub fn from_snapshot(data: &AllData, project_id: &str) -> Option<Self> {
        crate::mirror::projects_from_snapshot(data)
            .into_iter()
            .find(|p| p.id == project_id)
            .map(|p| Self::from_project(&p))
    }
}

pub fn project_table(projects: &[&Project]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Client", "Hours", "Total"]);
    for project in projects {
        let summary = summarize(project);
        let display_name = if project.name.is_empty() {
            &project.client
        } else {
            &project.name
        };
        table.add_row(vec![
            short_id(&project.id),
            display_name.to_string(),
            project.client.clone(),
            format!("{} klst", summary.total_hours),
            format_currency(summary.total_cost),
        ]);
    }
    table
}

/// Detail view: summary line plus entries grouped by day, newest group
/// first.
pub fn render_detail(project: &Project) -> String {
    let summary = summarize(project);
    let mut out = String::new();

    let title = if project.name.is_empty() {
        &project.client
    } else {
        &project.name
    };
    out.push_str(&format!("{}  [{}]\n", title, short_id(&project.id)));
    if !project.client.is_empty() || !project.address.is_empty() {
        out.push_str(&format!("{} - {}\n", project.client, project.address));
    }
    out.push_str(&format!(
        "Tímagjald: {}/klst\n\n",
        format_currency(project.hourly_rate)
    ));
    out.push_str(&format!(
        "Vinnustundir: {} klst   Laun: {}   Efni: {}   Samtals: {}\n\n",
        summary.total_hours,
        format_currency(summary.labor_cost),
        format_currency(summary.total_materials),
        format_currency(summary.total_cost),
    ));

    out.push_str("VINNUSTUNDIR\n");
    if project.work_entries.is_empty() {
        out.push_str("  Engar vinnustundir skráðar\n");
    } else {
        for (date, entries) in group_by_date(&project.work_entries, DateOrder::Descending) {
            let day_total: f64 = entries.iter().map(|e| e.hours).sum();
            out.push_str(&format!("{}  ({} klst)\n", format_date(date), day_total));
            for entry in entries {
                out.push_str(&format!(
                    "  [{}] {}-{}  {} klst  {}\n",
                    short_id(&entry.id),
                    format_time(entry.start),
                    format_time(entry.end),
                    entry.hours,
                    entry.notes,
                ));
            }
        }
    }

    out.push_str("\nEFNI\n");
    if project.materials.is_empty() {
        out.push_str("  Ekkert efni skráð\n");
    } else {
        for (date, materials) in group_by_date(&project.materials, DateOrder::Descending) {
            let day_total: f64 = materials.iter().map(|m| m.amount).sum();
            out.push_str(&format!(
                "{}  ({})\n",
                format_date(date),
                format_currency(day_total)
            ));
            for material in materials {
                out.push_str(&format!(
                    "  [{}] {} {}  {}\n",
                    short_id(&material.id),
                    material.name,
                    quantity_label(&material.quantity),
                    format_currency(material.amount),
                ));
            }
        }
    }
    out
}

/// Printable invoice: one line per worked day, materials oldest first,
/// totals in the fixed currency format.
pub fn render_invoice(view: &InvoiceView) -> String {
    let mut out = String::new();
    out.push_str("REIKNINGUR\n");
    out.push_str("==========\n\n");

    let name = if view.name.is_empty() { "-" } else { &view.name };
    out.push_str(&format!("Verkefni:        {}\n", name));
    out.push_str(&format!("Viðskiptavinur:  {}\n", view.client));
    out.push_str(&format!("Heimilisfang:    {}\n\n", view.address));

    out.push_str("VINNUSTUNDIR\n");
    if view.work_entries.is_empty() {
        out.push_str("Engar vinnustundir skráðar\n");
    } else {
        for (date, hours) in daily_work_hours(&view.work_entries) {
            out.push_str(&line(&format_date(date), "", &format!("{} klst", hours)));
        }
    }
    out.push_str(&line(
        &format!(
            "Samtals: {} klst ({}/klst)",
            view.summary.total_hours,
            format_currency(view.hourly_rate)
        ),
        "",
        &format_currency(view.summary.labor_cost),
    ));
    out.push('\n');

    out.push_str("EFNI\n");
    if view.materials.is_empty() {
        out.push_str("Ekkert efni skráð\n");
    } else {
        for material in sort_by_date(&view.materials) {
            out.push_str(&line(
                &format_date(material.date),
                &format!("{} {}", material.name, quantity_label(&material.quantity)),
                &format_currency(material.amount),
            ));
        }
    }
    out.push_str(&line(
        "Samtals efni",
        "",
        &format_currency(view.summary.total_materials),
    ));
    out.push('\n');

    out.push_str("HEILDARUPPHÆÐ\n");
    out.push_str(&format!("{}\n", format_currency(view.summary.total_cost)));
    out
}

pub fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

fn quantity_label(quantity: &str) -> String {
    if quantity.is_empty() {
        String::new()
    } else {
        format!("({})", quantity)
    }
}

fn line(left: &str, middle: &str, right: &str) -> String {
    let label = if middle.is_empty() {
        left.to_string()
    } else {
        format!("{}  {}", left, middle.trim_end())
    };
    format!("{:<46}{:>14}\n", label, right)
}
