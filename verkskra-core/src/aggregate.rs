//! Pure derived views over a project: totals, date sorting and grouping.

use chrono::NaiveDate;

use crate::domain::{MaterialEntry, Project, WorkEntry};

/// Derived totals for a project. Never stored; recomputed on read.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_hours: f64,
    pub total_materials: f64,
    pub labor_cost: f64,
    pub total_cost: f64,
}

/// Compute the derived totals for a project.
pub fn summarize(project: &Project) -> Summary {
    let total_hours: f64 = project.work_entries.iter().map(|e| e.hours).sum();
    let total_materials: f64 = project.materials.iter().map(|m| m.amount).sum();
    let labor_cost = total_hours * project.hourly_rate;
    Summary {
        total_hours,
        total_materials,
        labor_cost,
        total_cost: labor_cost + total_materials,
    }
}

/// Anything carrying a calendar date.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for WorkEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for MaterialEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Bucket ordering for [`group_by_date`]. The detail view and the invoice
/// disagree on it, so the caller picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    /// Oldest group first (invoice layout).
    Ascending,
    /// Newest group first (detail view).
    Descending,
}

/// Stable ascending sort by calendar date; entries sharing a date keep
/// their relative order.
pub fn sort_by_date<E: Dated + Clone>(entries: &[E]) -> Vec<E> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|e| e.date());
    sorted
}

/// Partition entries into per-date buckets. Each bucket preserves the
/// insertion order of its entries.
pub fn group_by_date<E: Dated + Clone>(
    entries: &[E],
    order: DateOrder,
) -> Vec<(NaiveDate, Vec<E>)> {
    let mut groups: Vec<(NaiveDate, Vec<E>)> = Vec::new();
    for entry in entries {
        match groups.iter_mut().find(|(date, _)| *date == entry.date()) {
            Some((_, bucket)) => bucket.push(entry.clone()),
            None => groups.push((entry.date(), vec![entry.clone()])),
        }
    }
    match order {
        DateOrder::Ascending => groups.sort_by_key(|(date, _)| *date),
        DateOrder::Descending => groups.sort_by_key(|(date, _)| std::cmp::Reverse(*date)),
    }
    groups
}

/// Per-day summed work hours, oldest day first. Used for the invoice,
/// which lists one line per day rather than one per session.
pub fn daily_work_hours(entries: &[WorkEntry]) -> Vec<(NaiveDate, f64)> {
    let mut totals: Vec<(NaiveDate, f64)> = Vec::new();
    for entry in entries {
        match totals.iter_mut().find(|(date, _)| *date == entry.date) {
            Some((_, hours)) => *hours += entry.hours,
            None => totals.push((entry.date, entry.hours)),
        }
    }
    totals.sort_by_key(|(date, _)| *date);
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProjectDraft;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, day).unwrap()
    }

    fn work(day: u32, hours: f64) -> WorkEntry {
        let mut entry = WorkEntry::blank();
        entry.date = date(day);
        entry.hours = hours;
        entry
    }

    fn material(day: u32, amount: f64) -> MaterialEntry {
        let mut entry = MaterialEntry::blank();
        entry.date = date(day);
        entry.amount = amount;
        entry
    }

    #[test]
    fn summary_totals_hold_their_identities() {
        let mut project = Project::from_draft(ProjectDraft {
            client: "Jónína".to_string(),
            hourly_rate: 3500.0,
            ..Default::default()
        });
        project.work_entries = vec![work(1, 8.5), work(2, 2.25)];
        project.materials = vec![material(1, 12_000.0), material(3, 500.0)];

        let summary = summarize(&project);
        assert!((summary.total_hours - 10.75).abs() < 1e-9);
        assert!((summary.total_materials - 12_500.0).abs() < 1e-9);
        assert!((summary.labor_cost - summary.total_hours * project.hourly_rate).abs() < 1e-9);
        assert!((summary.total_cost - (summary.labor_cost + summary.total_materials)).abs() < 1e-9);
    }

    #[test]
    fn empty_project_summarizes_to_zero() {
        let project = Project::from_draft(ProjectDraft {
            name: "Tómt".to_string(),
            hourly_rate: 3500.0,
            ..Default::default()
        });
        let summary = summarize(&project);
        assert_eq!(summary.total_hours, 0.0);
        assert_eq!(summary.total_cost, 0.0);
    }

    #[test]
    fn sort_by_date_is_stable() {
        let first = work(5, 1.0);
        let second = work(5, 2.0);
        let earlier = work(1, 3.0);
        let sorted = sort_by_date(&[first.clone(), second.clone(), earlier.clone()]);
        assert_eq!(sorted[0].id, earlier.id);
        assert_eq!(sorted[1].id, first.id);
        assert_eq!(sorted[2].id, second.id);
    }

    #[test]
    fn grouping_preserves_insertion_order_within_a_bucket() {
        let a = work(3, 1.0);
        let b = work(1, 2.0);
        let c = work(3, 3.0);
        let groups = group_by_date(&[a.clone(), b.clone(), c.clone()], DateOrder::Ascending);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, date(1));
        assert_eq!(groups[1].0, date(3));
        assert_eq!(groups[1].1[0].id, a.id);
        assert_eq!(groups[1].1[1].id, c.id);
    }

    #[test]
    fn descending_order_puts_newest_group_first() {
        let groups = group_by_date(&[work(1, 1.0), work(9, 1.0)], DateOrder::Descending);
        assert_eq!(groups[0].0, date(9));
        assert_eq!(groups[1].0, date(1));
    }

    #[test]
    fn daily_hours_sum_entries_sharing_a_date() {
        let totals = daily_work_hours(&[work(1, 3.0), work(1, 5.0)]);
        assert_eq!(totals, vec![(date(1), 8.0)]);
    }

    #[test]
    fn daily_hours_are_ordered_oldest_first() {
        let totals = daily_work_hours(&[work(9, 2.0), work(1, 4.0)]);
        assert_eq!(totals, vec![(date(1), 4.0), (date(9), 2.0)]);
    }
}
