//! Fixed is-IS presentation rules. The grouping and suffix are part of the
//! shared invoice contract, so they live with the engine rather than in
//! the front end.

use chrono::{NaiveDate, NaiveTime};

/// Whole-unit currency with `.`-grouped thousands and the `kr` suffix:
/// `1234567` becomes `"1.234.567 kr"`.
pub fn format_currency(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if whole < 0 {
        format!("-{} kr", grouped)
    } else {
        format!("{} kr", grouped)
    }
}

/// `dd.mm.yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// `HH:MM`, with a placeholder for a time that was never recorded.
pub fn format_time(time: Option<NaiveTime>) -> String {
    match time {
        Some(t) => t.format("%H:%M").to_string(),
        None => "--:--".to_string(),
    }
}
