use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One recorded purchased-material line item. `quantity` is free text and
/// may embed units ("10 m²"); `amount` is whole currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialEntry {
    pub id: String,
    pub date: NaiveDate,
    pub name: String,
    pub quantity: String,
    pub amount: f64,
}

impl MaterialEntry {
    /// A fresh line item for today with no name and a zero amount.
    pub fn blank() -> Self {
        Self {
            id: super::new_id(),
            date: super::today(),
            name: String::new(),
            quantity: String::new(),
            amount: 0.0,
        }
    }
}
