mod material;
mod project;
mod work_entry;

pub use material::*;
pub use project::*;
pub use work_entry::*;

/// Generate an opaque client-side identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
