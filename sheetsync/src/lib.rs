mod client;
mod records;
mod script_url;

pub use client::*;
pub use records::*;
pub use script_url::*;
