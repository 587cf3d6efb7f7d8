//! Terminal presentation: status lines, panels, tables and prompts.

pub mod panel;
pub mod prompt;
mod spinner;
pub mod status;
mod table;

pub use spinner::Spinner;
pub use status::StatusLine;
pub use table::Table;
