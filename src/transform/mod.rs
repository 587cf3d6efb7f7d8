//! Post-processing applied to a raw sample before it reaches a section.

mod append;
mod typos;

pub use append::append_decorate;
pub use typos::inject_typos;
