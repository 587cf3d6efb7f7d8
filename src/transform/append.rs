//! Appender decoration: one extra word tacked onto each sampled item.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::section::SectionId;

/// Append a randomly chosen appender word to every item (`"item word"`).
///
/// Sections whose output must stay a clean list (see
/// [`SectionId::accepts_appender`]) get their items back untouched, as do
/// items paired with an empty appender column.
pub fn append_decorate<R: Rng + ?Sized>(
    rng: &mut R,
    section: SectionId,
    items: Vec<String>,
    appender_values: &[String],
) -> Vec<String> {
    if !section.accepts_appender() || appender_values.is_empty() {
        return items;
    }

    items
        .into_iter()
        .map(|item| match appender_values.choose(rng) {
            Some(word) => format!("{item} {word}"),
            None => item,
        })
        .collect()
}
