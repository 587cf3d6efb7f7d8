//! Bounded random sampling of column values.

use rand::Rng;
use rand::seq::{IndexedRandom, index};

/// Draw between `min_items` and `max_items` values (inclusive).
///
/// When the column holds at least as many values as requested the result is
/// a uniformly shuffled selection without repeats. A smaller, non-empty
/// column is sampled with replacement so the requested size is still met.
pub fn sample<R: Rng + ?Sized>(
    rng: &mut R,
    values: &[String],
    min_items: usize,
    max_items: usize,
) -> Vec<String> {
    let (low, high) = (min_items.min(max_items), min_items.max(max_items));
    let n = rng.random_range(low..=high);

    if values.is_empty() {
        return Vec::new();
    }

    if values.len() >= n {
        index::sample(rng, values.len(), n)
            .into_iter()
            .map(|i| values[i].clone())
            .collect()
    } else {
        (0..n)
            .filter_map(|_| values.choose(rng).cloned())
            .collect()
    }
}
