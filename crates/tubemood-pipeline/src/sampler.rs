//! Bounded random sampling of fetched comments.

use rand::seq::index;
use rand::Rng;

/// Keep at most `k` items, chosen uniformly without replacement.
///
/// Inputs of `k` items or fewer come back unchanged. Larger inputs yield
/// exactly `k` distinct items in random order.
pub fn sample<T>(items: Vec<T>, k: usize) -> Vec<T> {
    sample_with_rng(items, k, &mut rand::rng())
}

/// [`sample`] with a caller-supplied RNG.
pub fn sample_with_rng<T, R: Rng + ?Sized>(items: Vec<T>, k: usize, rng: &mut R) -> Vec<T> {
    if items.len() <= k {
        return items;
    }

    let picked = index::sample(rng, items.len(), k);
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    picked
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect()
}
