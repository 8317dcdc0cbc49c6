//! Exact similarity over sorted inputs, for checking sketch estimates.
//!
//! Both functions walk the two inputs with a single merge, so they assume the
//! ordering contract of the sketches' inputs: ids ascending and distinct.

use std::cmp::Ordering;

/// Exact Jaccard similarity `|A ∩ B| / |A ∪ B|` of two sorted id sets.
///
/// Two empty sets are treated as identical (1.0).
pub fn jaccard(a: &[u32], b: &[u32]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let (mut i, mut j, mut intersection) = (0, 0, 0usize);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Equal => {
                intersection += 1;
                i += 1;
                j += 1;
            }
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
        }
    }
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

/// Exact inner product of two sparse `(id, value)` vectors sorted by id.
pub fn sparse_dot(a: &[(u32, f64)], b: &[(u32, f64)]) -> f64 {
    let (mut i, mut j, mut acc) = (0, 0, 0.0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            Ordering::Equal => {
                acc += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
        }
    }
    acc
}
