//! Set similarity functions for case features
//!
//! All functions return a similarity score in range [0.0, 1.0] where 1.0 means identical.

use cbrx_core::{FeatureSet, Weighting};

/// Weighted Jaccard similarity between two feature sets
///
/// Intersection and union are summed by per-feature weight instead of
/// counted. Under [`Weighting::Weighted`], features missing from the weight
/// vector contribute 0 to both sums.
///
/// # Returns
/// - `1.0` when both sets are empty
/// - `0.0` when the union weighs nothing
/// - `intersection_weight / union_weight` otherwise
pub fn weighted_jaccard(a: &FeatureSet, b: &FeatureSet, weighting: &Weighting) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }

    // BTreeSet iterates in key order, so both sums are accumulated in the
    // same sequence whichever operand comes first.
    let intersection_weight: f64 = a.intersection(b).map(|f| weighting.weight(f)).sum();
    let union_weight: f64 = a.union(b).map(|f| weighting.weight(f)).sum();

    if union_weight <= 0.0 {
        return 0.0;
    }

    (intersection_weight / union_weight).clamp(0.0, 1.0)
}

/// Classic Jaccard index `|A ∩ B| / |A ∪ B|`
#[inline]
pub fn jaccard(a: &FeatureSet, b: &FeatureSet) -> f64 {
    weighted_jaccard(a, b, &Weighting::Uniform)
}

/// Exact label match: 1.0 if equal, 0.0 otherwise
#[inline]
pub fn label_similarity(a: &str, b: &str) -> f64 {
    if a == b { 1.0 } else { 0.0 }
}
