//! Retriever: ranks a case base against a query
//!
//! Scores every case, sorts by score descending and keeps the top `k`.
//! Ties keep case base order.

use crate::distance::{label_similarity, weighted_jaccard};
use crate::schema::AggregateSchema;
use cbrx_core::{Case, CaseBase, Error, FeatureSet, Query, Result, Weighting};
use std::collections::HashMap;
use std::sync::Arc;

/// A case paired with its similarity to the query
#[derive(Debug, Clone)]
pub struct RankedCase {
    pub case: Arc<Case>,
    pub score: f64,
}

impl RankedCase {
    /// Get the case ID as a string
    pub fn id_string(&self) -> String {
        self.case.id.to_string()
    }
}

/// Cases ordered by score descending, ties in case base order
pub type Ranking = Vec<RankedCase>;

/// Result of a label-aware lookup with per-term scores
#[derive(Debug, Clone)]
pub struct RankedResult {
    pub case: Arc<Case>,
    /// Overall weighted similarity score
    pub score: f64,
    /// Per-term similarity scores (already weighted)
    pub field_scores: HashMap<String, f64>,
}

impl RankedResult {
    pub fn id_string(&self) -> String {
        self.case.id.to_string()
    }
}

/// Stable descending sort. `sort_by` is stable, so equal scores keep their
/// input order, which is case base order.
fn sort_descending<T>(items: &mut [T], score: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| score(b).total_cmp(&score(a)));
}

/// Ranks case bases against queries under a fixed weighting
#[derive(Debug, Clone, Default)]
pub struct Retriever {
    weighting: Weighting,
}

impl Retriever {
    pub fn new(weighting: Weighting) -> Self {
        Self { weighting }
    }

    pub fn weighting(&self) -> &Weighting {
        &self.weighting
    }

    /// Score of `query` against one case's features
    #[inline]
    pub fn score(&self, query: &FeatureSet, case: &Case) -> f64 {
        weighted_jaccard(query, &case.features, &self.weighting)
    }

    /// Full ranking of every case in `base`
    pub fn rank(&self, query: &FeatureSet, base: &CaseBase) -> Ranking {
        let mut ranking: Ranking = base
            .all()
            .iter()
            .map(|case| RankedCase {
                score: self.score(query, case),
                case: Arc::clone(case),
            })
            .collect();
        sort_descending(&mut ranking, |r| r.score);
        ranking
    }

    /// Top-`k` ranking. An empty base yields an empty ranking.
    pub fn retrieve(&self, query: &FeatureSet, base: &CaseBase, k: usize) -> Result<Ranking> {
        if k == 0 {
            return Err(Error::InvalidK(k));
        }
        let mut ranking = self.rank(query, base);
        ranking.truncate(k);
        Ok(ranking)
    }

    /// Single best match, first in base order among equal scores.
    ///
    /// Linear scan without building the full ranking.
    pub fn best_match(&self, query: &FeatureSet, base: &CaseBase) -> Option<RankedCase> {
        let mut best: Option<RankedCase> = None;
        for case in base.all() {
            let score = self.score(query, case);
            // strict comparison keeps the earliest case on ties
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(RankedCase {
                    case: Arc::clone(case),
                    score,
                });
            }
        }
        best
    }

    /// Label-aware lookup: `features * sim + label * [labels equal]`.
    ///
    /// A query without a label scores 0 on the label term. Intended for ad
    /// hoc lookups only; it reads the query label.
    pub fn lookup(
        &self,
        query: &Query,
        base: &CaseBase,
        k: usize,
        schema: &AggregateSchema,
    ) -> Result<Vec<RankedResult>> {
        if k == 0 {
            return Err(Error::InvalidK(k));
        }
        let mut schema = *schema;
        schema
            .validate_and_normalize()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;

        let mut results: Vec<RankedResult> = base
            .all()
            .iter()
            .map(|case| {
                let (score, field_scores) = self.aggregate_score(query, case, &schema);
                RankedResult {
                    case: Arc::clone(case),
                    score,
                    field_scores,
                }
            })
            .collect();

        sort_descending(&mut results, |r| r.score);
        results.truncate(k);
        Ok(results)
    }

    /// Compute the aggregate score between query and case
    ///
    /// Returns (total_score, field_scores) where field_scores holds the
    /// weighted contribution of the `features` and `label` terms.
    pub fn aggregate_score(
        &self,
        query: &Query,
        case: &Case,
        schema: &AggregateSchema,
    ) -> (f64, HashMap<String, f64>) {
        let feature_term = self.score(&query.features, case) * schema.features;
        let label_term = query
            .label
            .as_deref()
            .map(|label| label_similarity(label, &case.label))
            .unwrap_or(0.0)
            * schema.label;

        let field_scores = HashMap::from([
            ("features".to_string(), feature_term),
            ("label".to_string(), label_term),
        ]);
        ((feature_term + label_term).clamp(0.0, 1.0), field_scores)
    }
}

/// Top-`k` retrieval with a one-off retriever
pub fn retrieve(query: &FeatureSet, base: &CaseBase, weighting: &Weighting, k: usize) -> Result<Ranking> {
    Retriever::new(weighting.clone()).retrieve(query, base, k)
}
