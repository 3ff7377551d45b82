//! Serializable views of rankings for reporters
//!
//! The retriever never formats output; these types give a reporter a stable
//! shape to print or serialize.

use crate::rerank::{RankedCase, RankedResult};
use cbrx_core::CaseId;
use serde::Serialize;
use std::collections::HashMap;

/// One retrieved case with the outcome it suggests
#[derive(Debug, Clone, Serialize)]
pub struct ExplainedMatch {
    pub rank: usize,
    pub id: CaseId,
    pub score: f64,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    /// Per-term contributions, present for label-aware lookups
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub explain: HashMap<String, f64>,
}

impl ExplainedMatch {
    pub fn from_ranked(rank: usize, ranked: &RankedCase) -> Self {
        Self {
            rank,
            id: ranked.case.id.clone(),
            score: ranked.score,
            label: ranked.case.label.clone(),
            solution: ranked.case.solution.clone(),
            explain: HashMap::new(),
        }
    }

    pub fn from_result(rank: usize, result: &RankedResult) -> Self {
        Self {
            rank,
            id: result.case.id.clone(),
            score: result.score,
            label: result.case.label.clone(),
            solution: result.case.solution.clone(),
            explain: result.field_scores.clone(),
        }
    }

    /// Ranks start at 1
    pub fn from_ranking(ranking: &[RankedCase]) -> Vec<Self> {
        ranking
            .iter()
            .enumerate()
            .map(|(i, r)| Self::from_ranked(i + 1, r))
            .collect()
    }

    pub fn from_results(results: &[RankedResult]) -> Vec<Self> {
        results
            .iter()
            .enumerate()
            .map(|(i, r)| Self::from_result(i + 1, r))
            .collect()
    }
}

/// Summary statistics for a lookup
#[derive(Debug, Clone, Serialize)]
pub struct RankingStats {
    /// Number of cases scored
    pub candidates_count: usize,
    /// Number of results returned
    pub results_count: usize,
    /// Average score of results
    pub avg_score: f64,
    /// Score of best result
    pub best_score: f64,
    /// Label of best result
    pub best_label: Option<String>,
}

impl RankingStats {
    pub fn compute(ranking: &[RankedCase], candidates_count: usize) -> Self {
        let Some(best) = ranking.first() else {
            return Self {
                candidates_count,
                results_count: 0,
                avg_score: 0.0,
                best_score: 0.0,
                best_label: None,
            };
        };

        let avg_score = ranking.iter().map(|r| r.score).sum::<f64>() / ranking.len() as f64;
        Self {
            candidates_count,
            results_count: ranking.len(),
            avg_score,
            best_score: best.score,
            best_label: Some(best.case.label.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rerank::Retriever;
    use cbrx_core::{feature_set, Case, CaseBase};

    #[test]
    fn test_explained_ranking() {
        let base = CaseBase::new(vec![
            Case::new(1u64, ["x", "y"], "flu").with_solution("Standard treatment for flu"),
            Case::new(2u64, ["x"], "cold"),
        ])
        .unwrap();
        let ranking = Retriever::default().rank(&feature_set(["x", "y"]), &base);
        let explained = ExplainedMatch::from_ranking(&ranking);

        assert_eq!(explained[0].rank, 1);
        assert_eq!(explained[0].solution.as_deref(), Some("Standard treatment for flu"));

        let json = serde_json::to_value(&explained[1]).unwrap();
        assert_eq!(json["id"], 2);
        assert!(json.get("solution").is_none());
        assert!(json.get("explain").is_none());
    }

    #[test]
    fn test_stats() {
        let base = CaseBase::new(vec![
            Case::new(1u64, ["x", "y"], "flu"),
            Case::new(2u64, ["x"], "cold"),
        ])
        .unwrap();
        let ranking = Retriever::default().rank(&feature_set(["x", "y"]), &base);
        let stats = RankingStats::compute(&ranking, base.len());
        assert_eq!(stats.results_count, 2);
        assert!((stats.avg_score - 0.75).abs() < 1e-12);
        assert_eq!(stats.best_label.as_deref(), Some("flu"));

        let empty = RankingStats::compute(&[], 0);
        assert_eq!(empty.results_count, 0);
        assert!(empty.best_label.is_none());
    }
}
