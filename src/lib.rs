//! # cbrx
//!
//! A case-based reasoning retrieval engine.
//!
//! Given a library of solved cases, each a set of symbolic features with a
//! known outcome label, cbrx finds the cases most similar to a query and
//! reuses their outcomes as a prediction.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! cbrx --data Training.csv lookup --features itching,skin_rash -k 3
//! cbrx --data Training.csv loo --weighting both --parallel
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use cbrx::prelude::*;
//!
//! let cases = vec![
//!     Case::new("A", ["x", "y"], "flu"),
//!     Case::new("B", ["x"], "cold"),
//!     Case::new("C", ["x", "y"], "flu"),
//! ];
//! let weighting = Weighting::from(compute_weights(&cases));
//! let base = CaseBase::new(cases).unwrap();
//!
//! // Top-k retrieval
//! let top = retrieve(&feature_set(["x", "y"]), &base, &weighting, 1).unwrap();
//! assert_eq!(top[0].case.label, "flu");
//!
//! // Leave-one-out self-evaluation
//! let report = evaluate(&base, &weighting);
//! assert_eq!(report.total, 3);
//! ```
//!
//! ## Crate Structure
//!
//! - [`cbrx-core`](https://docs.rs/cbrx-core) - Cases, case bases, vocabulary, IDF weights
//! - [`cbrx-similarity`](https://docs.rs/cbrx-similarity) - Weighted Jaccard and the retriever
//! - [`cbrx-eval`](https://docs.rs/cbrx-eval) - Leave-one-out evaluation
//! - [`cbrx-storage`](https://docs.rs/cbrx-storage) - Tabular and JSON corpus loading

// Re-export core types
pub use cbrx_core::{
    compute_weights, feature_set,
    Case, CaseBase, CaseId, FeatureSet, FeatureVocabulary, Query,
    WeightVector, Weighting,
    Error, Result,
};

// Re-export similarity
pub use cbrx_similarity::{
    jaccard, retrieve, weighted_jaccard,
    AggregateSchema, ExplainedMatch, RankedCase, RankedResult, Ranking, RankingStats, Retriever,
};

// Re-export evaluation
pub use cbrx_eval::{
    evaluate, CancellationToken, EvalConfig, EvalObserver, EvaluationReport, HoldoutOutcome,
    LooEvaluator,
};

// Re-export storage
pub use cbrx_storage::{load_json_cases, Corpus, StorageError, TabularLoader};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        compute_weights, evaluate, feature_set, retrieve,
        Case, CaseBase, CaseId, FeatureSet, Query,
        WeightVector, Weighting,
        Retriever, Ranking, RankedCase, AggregateSchema,
        LooEvaluator, EvalConfig, EvaluationReport, CancellationToken,
        TabularLoader,
        Error, Result,
    };
}
