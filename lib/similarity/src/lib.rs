//! # cbrx Similarity
//!
//! Similarity scoring and top-k retrieval over a case base.
//!
//! ## Features
//!
//! - **Weighted Jaccard**: intersection and union summed by per-feature weight
//! - **Retriever**: stable top-k ranking, ties kept in case base order
//! - **Label-aware lookup**: feature similarity plus exact label match, for ad hoc queries
//! - **Explainability**: serializable match and summary views for reporters
//!
//! ## Example
//!
//! ```rust
//! use cbrx_core::{feature_set, Case, CaseBase, Weighting};
//! use cbrx_similarity::Retriever;
//!
//! let base = CaseBase::new(vec![
//!     Case::new("A", ["x", "y"], "flu"),
//!     Case::new("B", ["x"], "cold"),
//! ]).unwrap();
//!
//! let retriever = Retriever::new(Weighting::Uniform);
//! let top = retriever.retrieve(&feature_set(["x", "y"]), &base, 1).unwrap();
//! assert_eq!(top[0].case.label, "flu");
//! assert_eq!(top[0].score, 1.0);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Weights   │────>│  Jaccard    │────>│  Retriever  │
//! │ (IDF/unif.) │     │ (distance)  │     │  (rerank)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                         ┌─────────────┐
//!                                         │  Explain    │
//!                                         │  (results)  │
//!                                         └─────────────┘
//! ```

pub mod distance;
pub mod explain;
pub mod rerank;
pub mod schema;

pub use distance::{jaccard, label_similarity, weighted_jaccard};
pub use explain::{ExplainedMatch, RankingStats};
pub use rerank::{retrieve, RankedCase, RankedResult, Ranking, Retriever};
pub use schema::{AggregateSchema, SchemaError};
