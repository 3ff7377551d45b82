//! # cbrx Eval
//!
//! Leave-one-out self-evaluation of case retrieval.
//!
//! Each case is held out in turn, its features query the rest of the base,
//! and the top-1 neighbour's label is compared with the held-out label.
//!
//! ```rust
//! use cbrx_core::{Case, CaseBase, Weighting};
//! use cbrx_eval::{EvalConfig, LooEvaluator};
//!
//! let base = CaseBase::new(vec![
//!     Case::new(1u64, ["a", "b"], "L1"),
//!     Case::new(2u64, ["a", "b"], "L1"),
//!     Case::new(3u64, ["c"], "L2"),
//!     Case::new(4u64, ["c"], "L2"),
//! ]).unwrap();
//!
//! let report = LooEvaluator::new(Weighting::Uniform, EvalConfig { parallel: true })
//!     .evaluate(&base);
//! assert_eq!(report.correct, 4);
//! assert_eq!(report.accuracy, 1.0);
//! ```

pub mod evaluator;
pub mod hooks;
pub mod report;

pub use evaluator::{evaluate, EvalConfig, LooEvaluator};
pub use hooks::{CancellationToken, EvalObserver, HoldoutOutcome, NoopObserver};
pub use report::EvaluationReport;
