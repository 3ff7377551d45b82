//! Leave-one-out evaluation
//!
//! Every case is held out once, in base order. Its features (never its label)
//! query the remaining cases, and the top-1 neighbour's label is compared with
//! the held-out label. Iterations only read the shared base and weighting, so
//! they can run on the rayon pool and be summed.

use crate::hooks::{CancellationToken, EvalObserver, HoldoutOutcome, NoopObserver};
use crate::report::EvaluationReport;
use cbrx_core::{Case, CaseBase, Weighting};
use cbrx_similarity::Retriever;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Configuration for a leave-one-out run
#[derive(Debug, Clone, Default)]
pub struct EvalConfig {
    /// Run held-out cases on the rayon thread pool
    pub parallel: bool,
}

/// What happened to one held-out case
enum Step {
    Compared(bool),
    Skipped,
    Cancelled,
}

/// Commutative accumulator for per-case steps
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    correct: usize,
    total: usize,
    skipped: usize,
    cancelled: bool,
}

impl Tally {
    fn record(mut self, step: Step) -> Self {
        match step {
            Step::Compared(correct) => {
                self.total += 1;
                if correct {
                    self.correct += 1;
                }
            }
            Step::Skipped => self.skipped += 1,
            Step::Cancelled => self.cancelled = true,
        }
        self
    }

    fn merge(self, other: Tally) -> Self {
        Tally {
            correct: self.correct + other.correct,
            total: self.total + other.total,
            skipped: self.skipped + other.skipped,
            cancelled: self.cancelled || other.cancelled,
        }
    }

    fn into_report(self) -> EvaluationReport {
        EvaluationReport::new(self.correct, self.total, self.skipped, self.cancelled)
    }
}

pub struct LooEvaluator {
    retriever: Retriever,
    config: EvalConfig,
    observer: Arc<dyn EvalObserver>,
    cancellation: CancellationToken,
}

impl LooEvaluator {
    pub fn new(weighting: Weighting, config: EvalConfig) -> Self {
        Self {
            retriever: Retriever::new(weighting),
            config,
            observer: Arc::new(NoopObserver),
            cancellation: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn EvalObserver>) -> Self {
        self.observer = observer;
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn evaluate(&self, base: &CaseBase) -> EvaluationReport {
        info!(
            cases = base.len(),
            weighted = !self.retriever.weighting().is_uniform(),
            parallel = self.config.parallel,
            "Starting leave-one-out evaluation"
        );
        self.observer.on_start(base.len());

        let tally = if self.config.parallel {
            base.all()
                .par_iter()
                .map(|case| self.hold_out(base, case))
                .fold(Tally::default, Tally::record)
                .reduce(Tally::default, Tally::merge)
        } else {
            let mut tally = Tally::default();
            for case in base.all() {
                match self.hold_out(base, case) {
                    Step::Cancelled => {
                        tally.cancelled = true;
                        break;
                    }
                    step => tally = tally.record(step),
                }
            }
            tally
        };

        let report = tally.into_report();
        if report.cancelled {
            warn!(
                correct = report.correct,
                total = report.total,
                "Leave-one-out evaluation cancelled"
            );
        } else {
            info!(
                correct = report.correct,
                total = report.total,
                skipped = report.skipped,
                accuracy = report.accuracy,
                "Leave-one-out evaluation finished"
            );
        }
        report
    }

    fn hold_out(&self, base: &CaseBase, case: &Case) -> Step {
        if self.cancellation.is_cancelled() {
            return Step::Cancelled;
        }

        let held_out = base.excluding(&case.id);
        // query with features only; the label stays out of retrieval
        let Some(best) = self.retriever.best_match(&case.features, &held_out) else {
            debug!(case = %case.id, "No cases left after holding out, skipping");
            self.observer.on_skip(&case.id);
            return Step::Skipped;
        };

        let correct = best.case.label == case.label;
        trace!(
            case = %case.id,
            predicted = %best.case.id,
            score = best.score,
            correct,
            "Held-out case evaluated"
        );
        self.observer.on_case(&HoldoutOutcome {
            case_id: case.id.clone(),
            expected: case.label.clone(),
            predicted_id: best.case.id.clone(),
            predicted: best.case.label.clone(),
            score: best.score,
            correct,
        });
        Step::Compared(correct)
    }
}

/// Sequential leave-one-out run with no hooks
pub fn evaluate(base: &CaseBase, weighting: &Weighting) -> EvaluationReport {
    LooEvaluator::new(weighting.clone(), EvalConfig::default()).evaluate(base)
}
