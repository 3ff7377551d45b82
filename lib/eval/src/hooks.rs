// Progress and cancellation hooks for long evaluations
use cbrx_core::CaseId;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result of holding out one case and retrieving its nearest neighbour
#[derive(Debug, Clone, PartialEq)]
pub struct HoldoutOutcome {
    pub case_id: CaseId,
    pub expected: String,
    pub predicted_id: CaseId,
    pub predicted: String,
    pub score: f64,
    pub correct: bool,
}

/// Receives evaluation progress. Called from worker threads when the
/// evaluation runs in parallel, so events may arrive out of base order.
pub trait EvalObserver: Send + Sync {
    fn on_start(&self, _total_cases: usize) {}

    fn on_case(&self, _outcome: &HoldoutOutcome) {}

    /// The held-out base was empty, so no comparison was made
    fn on_skip(&self, _case_id: &CaseId) {}
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl EvalObserver for NoopObserver {}

/// Cooperative cancellation flag, checked between held-out cases.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
