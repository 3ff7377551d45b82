use serde::{Deserialize, Serialize};

/// Aggregate result of a leave-one-out run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Held-out cases whose retrieved neighbour carried the same label
    pub correct: usize,
    /// Held-out cases that produced a comparison
    pub total: usize,
    /// `correct / total`, or 0.0 when `total == 0`
    pub accuracy: f64,
    /// Held-out cases with nothing left to retrieve from
    pub skipped: usize,
    /// The run stopped early; counts cover the cases evaluated before that
    pub cancelled: bool,
}

impl EvaluationReport {
    pub fn new(correct: usize, total: usize, skipped: usize, cancelled: bool) -> Self {
        let accuracy = if total == 0 {
            0.0
        } else {
            correct as f64 / total as f64
        };
        Self {
            correct,
            total,
            accuracy,
            skipped,
            cancelled,
        }
    }

    #[inline]
    pub fn accuracy_percent(&self) -> f64 {
        self.accuracy * 100.0
    }

    /// Whether any comparison was made; otherwise `accuracy` is a sentinel
    #[inline]
    pub fn has_comparisons(&self) -> bool {
        self.total > 0
    }

    #[inline]
    pub fn incorrect(&self) -> usize {
        self.total - self.correct
    }
}
