//! Cooperative cancellation.
//!
//! Engines check a [`Cancellation`] only at their suspension points: between
//! iterative-deepening depths and between Monte-Carlo simulations. A single
//! recursion or rollout always runs to completion, so whatever result an
//! engine returns is complete and consistent.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Wall-clock deadline and/or external stop flag.
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    deadline: Option<Instant>,
    stop_flag: Option<Arc<AtomicBool>>,
}

impl Cancellation {
    /// Never cancels.
    pub fn none() -> Self {
        Self::default()
    }

    /// Cancel once `budget` has elapsed from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + budget),
            stop_flag: None,
        }
    }

    /// Optional time budget, as carried by search configs.
    pub fn from_budget(budget: Option<Duration>) -> Self {
        budget.map(Self::after).unwrap_or_default()
    }

    /// Also cancel when `flag` is raised by another thread.
    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether the search should stop at the next suspension point.
    #[inline]
    pub fn should_stop(&self) -> bool {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return true;
            }
        }
        if let Some(flag) = &self.stop_flag {
            if flag.load(Ordering::Relaxed) {
                return true;
            }
        }
        false
    }
}
