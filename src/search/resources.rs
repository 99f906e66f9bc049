//! Budget tracking and cancellation for search loops.
//!
//! Searches can explode combinatorially. Every engine drives its loops
//! through a [`ResourceTracker`] so that:
//! - counter budgets ([`crate::search::SearchLimits`]) turn runaway loops
//!   into [`SearchError::LimitExceeded`]
//! - the caller's cancellation predicate is polled at every expansion

use crate::search::{ResourceCounts, SearchError, SearchLimits, SearchOptions};

#[derive(Clone, Copy)]
/// Tracks budgets/counters during one search call.
pub struct ResourceTracker<'a> {
    limits: SearchLimits,
    counts: ResourceCounts,
    cancel: Option<&'a dyn Fn() -> bool>,
}

impl<'a> ResourceTracker<'a> {
    pub fn new(opts: &SearchOptions<'a>) -> Self {
        Self {
            limits: opts.limits,
            counts: ResourceCounts::default(),
            cancel: opts.cancel,
        }
    }

    #[inline]
    pub fn counts(&self) -> ResourceCounts {
        self.counts
    }

    /// One node taken off a frontier. Also the cancellation checkpoint.
    #[inline]
    pub fn bump_expansions(&mut self, stage: &'static str, delta: u64) -> Result<(), SearchError> {
        self.poll_cancel(stage)?;
        self.bump(stage, "expansions", delta, self.limits.max_expansions, |c| {
            &mut c.expansions
        })
    }

    /// One node admitted to a frontier or candidate level.
    #[inline]
    pub fn bump_frontier(&mut self, stage: &'static str, delta: u64) -> Result<(), SearchError> {
        self.bump(
            stage,
            "frontier_nodes",
            delta,
            self.limits.max_frontier_nodes,
            |c| &mut c.frontier_nodes,
        )
    }

    /// Generic loop-iteration guard.
    #[inline]
    pub fn bump_steps(&mut self, stage: &'static str, delta: u64) -> Result<(), SearchError> {
        self.bump(
            stage,
            "runtime_steps",
            delta,
            self.limits.max_runtime_steps,
            |c| &mut c.runtime_steps,
        )
    }

    /// Recursion depth guard for the adversarial engine.
    #[inline]
    pub fn check_depth(&self, depth: u32) -> Result<(), SearchError> {
        if depth > self.limits.max_depth {
            return Err(SearchError::DepthLimitExceeded {
                limit: self.limits.max_depth,
            });
        }
        Ok(())
    }

    #[inline]
    fn poll_cancel(&self, stage: &'static str) -> Result<(), SearchError> {
        match self.cancel {
            Some(cancel) if cancel() => Err(SearchError::Cancelled { stage }),
            _ => Ok(()),
        }
    }

    fn bump(
        &mut self,
        stage: &'static str,
        metric: &'static str,
        delta: u64,
        limit: u64,
        field: impl FnOnce(&mut ResourceCounts) -> &mut u64,
    ) -> Result<(), SearchError> {
        let observed = {
            let v = field(&mut self.counts);
            *v = v.saturating_add(delta);
            *v
        };

        if observed > limit {
            return Err(SearchError::LimitExceeded {
                stage,
                metric,
                limit,
                observed,
                counts: self.counts,
            });
        }

        Ok(())
    }
}
