//! The LOGO driver: search state, the banded optimistic selection engine,
//! and node expansion.
//!
//! A [`Logo`] value owns the partitioned space plus the run-level counters
//! and walks the lifecycle `new → init → step… → finish`. Each `step`
//! sweeps the space in bands of `bandwidth` consecutive depths, expands
//! the best node of every band that strictly improves on all shallower
//! bands, then consults the schedule policy for the next bandwidth. Only
//! branches that could plausibly contain a better optimum than anything
//! found so far are explored; that is what bounds the work per step.
//!
//! Dropping the `Logo` releases the space and every node it owns; there
//! is no separate teardown call.

use std::sync::Arc;

use crate::error::{Result, TerminationReason};
use crate::schedule::{ScheduleContext, ScheduleFn};
use crate::space::{Node, NodeId, Space};
use crate::types::{
    DepthBudgetFn, LogoOptions, LogoResult, ObjectiveFn, DIM, UNKNOWN_OPTIMUM,
};

/// Derivative-free global maximizer over the unit hypercube.
pub struct Logo {
    /// Objective function; called only from [`Logo::sample`].
    func: Arc<ObjectiveFn>,

    /// Depth budget `hmax(n)`: how deep the partition is worth refining
    /// after `n` samples.
    depth_budget: Arc<DepthBudgetFn>,

    /// Bandwidth schedule consulted once per step.
    schedule: Arc<ScheduleFn>,

    /// Run configuration, immutable for the life of the search.
    options: LogoOptions,

    /// The partitioned input space.
    space: Space,

    /// Objective evaluations so far.
    samples_taken: usize,

    /// Bandwidth the next selection sweep will use.
    bandwidth: usize,

    /// Best value in the space at the end of the previous step.
    last_best: f64,

    /// Selection steps completed.
    steps: usize,

    /// Optional step-by-step trace sink.
    #[cfg(feature = "trace")]
    tracer: Option<Arc<crate::trace::TraceWriter>>,
}

impl Logo {
    /// Create an optimizer from its three collaborator callbacks and the
    /// run options.
    ///
    /// Validation happens here, before any sampling: an invalid option set
    /// (even `split_factor`, zero budget or bandwidth) is rejected without
    /// the objective ever being called.
    ///
    /// # Arguments
    /// * `objective` — pure function over `[0,1]^DIM` to maximize
    /// * `depth_budget` — `hmax(n)`, the depth worth refining after `n` samples
    /// * `schedule` — bandwidth policy, e.g. [`crate::schedule::fixed`]
    /// * `options` — run configuration
    ///
    /// # Errors
    /// Returns the first [`crate::error::LogoError`] the options violate.
    pub fn new(
        objective: impl Fn(&crate::types::Point) -> f64 + Send + Sync + 'static,
        depth_budget: impl Fn(usize) -> f64 + Send + Sync + 'static,
        schedule: impl Fn(&ScheduleContext) -> usize + Send + Sync + 'static,
        options: LogoOptions,
    ) -> Result<Self> {
        options.validate()?;
        let bandwidth = options.init_bandwidth;
        Ok(Self {
            func: Arc::new(objective),
            depth_budget: Arc::new(depth_budget),
            schedule: Arc::new(schedule),
            options,
            space: Space::new(),
            samples_taken: 0,
            bandwidth,
            last_best: f64::NEG_INFINITY,
            steps: 0,
            #[cfg(feature = "trace")]
            tracer: None,
        })
    }

    /// Attach a trace sink; subsequent lifecycle calls emit tagged lines
    /// into it.
    #[cfg(feature = "trace")]
    pub fn set_tracer(&mut self, tracer: Arc<crate::trace::TraceWriter>) {
        self.tracer = Some(tracer);
    }

    // ──────────────────────────────────────────────────────────────────────
    // Accessors
    // ──────────────────────────────────────────────────────────────────────

    /// Run configuration.
    pub fn options(&self) -> &LogoOptions {
        &self.options
    }

    /// The partitioned space (read-only; all mutation goes through the
    /// lifecycle operations).
    pub fn space(&self) -> &Space {
        &self.space
    }

    /// Objective evaluations so far. Never exceeds `options.max_samples`.
    pub fn samples_taken(&self) -> usize {
        self.samples_taken
    }

    /// Selection steps completed.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Bandwidth the next selection sweep will use.
    pub fn bandwidth(&self) -> usize {
        self.bandwidth
    }

    /// Best value found so far, `-inf` for an empty space.
    pub fn best_value(&self) -> f64 {
        self.space
            .best()
            .map_or(f64::NEG_INFINITY, |id| self.space.node(id).value)
    }

    // ──────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ──────────────────────────────────────────────────────────────────────

    /// Create, sample, and insert the whole-domain root cell, consuming
    /// one unit of the sample budget.
    ///
    /// # Panics
    /// Panics when called on an already-initialized search.
    pub fn init(&mut self) {
        assert!(
            self.space.is_empty(),
            "init() called on an already-initialized search"
        );
        let mut root = Node::root();
        self.sample(&mut root);
        let value = root.value;
        self.space.insert(root);
        self.last_best = value;
        crate::trace_write!(self.tracer, "TRACE INIT f={:.15e} samples=1", value);
    }

    /// Run one selection sweep, then let the schedule policy set the next
    /// bandwidth and refresh the previous-best bookkeeping.
    ///
    /// # Panics
    /// Panics when called before [`Logo::init`], or when the schedule
    /// policy returns a zero bandwidth.
    pub fn step(&mut self) {
        assert!(!self.space.is_empty(), "step() called before init()");
        self.select_and_expand();

        let context = ScheduleContext {
            bandwidth: self.bandwidth,
            best: self.best_value(),
            previous_best: self.last_best,
            samples_taken: self.samples_taken,
        };
        let next = (self.schedule)(&context);
        assert!(next >= 1, "schedule policy returned a zero bandwidth");
        self.bandwidth = next;
        self.last_best = context.best;
        self.steps += 1;
        crate::trace_write!(
            self.tracer,
            "TRACE ENDSTEP t={} best={:.15e} w={} samples={}",
            self.steps,
            context.best,
            self.bandwidth,
            self.samples_taken
        );
    }

    /// True once the sample budget is exhausted or the best value is
    /// within `epsilon` of the known optimum. Pure query.
    pub fn is_done(&self) -> bool {
        self.samples_taken >= self.options.max_samples
            || self.relative_error() <= self.options.epsilon
    }

    /// Gap between the known optimum and the best value found.
    ///
    /// Infinite when the optimum is unknown (the run then terminates on
    /// budget alone); absolute when the optimum is exactly zero; relative
    /// otherwise.
    pub fn relative_error(&self) -> f64 {
        if self.options.optimum == UNKNOWN_OPTIMUM {
            return f64::INFINITY;
        }
        let gap = self.options.optimum - self.best_value();
        if self.options.optimum == 0.0 {
            gap
        } else {
            gap / self.options.optimum
        }
    }

    /// Snapshot the result: the best cell's center, its value, and the
    /// run counters.
    ///
    /// # Panics
    /// Panics when the run is not done; finishing early would snapshot a
    /// search that the caller believes has converged.
    pub fn finish(&self) -> LogoResult {
        assert!(self.is_done(), "finish() called before the run is done");
        let id = self.space.best().expect("finished search has no nodes");
        let node = self.space.node(id);
        let termination = if self.relative_error() <= self.options.epsilon {
            TerminationReason::TargetAccuracy
        } else {
            TerminationReason::BudgetExhausted
        };
        LogoResult::new(
            node.center(),
            node.value,
            self.samples_taken,
            self.steps,
            termination,
        )
    }

    /// Convenience driver: initialize if needed, step until done, and
    /// return the result snapshot.
    pub fn optimize(&mut self) -> LogoResult {
        if self.space.is_empty() {
            self.init();
        }
        while !self.is_done() {
            self.step();
        }
        self.finish()
    }

    // ──────────────────────────────────────────────────────────────────────
    // Selection engine
    // ──────────────────────────────────────────────────────────────────────

    /// One banded sweep over the space.
    ///
    /// Depths are grouped into bands of `bandwidth` consecutive levels, at
    /// most `floor(hmax(n)/w)` bands deep. Walking from the shallowest
    /// band, the band's best node is expanded only when its value strictly
    /// exceeds the best of every band already visited; a band that cannot
    /// improve is skipped outright. Children inserted during the sweep are
    /// visible to the deeper bands of the same sweep.
    fn select_and_expand(&mut self) {
        let budget = (self.depth_budget)(self.samples_taken);
        let band_count = (budget / self.bandwidth as f64).floor() as usize;
        let mut expanded_best = f64::NEG_INFINITY;

        for band in 0..=band_count {
            let low = band * self.bandwidth;
            if low >= self.space.capacity() {
                break;
            }
            let high = low + self.bandwidth - 1;

            let Some(candidate) = self.best_in_band(low, high) else {
                continue;
            };
            let value = self.space.node(candidate).value;
            if value <= expanded_best {
                continue;
            }
            expanded_best = value;
            crate::trace_write!(
                self.tracer,
                "TRACE SELECT depth={} f={:.15e} samples={}",
                self.space.node(candidate).depth,
                value,
                self.samples_taken
            );

            let child_best = self.expand(candidate);
            crate::trace_write!(
                self.tracer,
                "TRACE EXPAND child_best={:.15e} samples={}",
                child_best,
                self.samples_taken
            );

            if self.samples_taken >= self.options.max_samples
                || self.options.optimum - child_best < self.options.epsilon
            {
                return;
            }
        }
    }

    /// Best node across the depths `low..=high`, or `None` when every one
    /// of them is empty. Exactly equal values across depths resolve to the
    /// shallowest.
    fn best_in_band(&self, low: usize, high: usize) -> Option<NodeId> {
        let mut best: Option<NodeId> = None;
        for depth in low..=high {
            let Some(id) = self.space.best_at_depth(depth) else {
                continue;
            };
            match best {
                Some(b) if self.space.node(id).value <= self.space.node(b).value => {}
                _ => best = Some(id),
            }
        }
        best
    }

    // ──────────────────────────────────────────────────────────────────────
    // Expansion
    // ──────────────────────────────────────────────────────────────────────

    /// Split a node into `k` children along the axis `depth % DIM` and
    /// reinsert them one depth deeper; returns the best child value.
    ///
    /// The middle child shares its center with the parent on the split
    /// axis and inherits the parent's value without an objective call;
    /// every other child is sampled. If the budget runs out mid-split or
    /// the known optimum comes within `epsilon`, the remaining children
    /// are never created; the resulting hole in the partition is
    /// tolerated only because the run is about to terminate.
    fn expand(&mut self, id: NodeId) -> f64 {
        let parent = *self.space.node(id);
        self.space.remove(id);

        let k = self.options.split_factor;
        let split_dim = parent.depth % DIM;
        let mut best = f64::NEG_INFINITY;

        for i in 0..k {
            let mut child = parent.child(k, split_dim, i);
            if i != k / 2 {
                self.sample(&mut child);
            }
            if child.value > best {
                best = child.value;
            }
            self.space.insert(child);

            if self.samples_taken >= self.options.max_samples
                || self.options.optimum - best < self.options.epsilon
            {
                break;
            }
        }

        self.space.release(id);
        best
    }

    /// Evaluate the objective at the node's center and record the value.
    /// The single call site of the objective function in the engine.
    fn sample(&mut self, node: &mut Node) {
        let center = node.center();
        node.value = (self.func)(&center);
        self.samples_taken += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule;
    use crate::types::Point;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sum_objective(p: &Point) -> f64 {
        p[0] + p[1]
    }

    fn sqrt_budget(n: usize) -> f64 {
        (n as f64).sqrt()
    }

    fn solver(options: LogoOptions) -> Logo {
        Logo::new(sum_objective, sqrt_budget, schedule::fixed(1), options).unwrap()
    }

    #[test]
    fn test_even_split_factor_rejected_before_sampling() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let result = Logo::new(
            move |p: &Point| {
                counter.fetch_add(1, Ordering::Relaxed);
                p[0]
            },
            sqrt_budget,
            schedule::fixed(1),
            LogoOptions {
                split_factor: 4,
                ..Default::default()
            },
        );
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_init_samples_root_once() {
        let mut logo = solver(LogoOptions::default());
        logo.init();
        assert_eq!(logo.samples_taken(), 1);
        assert_eq!(logo.space().len(), 1);
        // Root center is the domain midpoint.
        assert_eq!(logo.best_value(), 1.0);
    }

    #[test]
    #[should_panic(expected = "already-initialized")]
    fn test_init_twice_panics() {
        let mut logo = solver(LogoOptions::default());
        logo.init();
        logo.init();
    }

    #[test]
    #[should_panic(expected = "before init()")]
    fn test_step_before_init_panics() {
        let mut logo = solver(LogoOptions::default());
        logo.step();
    }

    #[test]
    #[should_panic(expected = "before the run is done")]
    fn test_finish_before_done_panics() {
        let mut logo = solver(LogoOptions::default());
        logo.init();
        logo.finish();
    }

    #[test]
    #[should_panic(expected = "zero bandwidth")]
    fn test_zero_bandwidth_schedule_panics() {
        let mut logo = Logo::new(
            sum_objective,
            sqrt_budget,
            |_context: &ScheduleContext| 0,
            LogoOptions::default(),
        )
        .unwrap();
        logo.init();
        logo.step();
    }

    #[test]
    fn test_budget_three_is_exactly_one_full_split() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut logo = Logo::new(
            move |p: &Point| {
                counter.fetch_add(1, Ordering::Relaxed);
                p[0] + p[1]
            },
            sqrt_budget,
            schedule::fixed(1),
            LogoOptions {
                max_samples: 3,
                ..Default::default()
            },
        )
        .unwrap();

        logo.init();
        let root_value = logo.best_value();
        logo.step();

        // Root plus two sampled children; the middle child inherited.
        assert_eq!(calls.load(Ordering::Relaxed), 3);
        assert_eq!(logo.samples_taken(), 3);
        assert!(logo.is_done());

        // Depth 0 is gone, depth 1 holds the full set of k children.
        assert_eq!(logo.space().iter_depth(0).count(), 0);
        assert_eq!(logo.space().iter_depth(1).count(), 3);

        // The middle child kept the parent's center and value.
        let inherited = logo
            .space()
            .iter_depth(1)
            .find(|&id| {
                let center = logo.space().node(id).center();
                (center[0] - 0.5).abs() < 1e-9 && (center[1] - 0.5).abs() < 1e-9
            })
            .expect("middle child present");
        assert_eq!(logo.space().node(inherited).value, root_value);
    }

    #[test]
    fn test_samples_never_exceed_budget() {
        for max_samples in [1, 2, 7, 50, 200] {
            let mut logo = solver(LogoOptions {
                max_samples,
                ..Default::default()
            });
            let result = logo.optimize();
            assert!(
                result.samples <= max_samples,
                "budget {} overrun: {}",
                max_samples,
                result.samples
            );
        }
    }

    #[test]
    fn test_unknown_optimum_runs_to_budget() {
        let mut logo = solver(LogoOptions {
            max_samples: 100,
            ..Default::default()
        });
        logo.init();
        assert_eq!(logo.relative_error(), f64::INFINITY);
        let result = logo.optimize();
        assert_eq!(result.samples, 100);
        assert_eq!(result.termination, TerminationReason::BudgetExhausted);
    }

    #[test]
    fn test_exact_optimum_at_root_stops_immediately() {
        let mut logo = Logo::new(
            |p: &Point| -((p[0] - 0.5).powi(2) + (p[1] - 0.5).powi(2)),
            sqrt_budget,
            schedule::fixed(1),
            LogoOptions {
                max_samples: 100,
                optimum: 0.0,
                ..Default::default()
            },
        )
        .unwrap();
        let result = logo.optimize();
        assert_eq!(result.samples, 1);
        assert_eq!(result.steps, 0);
        assert!(result.termination.is_accuracy());
        assert_eq!(result.point, [0.5, 0.5]);
    }

    #[test]
    fn test_best_value_is_monotone_across_steps() {
        let mut logo = solver(LogoOptions {
            max_samples: 10_000,
            ..Default::default()
        });
        logo.init();
        let mut previous = logo.best_value();
        for _ in 0..20 {
            logo.step();
            let best = logo.best_value();
            assert!(best >= previous, "best regressed: {} -> {}", previous, best);
            previous = best;
        }
    }

    #[test]
    fn test_step_counter_and_bandwidth_bookkeeping() {
        let mut logo = Logo::new(
            sum_objective,
            sqrt_budget,
            schedule::fixed(2),
            LogoOptions {
                max_samples: 1000,
                init_bandwidth: 1,
                ..Default::default()
            },
        )
        .unwrap();
        logo.init();
        assert_eq!(logo.bandwidth(), 1);
        logo.step();
        assert_eq!(logo.steps(), 1);
        // The schedule takes over after the first sweep.
        assert_eq!(logo.bandwidth(), 2);
    }

    #[test]
    fn test_best_value_on_empty_space() {
        let logo = solver(LogoOptions::default());
        assert_eq!(logo.best_value(), f64::NEG_INFINITY);
    }
}
