//! Bandwidth schedule policies.
//!
//! The selection engine groups depths into comparison bands of `bandwidth`
//! consecutive levels. A schedule policy is consulted once per step, after
//! selection, to pick the bandwidth for the next step. Policies are plain
//! closures so callers can supply their own; the two canonical ones are
//! [`fixed`] and [`adaptive_ladder`].

/// Per-step view of the search handed to a schedule policy.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleContext {
    /// Bandwidth used by the step that just ran.
    pub bandwidth: usize,
    /// Best value in the space after the step.
    pub best: f64,
    /// Best value at the end of the previous step.
    pub previous_best: f64,
    /// Cumulative objective evaluations.
    pub samples_taken: usize,
}

/// Schedule policy signature. Must return a bandwidth of at least 1;
/// returning 0 is a caller contract bug and panics in the engine.
pub type ScheduleFn = dyn Fn(&ScheduleContext) -> usize + Send + Sync;

/// Bandwidth ladder from the published LOGO reference configuration.
pub const DEFAULT_LADDER: [usize; 6] = [3, 4, 5, 6, 8, 30];

/// Constant bandwidth. With `bandwidth == 1` every band is a single depth
/// and selection degenerates to the classical one-depth-at-a-time
/// optimistic rule.
///
/// # Panics
/// Panics immediately on `bandwidth == 0`.
pub fn fixed(bandwidth: usize) -> impl Fn(&ScheduleContext) -> usize + Send + Sync {
    assert!(bandwidth >= 1, "fixed bandwidth must be at least 1");
    move |_context| bandwidth
}

/// Hysteresis controller over an ascending ladder of candidate bandwidths.
///
/// Locates the current bandwidth on the ladder, moves one rung up when the
/// step improved on the previous step's best value and one rung down
/// otherwise, clamped to the ladder's ends. A current bandwidth that is
/// not on the ladder snaps to the lowest rung.
///
/// # Panics
/// Panics immediately on an empty ladder or a ladder containing 0.
pub fn adaptive_ladder(rungs: Vec<usize>) -> impl Fn(&ScheduleContext) -> usize + Send + Sync {
    assert!(!rungs.is_empty(), "bandwidth ladder must not be empty");
    assert!(
        rungs.iter().all(|&r| r >= 1),
        "bandwidth ladder rungs must be at least 1"
    );
    move |context| {
        let at = rungs
            .iter()
            .position(|&r| r == context.bandwidth)
            .unwrap_or(0);
        let at = if context.best > context.previous_best {
            (at + 1).min(rungs.len() - 1)
        } else {
            at.saturating_sub(1)
        };
        rungs[at]
    }
}
