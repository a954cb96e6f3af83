//! Core type definitions: dimensionality, callback signatures, run options,
//! and the result snapshot.

use std::fmt;

use crate::error::{LogoError, Result, TerminationReason};

// ──────────────────────────────────────────────────────────────────────────────
// Dimensionality
// ──────────────────────────────────────────────────────────────────────────────

/// Number of dimensions of the search domain, fixed at compile time.
///
/// The engine always searches the unit hypercube `[0,1]^DIM`; any rescaling
/// to an application domain is the objective function's responsibility. The
/// design generalizes to any fixed dimensionality by changing this constant.
pub const DIM: usize = 2;

/// A point in the unit hypercube.
pub type Point = [f64; DIM];

// ──────────────────────────────────────────────────────────────────────────────
// Callback signatures
// ──────────────────────────────────────────────────────────────────────────────

/// Objective function signature.
///
/// Receives a point in `[0,1]^DIM` and returns the value to maximize. Must
/// be a pure, total function: no side effects visible to the engine, a
/// finite value for every point in the domain. Domain rescaling (e.g. to
/// `[-5,10]` per axis) belongs inside the callback.
pub type ObjectiveFn = dyn Fn(&Point) -> f64 + Send + Sync;

/// Depth-budget function signature.
///
/// Receives the cumulative sample count and returns how deep the partition
/// is worth refining at that point of the run (`hmax(n)`, e.g. `sqrt(n)`).
/// Must be non-negative and should be slowly increasing; a budget that
/// shrinks over time can starve the selection sweep of candidate bands and
/// stall the run without consuming samples.
pub type DepthBudgetFn = dyn Fn(usize) -> f64 + Send + Sync;

// ──────────────────────────────────────────────────────────────────────────────
// Options
// ──────────────────────────────────────────────────────────────────────────────

/// Sentinel for an unknown global optimum.
///
/// With an unknown optimum the relative error is infinite, so the run
/// terminates on the sample budget alone.
pub const UNKNOWN_OPTIMUM: f64 = f64::INFINITY;

/// Configuration for one optimization run, immutable once the run starts.
///
/// The objective, depth-budget, and schedule callbacks are passed to
/// [`crate::logo::Logo::new`] alongside this plain-data struct.
#[derive(Debug, Clone)]
pub struct LogoOptions {
    /// Maximum number of objective evaluations.
    pub max_samples: usize,

    /// Number of children per split (`k`). Must be odd and at least 3 so
    /// that the middle child shares its center with the parent and can
    /// inherit the parent's value without a fresh evaluation.
    pub split_factor: usize,

    /// Bandwidth used by the first selection sweep; the schedule policy
    /// takes over from the second step onward.
    pub init_bandwidth: usize,

    /// Target accuracy relative to the known optimum.
    pub epsilon: f64,

    /// Known global optimum, or [`UNKNOWN_OPTIMUM`] to run until the
    /// budget is exhausted.
    pub optimum: f64,
}

impl Default for LogoOptions {
    /// Defaults matching the published LOGO reference configuration:
    /// trisection, single-depth bands, 1e-4 target accuracy, unknown
    /// optimum, 8000-sample budget.
    fn default() -> Self {
        Self {
            max_samples: 8000,
            split_factor: 3,
            init_bandwidth: 1,
            epsilon: 1e-4,
            optimum: UNKNOWN_OPTIMUM,
        }
    }
}

impl LogoOptions {
    /// Check the option contract.
    ///
    /// # Errors
    /// Returns the first violated constraint: even `split_factor`,
    /// `split_factor < 3`, zero `max_samples`, or zero `init_bandwidth`.
    /// Called by the optimizer constructor before any sampling occurs.
    pub fn validate(&self) -> Result<()> {
        if self.split_factor % 2 == 0 {
            return Err(LogoError::EvenSplitFactor(self.split_factor));
        }
        if self.split_factor < 3 {
            return Err(LogoError::SplitFactorTooSmall(self.split_factor));
        }
        if self.max_samples == 0 {
            return Err(LogoError::ZeroSampleBudget);
        }
        if self.init_bandwidth == 0 {
            return Err(LogoError::ZeroBandwidth);
        }
        Ok(())
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Result
// ──────────────────────────────────────────────────────────────────────────────

/// Immutable snapshot of a finished run.
#[derive(Debug, Clone)]
pub struct LogoResult {
    /// Center of the best cell found, in unit-hypercube coordinates.
    pub point: Point,

    /// Best objective value found.
    pub value: f64,

    /// Total number of objective evaluations.
    pub samples: usize,

    /// Total number of selection steps.
    pub steps: usize,

    /// Why the run stopped.
    pub termination: TerminationReason,

    /// Human-readable description of the termination reason.
    pub message: String,
}

impl LogoResult {
    /// Assemble a result snapshot.
    pub fn new(
        point: Point,
        value: f64,
        samples: usize,
        steps: usize,
        termination: TerminationReason,
    ) -> Self {
        let message = format!("{}", termination);
        Self {
            point,
            value,
            samples,
            steps,
            termination,
            message,
        }
    }
}

impl fmt::Display for LogoResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "LogoResult {{")?;
        writeln!(f, "  message: {}", self.message)?;
        writeln!(f, "  value: {:.15e}", self.value)?;
        write!(f, "  point: [")?;
        for (i, xi) in self.point.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.15e}", xi)?;
        }
        writeln!(f, "]")?;
        writeln!(f, "  samples: {}", self.samples)?;
        writeln!(f, "  steps: {}", self.steps)?;
        write!(f, "}}")
    }
}
