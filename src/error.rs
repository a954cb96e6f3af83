//! Error and termination types for the LOGO optimizer.
//!
//! Two distinct failure classes exist. Recoverable configuration errors
//! (an even split factor, a zero sample budget) are reported as [`LogoError`]
//! values before any sampling happens. Internal contract violations
//! (removing a node that is not in its depth list, finishing a run that is
//! not done, a schedule policy returning a zero bandwidth) are programming
//! errors and panic instead of returning: continuing would operate on a
//! corrupted partition.

use thiserror::Error;

/// Why a finished run stopped.
///
/// Assigned once when the result snapshot is taken; both reasons are
/// successful terminations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The best sampled value came within `epsilon` of the known optimum.
    TargetAccuracy,
    /// The sample budget was exhausted before the accuracy target was met
    /// (always the reason when the optimum is unknown).
    BudgetExhausted,
}

impl TerminationReason {
    /// Returns true if the run stopped because the accuracy target was met.
    pub fn is_accuracy(&self) -> bool {
        matches!(self, Self::TargetAccuracy)
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TargetAccuracy => write!(f, "Best value within epsilon of the known optimum"),
            Self::BudgetExhausted => write!(f, "Sample budget exhausted"),
        }
    }
}

/// Errors reported when constructing an optimizer from invalid options.
///
/// All variants are detected by [`crate::types::LogoOptions::validate`]
/// before the objective function is called even once.
#[derive(Error, Debug)]
pub enum LogoError {
    #[error("split factor k must be odd, got {0}")]
    EvenSplitFactor(usize),

    #[error("split factor k must be at least 3, got {0}")]
    SplitFactorTooSmall(usize),

    #[error("sample budget must be at least 1")]
    ZeroSampleBudget,

    #[error("initial bandwidth must be at least 1")]
    ZeroBandwidth,
}

/// Result type alias for optimizer construction.
pub type Result<T> = std::result::Result<T, LogoError>;
