//! # logo-opt: banded optimistic global optimization
//!
//! A derivative-free global maximizer for black-box functions over the
//! unit hypercube, implementing the LOGO/SOO family of optimistic
//! space-partitioning algorithms.
//!
//! ## Overview
//!
//! The search maintains a partition of `[0,1]^2` into axis-aligned cells,
//! each carrying the objective value sampled at its center, organized in
//! per-depth lists. Every step groups the depths into bands of `w`
//! consecutive levels and expands the best cell of each band whose value
//! strictly exceeds the best of all shallower bands. That is the
//! optimistic rule: only regions that could plausibly contain a better
//! optimum than anything found so far are refined. Expansion trisects
//! (more generally,
//! `k`-sects with odd `k`) a cell along one axis, cycling the split axis
//! with depth; the middle child shares the parent's center and inherits
//! its value without spending budget.
//!
//! With a fixed bandwidth of 1 this is the classical SOO selection rule;
//! the adaptive bandwidth ladder recovers LOGO.
//!
//! ## Usage
//!
//! ```
//! use logo_opt::{schedule, Logo, LogoOptions, Point};
//!
//! let options = LogoOptions {
//!     max_samples: 200,
//!     optimum: 0.0,
//!     ..Default::default()
//! };
//! let mut search = Logo::new(
//!     |p: &Point| -((p[0] - 0.5).powi(2) + (p[1] - 0.5).powi(2)),
//!     |n| (n as f64).sqrt(),
//!     schedule::fixed(1),
//!     options,
//! )
//! .unwrap();
//! let result = search.optimize();
//! assert!(result.samples <= 200);
//! ```
//!
//! ## References
//!
//! - Munos, R. "Optimistic Optimization of a Deterministic Function
//!   without the Knowledge of its Smoothness." NIPS 2011 (SOO).
//! - Kawaguchi, K., Maruyama, Y. & Zheng, X. "Global Continuous
//!   Optimization with Error Bound and Fast Convergence." JAIR 56,
//!   153–195 (2016) (LOGO).

pub mod error;
pub mod logo;
pub mod schedule;
pub mod space;
pub mod trace;
pub mod types;

// Re-export main types
pub use error::{LogoError, Result, TerminationReason};
pub use logo::Logo;
pub use schedule::{ScheduleContext, DEFAULT_LADDER};
pub use types::{LogoOptions, LogoResult, Point, DIM, UNKNOWN_OPTIMUM};
