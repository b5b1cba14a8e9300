//! Load-dependent travel-time functions.
//!
//! A cost function maps the number of occupants on a link to the time it
//! takes to traverse it. The common traffic models are plain variants so they
//! can be inspected and labelled; anything else goes through
//! [`CostFunction::Custom`].

use std::fmt;
use std::sync::Arc;

/// Maps link occupancy to travel time.
#[derive(Clone)]
pub enum CostFunction {
    /// Fixed travel time regardless of load.
    Constant(f64),
    /// `per_occupant * N + offset`.
    Linear { per_occupant: f64, offset: f64 },
    /// Piecewise-constant: the cost of the highest breakpoint whose threshold
    /// is `<=` the occupancy, or 0 below every threshold.
    Step(Vec<(u64, f64)>),
    /// Arbitrary caller-supplied function.
    Custom(Arc<dyn Fn(u64) -> f64 + Send + Sync>),
}

impl CostFunction {
    /// Fixed travel time.
    pub fn constant(cost: f64) -> Self {
        Self::Constant(cost)
    }

    /// Travel time proportional to occupancy.
    pub fn linear(per_occupant: f64) -> Self {
        Self::Linear {
            per_occupant,
            offset: 0.0,
        }
    }

    /// Travel time growing linearly from a free-flow base.
    pub fn affine(per_occupant: f64, offset: f64) -> Self {
        Self::Linear {
            per_occupant,
            offset,
        }
    }

    /// Piecewise-constant travel time.
    pub fn step(breakpoints: impl IntoIterator<Item = (u64, f64)>) -> Self {
        let mut breakpoints: Vec<_> = breakpoints.into_iter().collect();
        breakpoints.sort_by_key(|&(threshold, _)| threshold);
        Self::Step(breakpoints)
    }

    /// Wrap an arbitrary function.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(u64) -> f64 + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Travel time for the given occupancy.
    pub fn evaluate(&self, occupancy: u64) -> f64 {
        match self {
            Self::Constant(cost) => *cost,
            Self::Linear {
                per_occupant,
                offset,
            } => per_occupant * occupancy as f64 + offset,
            Self::Step(breakpoints) => breakpoints
                .iter()
                .filter(|&&(threshold, _)| threshold <= occupancy)
                .max_by_key(|&&(threshold, _)| threshold)
                .map_or(0.0, |&(_, cost)| cost),
            Self::Custom(f) => f(occupancy),
        }
    }

    /// Short human-readable form, e.g. `t=45` or `t=0.01N`.
    pub fn describe(&self) -> String {
        match self {
            Self::Constant(cost) => format!("t={cost}"),
            Self::Linear {
                per_occupant,
                offset,
            } if *offset == 0.0 => format!("t={per_occupant}N"),
            Self::Linear {
                per_occupant,
                offset,
            } => format!("t={per_occupant}N+{offset}"),
            Self::Step(breakpoints) => format!("t=step({})", breakpoints.len()),
            Self::Custom(_) => "t=f(N)".to_string(),
        }
    }
}

impl fmt::Debug for CostFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(cost) => f.debug_tuple("Constant").field(cost).finish(),
            Self::Linear {
                per_occupant,
                offset,
            } => f
                .debug_struct("Linear")
                .field("per_occupant", per_occupant)
                .field("offset", offset)
                .finish(),
            Self::Step(breakpoints) => f.debug_tuple("Step").field(breakpoints).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl fmt::Display for CostFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_ignores_load() {
        let f = CostFunction::constant(45.0);
        assert_eq!(f.evaluate(0), 45.0);
        assert_eq!(f.evaluate(10_000), 45.0);
    }

    #[test]
    fn linear_scales_with_load() {
        let f = CostFunction::linear(0.01);
        assert_eq!(f.evaluate(0), 0.0);
        assert!((f.evaluate(4000) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn affine_starts_at_offset() {
        let f = CostFunction::affine(2.0, 5.0);
        assert_eq!(f.evaluate(0), 5.0);
        assert_eq!(f.evaluate(3), 11.0);
    }

    #[test]
    fn step_picks_highest_reached_threshold() {
        let f = CostFunction::step([(10, 20.0), (0, 5.0), (5, 10.0)]);
        assert_eq!(f.evaluate(0), 5.0);
        assert_eq!(f.evaluate(4), 5.0);
        assert_eq!(f.evaluate(5), 10.0);
        assert_eq!(f.evaluate(9), 10.0);
        assert_eq!(f.evaluate(1000), 20.0);
    }

    #[test]
    fn step_below_first_threshold_is_free() {
        let f = CostFunction::step([(3, 7.0)]);
        assert_eq!(f.evaluate(2), 0.0);
        assert_eq!(f.evaluate(3), 7.0);
    }

    #[test]
    fn custom_calls_through() {
        let f = CostFunction::custom(|n| (n * n) as f64);
        assert_eq!(f.evaluate(3), 9.0);
    }

    #[test]
    fn describe_matches_model() {
        assert_eq!(CostFunction::constant(45.0).describe(), "t=45");
        assert_eq!(CostFunction::linear(0.01).describe(), "t=0.01N");
        assert_eq!(CostFunction::affine(1.0, 2.0).describe(), "t=1N+2");
        assert_eq!(CostFunction::custom(|_| 0.0).to_string(), "t=f(N)");
    }

    #[test]
    fn debug_hides_closure() {
        let f = CostFunction::custom(|_| 1.0);
        assert_eq!(format!("{f:?}"), "Custom(..)");
    }
}
