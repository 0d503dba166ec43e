//! Clip parameters.

use polyclip_math::Tolerance;
use serde::{Deserialize, Serialize};

use crate::error::{ClipError, Result};

/// How the boundary loop is traced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceStrategy {
    /// Split every crossing up front, then walk the relevant-edge cycle.
    #[default]
    Eager,
    /// Walk the rings and resolve crossings as they are reached.
    Lazy,
}

/// Clipping parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipSettings {
    /// Step ceiling for the tracer and the crossing-split pass.
    pub max_iterations: usize,
    /// On-edge and point-in-polygon tolerance.
    pub epsilon: f64,
    /// Determinant magnitude below which two segments are parallel.
    pub parallel_epsilon: f64,
    /// Tracing strategy.
    pub strategy: TraceStrategy,
    /// Use the half-plane clipper when no edges cross and the clip is convex.
    pub convex_fast_path: bool,
}

impl Default for ClipSettings {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            epsilon: Tolerance::DEFAULT.linear,
            parallel_epsilon: Tolerance::DEFAULT.parallel,
            strategy: TraceStrategy::Eager,
            convex_fast_path: true,
        }
    }
}

impl ClipSettings {
    /// Default settings with the lazy tracer.
    pub fn lazy() -> Self {
        Self {
            strategy: TraceStrategy::Lazy,
            ..Self::default()
        }
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(ClipError::InvalidSettings(
                "max_iterations must be at least 1".into(),
            ));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(ClipError::InvalidSettings(
                "epsilon must be positive and finite".into(),
            ));
        }
        if !self.parallel_epsilon.is_finite() || self.parallel_epsilon <= 0.0 {
            return Err(ClipError::InvalidSettings(
                "parallel_epsilon must be positive and finite".into(),
            ));
        }
        Ok(())
    }

    /// Tolerances as a math-crate value.
    pub fn tolerance(&self) -> Tolerance {
        Tolerance {
            linear: self.epsilon,
            parallel: self.parallel_epsilon,
        }
    }
}
