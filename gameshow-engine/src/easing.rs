//! Deceleration curves for the animation collaborator.
//!
//! The engine owns no frame loop or timer. Hosts sample these curves once
//! per frame to ease the wheel from its current rotation toward a spin
//! target, then hand the final rotation back for winner resolution.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// `1 - (1 - t)^2`, the companion's house curve.
    #[default]
    QuadOut,
    /// `1 - (1 - t)^3`, a steeper tail for hosts that want a harder brake.
    CubicOut,
}

impl Easing {
    /// Eased value for linear progress `t`; input is clamped into `[0, 1]`.
    #[must_use]
    pub fn apply(self, progress: f32) -> f32 {
        let inv = 1.0 - progress.clamp(0.0, 1.0);
        match self {
            Self::QuadOut => 1.0 - inv * inv,
            Self::CubicOut => 1.0 - inv * inv * inv,
        }
    }
}

/// Rotation between `start` and `target` at eased `progress`.
#[must_use]
pub fn interpolate(start: f32, target: f32, progress: f32, easing: Easing) -> f32 {
    start + (target - start) * easing.apply(progress)
}
