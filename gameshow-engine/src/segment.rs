//! Wheel segment data model.

use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::action::GameAction;
use crate::constants::{MAX_SEGMENTS, SOFT_COLORS};

/// Segment storage for a wheel. Wheels are capped at [`MAX_SEGMENTS`]
/// entries, so the list always fits inline.
pub type SegmentList = SmallVec<[Segment; MAX_SEGMENTS]>;

/// One arc of the wheel.
///
/// `id` is the segment's identity: it stays with the segment across
/// shuffles, while `angle` describes the segment's current position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: u32,
    pub text: String,
    pub action: GameAction,
    #[serde(default = "default_color")]
    pub color: String,
    pub angle: f32,
}

fn default_color() -> String {
    SOFT_COLORS[0].to_string()
}

/// Blueprint for one segment when replacing a wheel's layout.
///
/// `id` is optional; absent ids are filled in from the zero-based position
/// in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentConfig {
    pub text: String,
    pub action: GameAction,
    #[serde(default)]
    pub id: Option<u32>,
}

impl SegmentConfig {
    #[must_use]
    pub fn new(text: impl Into<String>, action: GameAction) -> Self {
        Self {
            text: text.into(),
            action,
            id: None,
        }
    }

    #[must_use]
    pub fn with_id(text: impl Into<String>, action: GameAction, id: u32) -> Self {
        Self {
            text: text.into(),
            action,
            id: Some(id),
        }
    }
}

/// Sample one display color from the soft palette, with replacement.
pub(crate) fn random_soft_color<R: Rng>(rng: &mut R) -> String {
    let idx = rng.gen_range(0..SOFT_COLORS.len());
    SOFT_COLORS[idx].to_string()
}
