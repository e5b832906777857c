//! Rotation arithmetic for mapping wheel rotations to segments.
//!
//! Pointer convention: the pointer is fixed at the wheel's 0° reference
//! mark. Rotating the wheel clockwise by `r` degrees carries segment 0
//! *away* from the pointer by `r`, so the segment left under the pointer is
//! the one found by walking the same distance in the opposite direction:
//! `(360 - normalize(r)) % 360`. Winner resolution and the snap round-trip
//! tests rely on this exact arithmetic; do not reorder it.
//!
//! All functions taking a `segment_count` require it to be nonzero; the
//! engine rejects empty wheels before calling in here.

use crate::constants::{FULL_TURN_DEGREES, HALF_TURN_DEGREES};
use crate::numbers::{floor_f32_to_usize, usize_to_f32};

/// Normalize a rotation of any sign and magnitude into `[0, 360)`.
#[must_use]
pub fn normalize_rotation(rotation: f32) -> f32 {
    ((rotation % FULL_TURN_DEGREES) + FULL_TURN_DEGREES) % FULL_TURN_DEGREES
}

/// Angle in segment-lookup space for a visual rotation (see module docs).
#[must_use]
pub fn pointer_offset(rotation: f32) -> f32 {
    (FULL_TURN_DEGREES - normalize_rotation(rotation)) % FULL_TURN_DEGREES
}

/// Arc width in degrees of one segment on an equal-partition wheel.
#[must_use]
pub fn segment_arc(segment_count: usize) -> f32 {
    FULL_TURN_DEGREES / usize_to_f32(segment_count)
}

/// Index of the segment under the pointer after `rotation` degrees.
#[must_use]
pub fn segment_index(rotation: f32, segment_count: usize) -> usize {
    let raw = floor_f32_to_usize(pointer_offset(rotation) / segment_arc(segment_count));
    raw % segment_count
}

/// Center angle of segment `index` on an unrotated wheel.
#[must_use]
pub fn segment_center(index: usize, segment_count: usize) -> f32 {
    let arc = segment_arc(segment_count);
    usize_to_f32(index) * arc + arc / 2.0
}

/// Minimal signed adjustment in `[-180, 180]` that, added to `rotation`,
/// parks the center of segment `index` exactly under the pointer.
#[must_use]
pub fn snap_adjustment(rotation: f32, index: usize, segment_count: usize) -> f32 {
    let center = segment_center(index, segment_count);
    let target = (FULL_TURN_DEGREES - center) % FULL_TURN_DEGREES;
    let mut delta = target - normalize_rotation(rotation);
    if delta > HALF_TURN_DEGREES {
        delta -= FULL_TURN_DEGREES;
    } else if delta < -HALF_TURN_DEGREES {
        delta += FULL_TURN_DEGREES;
    }
    delta
}
