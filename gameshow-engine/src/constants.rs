//! Centralized tuning constants for the wheel and score logic.
//!
//! These values define the deterministic math for spin generation and
//! winner resolution. Keeping them together ensures the game can only be
//! re-tuned via code changes reviewed in version control, rather than
//! through external configuration assets.

// Wheel geometry -----------------------------------------------------------
pub(crate) const FULL_TURN_DEGREES: f32 = 360.0;
pub(crate) const HALF_TURN_DEGREES: f32 = 180.0;
pub(crate) const MAX_SEGMENTS: usize = 12;

// Spin parameters ----------------------------------------------------------
pub(crate) const BASE_ROTATIONS: f32 = 5.0;
pub(crate) const EXTRA_ROTATIONS_MAX: f32 = 2.0;
pub(crate) const MIN_SPIN_DURATION_MS: u32 = 1_000;
pub(crate) const MAX_SPIN_DURATION_MS: u32 = 10_000;
pub(crate) const DEFAULT_SPIN_DURATION_MS: u32 = 3_000;

// Display defaults ---------------------------------------------------------
pub(crate) const DEFAULT_CANVAS_SIZE: u32 = 600;

// Segment styling ----------------------------------------------------------
pub(crate) const SOFT_COLORS: [&str; 11] = [
    "#F8F9FA", // very light white
    "#F1F3F4", // light gray-white
    "#F5F5DC", // light beige
    "#F0E68C", // light khaki
    "#F0F8FF", // light azure
    "#F0FFF0", // light honeydew
    "#F5FFFA", // light mint cream
    "#FFF8DC", // light cornsilk
    "#FDF5E6", // light old lace
    "#F0F8FF", // light alice blue
    "#F5F5F5", // light gray
];

// Score board --------------------------------------------------------------
pub(crate) const DEFAULT_PLAYER_COUNT: usize = 3;
pub(crate) const FIRST_ROUND: u32 = 1;
