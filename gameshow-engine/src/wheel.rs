//! The spinning wheel: live layout, spin generation, and winner resolution.
//!
//! The engine answers two questions — what parameters should a new spin
//! use, and which segment won once the wheel stopped — and owns the layout
//! mutations around them (shuffles, recolors, preset swaps, add/remove).
//! Animation timing belongs to the host; the engine's state machine is the
//! pair of Idle/Spinning flags guarding overlapping spins.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::action::GameAction;
use crate::angles;
use crate::constants::{
    BASE_ROTATIONS, DEFAULT_CANVAS_SIZE, DEFAULT_SPIN_DURATION_MS, EXTRA_ROTATIONS_MAX,
    FULL_TURN_DEGREES, MAX_SEGMENTS, MAX_SPIN_DURATION_MS, MIN_SPIN_DURATION_MS,
};
use crate::numbers::usize_to_f32;
use crate::presets::{WheelPreset, original_table};
use crate::rng::WheelRng;
use crate::segment::{Segment, SegmentConfig, SegmentList, random_soft_color};

/// Errors surfaced by wheel operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WheelError {
    /// Spun, resolved, or configured against zero segments.
    #[error("wheel has no segments")]
    EmptyWheel,
    /// A spin was started while another is still in progress.
    #[error("wheel is already spinning")]
    AlreadySpinning,
    /// The layout is full.
    #[error("wheel cannot hold more than {max} segments")]
    SegmentLimit { max: usize },
    /// No segment carries the requested id.
    #[error("no segment with id {id}")]
    UnknownSegment { id: u32 },
}

/// Wheel layout and display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelConfig {
    pub segments: SegmentList,
    #[serde(default = "default_canvas_size")]
    pub canvas_size: u32,
    #[serde(default = "default_spin_duration_ms")]
    pub spin_duration_ms: u32,
}

const fn default_canvas_size() -> u32 {
    DEFAULT_CANVAS_SIZE
}

const fn default_spin_duration_ms() -> u32 {
    DEFAULT_SPIN_DURATION_MS
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            segments: SegmentList::new(),
            canvas_size: default_canvas_size(),
            spin_duration_ms: default_spin_duration_ms(),
        }
    }
}

/// Parameters for one spin animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinPlan {
    /// Degrees the host should add to the wheel's current rotation.
    pub total_rotation: f32,
    pub duration_ms: u32,
}

/// Outcome of resolving a final rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinResult {
    pub segment: Segment,
    /// Absolute rotation the wheel should rest at, after any snapping.
    pub final_angle: f32,
    pub duration_ms: u32,
    /// Winning label, upper-cased for the announcement banner.
    pub winner_text: String,
}

/// Aggregate facts about the current layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelStats {
    pub total_segments: usize,
    /// Distinct actions in first-appearance order.
    pub actions: Vec<GameAction>,
    pub action_counts: HashMap<GameAction, usize>,
    pub spin_duration_ms: u32,
    pub is_spinning: bool,
}

/// The wheel engine. Hosts construct one explicitly and keep it for the
/// lifetime of their wheel view; there is no shared global instance.
#[derive(Debug, Clone)]
pub struct WheelEngine {
    config: WheelConfig,
    rng: WheelRng,
    spinning: bool,
}

impl WheelEngine {
    /// Hard cap on layout size.
    pub const MAX_SEGMENTS: usize = MAX_SEGMENTS;

    /// Engine with the original eleven-segment layout, seeded from OS
    /// entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(WheelRng::from_entropy())
    }

    /// Deterministic engine for replays and tests.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(WheelRng::from_user_seed(seed))
    }

    fn with_rng(mut rng: WheelRng) -> Self {
        let segments = build_segments(&original_table(), 0.0, rng.styling());
        Self {
            config: WheelConfig {
                segments,
                ..WheelConfig::default()
            },
            rng,
            spinning: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.config.segments
    }

    #[must_use]
    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    /// Update the spin duration, clamped into the supported range.
    pub fn set_spin_duration(&mut self, duration_ms: u32) {
        self.config.spin_duration_ms =
            duration_ms.clamp(MIN_SPIN_DURATION_MS, MAX_SPIN_DURATION_MS);
    }

    /// Draw randomized parameters for the next spin.
    ///
    /// The total rotation is at least five full turns, so the animation
    /// always reads as a committed spin.
    ///
    /// # Errors
    ///
    /// Returns [`WheelError::EmptyWheel`] when the layout has no segments.
    pub fn generate_spin(&mut self) -> Result<SpinPlan, WheelError> {
        if self.config.segments.is_empty() {
            return Err(WheelError::EmptyWheel);
        }
        let extra = self.rng.outcome().r#gen::<f32>() * EXTRA_ROTATIONS_MAX;
        let landing = self.rng.outcome().r#gen::<f32>() * FULL_TURN_DEGREES;
        Ok(SpinPlan {
            total_rotation: (BASE_ROTATIONS + extra) * FULL_TURN_DEGREES + landing,
            duration_ms: self.config.spin_duration_ms,
        })
    }

    /// Mark the wheel spinning and hand back the parameters for the run.
    ///
    /// # Errors
    ///
    /// Returns [`WheelError::AlreadySpinning`] while a spin is in progress,
    /// or [`WheelError::EmptyWheel`] for an empty layout.
    pub fn start_spin(&mut self) -> Result<SpinPlan, WheelError> {
        if self.spinning {
            return Err(WheelError::AlreadySpinning);
        }
        let plan = self.generate_spin()?;
        self.spinning = true;
        Ok(plan)
    }

    /// Clear the spinning flag. Safe to call at any time.
    pub fn stop_spin(&mut self) {
        self.spinning = false;
    }

    /// Resolve which segment sits under the pointer after the wheel stops
    /// at `final_rotation` degrees (any sign, any number of turns).
    ///
    /// With `snap_to_center` the reported angle is adjusted by the minimal
    /// signed amount that parks the winner's midpoint exactly under the
    /// pointer; the winning segment itself never changes.
    ///
    /// # Errors
    ///
    /// Returns [`WheelError::EmptyWheel`] when the layout has no segments.
    pub fn resolve_winner(
        &self,
        final_rotation: f32,
        snap_to_center: bool,
    ) -> Result<SpinResult, WheelError> {
        let count = self.config.segments.len();
        if count == 0 {
            return Err(WheelError::EmptyWheel);
        }
        let index = angles::segment_index(final_rotation, count);
        let segment = self.config.segments[index].clone();
        let final_angle = if snap_to_center {
            final_rotation + angles::snap_adjustment(final_rotation, index, count)
        } else {
            final_rotation
        };
        let winner_text = segment.text.to_uppercase();
        Ok(SpinResult {
            segment,
            final_angle,
            duration_ms: self.config.spin_duration_ms,
            winner_text,
        })
    }

    /// Reassign every segment's color from the soft palette, with
    /// replacement. Logic fields and angles are untouched.
    pub fn randomize_colors(&mut self) {
        for segment in &mut self.config.segments {
            segment.color = random_soft_color(self.rng.styling());
        }
    }

    /// Shuffle the segment order with Fisher–Yates, then re-partition the
    /// circle and reroll colors. Identity (`id`, `text`, `action`) travels
    /// with each segment; only position, angle, and color change.
    pub fn shuffle_segments(&mut self) {
        let count = self.config.segments.len();
        if count == 0 {
            return;
        }
        // Order decides winners, so the swaps draw from the outcome stream.
        for i in (1..count).rev() {
            let j = self.rng.outcome().gen_range(0..=i);
            self.config.segments.swap(i, j);
        }
        let arc = angles::segment_arc(count);
        for (index, segment) in self.config.segments.iter_mut().enumerate() {
            segment.angle = usize_to_f32(index) * arc;
            segment.color = random_soft_color(self.rng.styling());
        }
    }

    /// Replace the whole layout from a blueprint list.
    ///
    /// Ids default to the zero-based position when absent. Angles are laid
    /// out from `start_angle` and deliberately not normalized, so a start
    /// angle of 180 over three segments yields 180/300/420.
    ///
    /// # Errors
    ///
    /// Returns [`WheelError::EmptyWheel`] for an empty blueprint list and
    /// [`WheelError::SegmentLimit`] when it exceeds the cap.
    pub fn set_segments(
        &mut self,
        configs: &[SegmentConfig],
        start_angle: f32,
    ) -> Result<(), WheelError> {
        if configs.is_empty() {
            return Err(WheelError::EmptyWheel);
        }
        if configs.len() > MAX_SEGMENTS {
            return Err(WheelError::SegmentLimit { max: MAX_SEGMENTS });
        }
        self.config.segments = build_segments(configs, start_angle, self.rng.styling());
        Ok(())
    }

    /// Swap in one of the stock layouts.
    pub fn apply_preset(&mut self, preset: WheelPreset) {
        // Stock layouts are never empty and never exceed the cap.
        self.config.segments = build_segments(&preset.segments(), 0.0, self.rng.styling());
    }

    /// Append a segment with the next free id and re-partition the circle.
    ///
    /// # Errors
    ///
    /// Returns [`WheelError::SegmentLimit`] when the wheel is full.
    pub fn add_segment(
        &mut self,
        text: impl Into<String>,
        action: GameAction,
    ) -> Result<u32, WheelError> {
        if self.config.segments.len() >= MAX_SEGMENTS {
            return Err(WheelError::SegmentLimit { max: MAX_SEGMENTS });
        }
        let id = self
            .config
            .segments
            .iter()
            .map(|segment| segment.id)
            .max()
            .map_or(0, |max| max + 1);
        let color = random_soft_color(self.rng.styling());
        self.config.segments.push(Segment {
            id,
            text: text.into(),
            action,
            color,
            angle: 0.0,
        });
        self.repartition();
        Ok(id)
    }

    /// Remove the segment with `id` and re-partition the remainder.
    /// Draining the wheel is allowed; spins then fail until it is refilled.
    ///
    /// # Errors
    ///
    /// Returns [`WheelError::UnknownSegment`] when no segment matches.
    pub fn remove_segment(&mut self, id: u32) -> Result<Segment, WheelError> {
        let index = self
            .config
            .segments
            .iter()
            .position(|segment| segment.id == id)
            .ok_or(WheelError::UnknownSegment { id })?;
        let removed = self.config.segments.remove(index);
        self.repartition();
        Ok(removed)
    }

    /// Aggregate facts about the current layout.
    #[must_use]
    pub fn stats(&self) -> WheelStats {
        let mut actions = Vec::new();
        let mut action_counts: HashMap<GameAction, usize> = HashMap::new();
        for segment in &self.config.segments {
            let count = action_counts.entry(segment.action).or_insert(0);
            if *count == 0 {
                actions.push(segment.action);
            }
            *count += 1;
        }
        WheelStats {
            total_segments: self.config.segments.len(),
            actions,
            action_counts,
            spin_duration_ms: self.config.spin_duration_ms,
            is_spinning: self.spinning,
        }
    }

    /// Restore the original layout, default display settings, and the Idle
    /// state.
    pub fn reset(&mut self) {
        let segments = build_segments(&original_table(), 0.0, self.rng.styling());
        self.config = WheelConfig {
            segments,
            ..WheelConfig::default()
        };
        self.spinning = false;
    }

    fn repartition(&mut self) {
        let count = self.config.segments.len();
        if count == 0 {
            return;
        }
        let arc = angles::segment_arc(count);
        for (index, segment) in self.config.segments.iter_mut().enumerate() {
            segment.angle = usize_to_f32(index) * arc;
        }
    }
}

impl Default for WheelEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn build_segments<R: Rng>(
    configs: &[SegmentConfig],
    start_angle: f32,
    rng: &mut R,
) -> SegmentList {
    let arc = FULL_TURN_DEGREES / usize_to_f32(configs.len());
    configs
        .iter()
        .enumerate()
        .map(|(index, config)| Segment {
            id: config
                .id
                .unwrap_or_else(|| u32::try_from(index).unwrap_or(u32::MAX)),
            text: config.text.clone(),
            action: config.action,
            color: random_soft_color(&mut *rng),
            angle: start_angle + usize_to_f32(index) * arc,
        })
        .collect()
}
