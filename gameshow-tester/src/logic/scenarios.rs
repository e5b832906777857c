//! The scenario catalog: named, seedable checks against the engine.
//!
//! Every check takes one iteration seed and either returns `Ok` or an
//! error describing exactly which expectation broke. Checks draw any
//! auxiliary randomness from their own `SmallRng` so a failing seed
//! replays byte-for-byte.

use anyhow::{Result, anyhow, ensure};
use gameshow_engine::numbers::usize_to_f32;
use gameshow_engine::{
    GameAction, SegmentConfig, WheelEngine, WheelPreset, normalize_rotation, segment_index,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use regex::Regex;

const ANGLE_EPSILON: f32 = 1e-3;

pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    pub check: fn(u64) -> Result<()>,
}

pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "smoke",
        description: "Construct the default wheel, run one full spin cycle, resolve a winner",
        check: check_smoke,
    },
    Scenario {
        name: "spin-magnitude",
        description: "Generated spins always clear five turns and respect the duration clamp",
        check: check_spin_magnitude,
    },
    Scenario {
        name: "winner-periodicity",
        description: "Winner resolution is identical for rotations that differ by full turns",
        check: check_winner_periodicity,
    },
    Scenario {
        name: "snap-settle",
        description: "Center snapping stays within a half turn and never changes the winner",
        check: check_snap_settle,
    },
    Scenario {
        name: "shuffle-identity",
        description: "Shuffling reorders segments without losing ids, labels, or the angle grid",
        check: check_shuffle_identity,
    },
    Scenario {
        name: "color-stability",
        description: "Color rerolls are purely cosmetic and never disturb spin outcomes",
        check: check_color_stability,
    },
    Scenario {
        name: "partition",
        description: "Segment angles form an equal partition for every layout size",
        check: check_partition,
    },
    Scenario {
        name: "preset-catalog",
        description: "Every stock preset loads, round-trips its key, and colors in hex",
        check: check_preset_catalog,
    },
    Scenario {
        name: "determinism",
        description: "Two engines with the same seed replay the same session",
        check: check_determinism,
    },
    Scenario {
        name: "fairness",
        description: "Winners spread across all segments over a short sweep",
        check: check_fairness,
    },
];

pub fn get_scenario(name: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|scenario| scenario.name == name)
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS
        .iter()
        .map(|scenario| (scenario.name, scenario.description))
        .collect()
}

fn check_smoke(seed: u64) -> Result<()> {
    let mut engine = WheelEngine::seeded(seed);
    ensure!(
        engine.segments().len() == 11,
        "default layout should have 11 segments, found {}",
        engine.segments().len()
    );

    let plan = engine.start_spin()?;
    ensure!(engine.is_spinning(), "start_spin should mark the wheel spinning");
    ensure!(
        engine.start_spin().is_err(),
        "a second spin should be rejected while one is in progress"
    );

    let result = engine.resolve_winner(plan.total_rotation, true)?;
    ensure!(
        result.winner_text == result.segment.text.to_uppercase(),
        "winner text {:?} is not the upper-cased label of {:?}",
        result.winner_text,
        result.segment.text
    );
    ensure!(
        result.duration_ms == engine.config().spin_duration_ms,
        "result duration {}ms does not match the configured {}ms",
        result.duration_ms,
        engine.config().spin_duration_ms
    );

    engine.stop_spin();
    ensure!(!engine.is_spinning(), "stop_spin should clear the flag");

    let stats = engine.stats();
    ensure!(
        stats.total_segments == 11 && stats.action_counts.values().sum::<usize>() == 11,
        "stats should account for all 11 segments"
    );
    Ok(())
}

fn check_spin_magnitude(seed: u64) -> Result<()> {
    let mut engine = WheelEngine::seeded(seed);
    let mut rng = SmallRng::seed_from_u64(seed);
    for _ in 0..20 {
        engine.set_spin_duration(rng.gen_range(0..25_000));
        let plan = engine.generate_spin()?;
        ensure!(
            plan.total_rotation >= 1800.0,
            "spin of {} degrees is under the five-turn floor",
            plan.total_rotation
        );
        ensure!(
            plan.total_rotation < 2880.0,
            "spin of {} degrees exceeds the eight-turn ceiling",
            plan.total_rotation
        );
        ensure!(
            (1000..=10_000).contains(&plan.duration_ms),
            "duration {}ms escaped the clamp",
            plan.duration_ms
        );
    }
    Ok(())
}

/// Rotations on a half-degree grid stay exact through the modular
/// arithmetic, so shifting by full turns cannot drift across a segment
/// boundary.
fn half_degree_rotation(rng: &mut SmallRng) -> f32 {
    f32::from(rng.gen_range(-7200_i16..7200)) / 2.0
}

fn check_winner_periodicity(seed: u64) -> Result<()> {
    let mut engine = WheelEngine::seeded(seed);
    engine.apply_preset(WheelPreset::Six);
    let mut rng = SmallRng::seed_from_u64(seed);
    for _ in 0..10 {
        let rotation = half_degree_rotation(&mut rng);
        let base = engine.resolve_winner(rotation, false)?;
        for turns in [-3.0_f32, -1.0, 1.0, 2.0, 4.0] {
            let shifted = engine.resolve_winner(rotation + 360.0 * turns, false)?;
            ensure!(
                shifted.segment.id == base.segment.id,
                "rotations {} and {} disagree on the winner",
                rotation,
                rotation + 360.0 * turns
            );
        }
    }
    Ok(())
}

fn check_snap_settle(seed: u64) -> Result<()> {
    let mut engine = WheelEngine::seeded(seed);
    engine.apply_preset(WheelPreset::Eight);
    let mut rng = SmallRng::seed_from_u64(seed);
    for _ in 0..10 {
        let rotation = half_degree_rotation(&mut rng);
        let snapped = engine.resolve_winner(rotation, true)?;
        let adjustment = snapped.final_angle - rotation;
        ensure!(
            adjustment.abs() <= 180.0 + ANGLE_EPSILON,
            "snap adjustment {adjustment} is not the minimal arc"
        );
        let settled = engine.resolve_winner(snapped.final_angle, false)?;
        ensure!(
            settled.segment.id == snapped.segment.id,
            "re-resolving the snapped angle moved the winner from {} to {}",
            snapped.segment.id,
            settled.segment.id
        );
    }
    Ok(())
}

fn check_shuffle_identity(seed: u64) -> Result<()> {
    let mut engine = WheelEngine::seeded(seed);
    let before: Vec<(u32, String, GameAction)> = engine
        .segments()
        .iter()
        .map(|s| (s.id, s.text.clone(), s.action))
        .collect();
    let mut before_angles: Vec<f32> = engine.segments().iter().map(|s| s.angle).collect();

    engine.shuffle_segments();

    ensure!(
        engine.segments().len() == before.len(),
        "shuffle changed the segment count"
    );

    let mut before_ids: Vec<u32> = before.iter().map(|(id, _, _)| *id).collect();
    let mut after_ids: Vec<u32> = engine.segments().iter().map(|s| s.id).collect();
    before_ids.sort_unstable();
    after_ids.sort_unstable();
    ensure!(before_ids == after_ids, "shuffle changed the id multiset");

    let mut after_angles: Vec<f32> = engine.segments().iter().map(|s| s.angle).collect();
    before_angles.sort_by(f32::total_cmp);
    after_angles.sort_by(f32::total_cmp);
    for (before_angle, after_angle) in before_angles.iter().zip(&after_angles) {
        ensure!(
            (before_angle - after_angle).abs() < ANGLE_EPSILON,
            "shuffle changed the angle multiset"
        );
    }

    for segment in engine.segments() {
        let original = before
            .iter()
            .find(|(id, _, _)| *id == segment.id)
            .ok_or_else(|| anyhow!("segment id {} vanished in the shuffle", segment.id))?;
        ensure!(
            original.1 == segment.text && original.2 == segment.action,
            "identity did not travel with segment {}",
            segment.id
        );
    }
    Ok(())
}

fn check_color_stability(seed: u64) -> Result<()> {
    let mut quiet = WheelEngine::seeded(seed);
    let mut noisy = quiet.clone();

    let before: Vec<(u32, String, GameAction, f32)> = noisy
        .segments()
        .iter()
        .map(|s| (s.id, s.text.clone(), s.action, s.angle))
        .collect();
    noisy.randomize_colors();
    noisy.randomize_colors();

    for (segment, (id, text, action, angle)) in noisy.segments().iter().zip(&before) {
        ensure!(
            segment.id == *id && segment.text == *text && segment.action == *action,
            "color reroll disturbed the identity of segment {id}"
        );
        ensure!(
            (segment.angle - angle).abs() < ANGLE_EPSILON,
            "color reroll moved segment {id}"
        );
    }

    for _ in 0..5 {
        let quiet_plan = quiet.generate_spin()?;
        let noisy_plan = noisy.generate_spin()?;
        ensure!(
            quiet_plan == noisy_plan,
            "cosmetic rerolls shifted spin outcomes"
        );
    }
    Ok(())
}

fn check_partition(seed: u64) -> Result<()> {
    let mut engine = WheelEngine::seeded(seed);
    for preset in WheelPreset::ALL {
        engine.apply_preset(preset);
        ensure_equal_partition(&engine)?;
    }

    for count in 1..=WheelEngine::MAX_SEGMENTS {
        let configs: Vec<SegmentConfig> = (0..count)
            .map(|i| SegmentConfig::new(format!("Segment {i}"), GameAction::NewRule))
            .collect();
        engine.set_segments(&configs, 0.0)?;
        ensure_equal_partition(&engine)?;
    }

    engine.apply_preset(WheelPreset::Six);
    engine.add_segment("Extra", GameAction::Challenge)?;
    ensure_equal_partition(&engine)?;
    engine.remove_segment(0)?;
    ensure_equal_partition(&engine)?;
    Ok(())
}

fn ensure_equal_partition(engine: &WheelEngine) -> Result<()> {
    let count = engine.segments().len();
    let arc = 360.0 / usize_to_f32(count);
    let mut angles: Vec<f32> = engine.segments().iter().map(|s| s.angle).collect();
    angles.sort_by(f32::total_cmp);
    for (index, angle) in angles.iter().enumerate() {
        let expected = usize_to_f32(index) * arc;
        ensure!(
            (angle - expected).abs() < ANGLE_EPSILON,
            "angle {angle} deviates from the {count}-way partition slot {expected}"
        );
    }
    Ok(())
}

fn check_preset_catalog(seed: u64) -> Result<()> {
    let hex_color = Regex::new(r"(?i)^#[0-9A-F]{6}$")?;
    for preset in WheelPreset::ALL {
        let table = preset.segments();
        ensure!(!table.is_empty(), "preset {preset} has an empty table");
        ensure!(
            table.len() <= WheelEngine::MAX_SEGMENTS,
            "preset {preset} exceeds the segment cap"
        );

        let parsed: WheelPreset = preset
            .as_str()
            .parse()
            .map_err(|()| anyhow!("preset key {:?} failed to parse back", preset.as_str()))?;
        ensure!(parsed == preset, "preset key round-trip changed {preset}");

        let mut engine = WheelEngine::seeded(seed);
        engine.apply_preset(preset);
        for segment in engine.segments() {
            ensure!(
                hex_color.is_match(&segment.color),
                "segment color {:?} is not a six-digit hex color",
                segment.color
            );
            ensure!(!segment.text.is_empty(), "preset {preset} has an unlabeled segment");
        }
    }
    Ok(())
}

fn check_determinism(seed: u64) -> Result<()> {
    let mut recorded = WheelEngine::seeded(seed);
    let mut replayed = WheelEngine::seeded(seed);
    let mut rotation_recorded = 0.0_f32;
    let mut rotation_replayed = 0.0_f32;

    for round in 0..15 {
        if round % 4 == 0 {
            recorded.shuffle_segments();
            replayed.shuffle_segments();
        }
        let plan_recorded = recorded.start_spin()?;
        let plan_replayed = replayed.start_spin()?;
        ensure!(
            plan_recorded == plan_replayed,
            "spin plans diverged on round {round}"
        );
        rotation_recorded += plan_recorded.total_rotation;
        rotation_replayed += plan_replayed.total_rotation;

        let winner_recorded = recorded.resolve_winner(rotation_recorded, true)?;
        let winner_replayed = replayed.resolve_winner(rotation_replayed, true)?;
        ensure!(
            winner_recorded.segment.id == winner_replayed.segment.id
                && winner_recorded.winner_text == winner_replayed.winner_text,
            "winners diverged on round {round}"
        );
        recorded.stop_spin();
        replayed.stop_spin();
    }
    Ok(())
}

fn check_fairness(seed: u64) -> Result<()> {
    let mut engine = WheelEngine::seeded(seed);
    engine.apply_preset(WheelPreset::Six);
    let count = engine.segments().len();

    let spins = 300_usize;
    let mut hits = vec![0_usize; count];
    let mut rotation = 0.0_f32;
    for _ in 0..spins {
        let plan = engine.generate_spin()?;
        rotation = normalize_rotation(rotation + plan.total_rotation);
        hits[segment_index(rotation, count)] += 1;
    }

    let expected = spins / count;
    let floor = expected / 4;
    for (index, &wins) in hits.iter().enumerate() {
        ensure!(
            wins > floor,
            "segment {index} won only {wins} of {spins} spins (expected about {expected})"
        );
    }
    Ok(())
}
