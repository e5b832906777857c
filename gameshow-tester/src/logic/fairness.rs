//! Long-run fairness sweeps.
//!
//! Scenario checks answer "did anything break"; the sweeps here answer
//! "does every segment get its share" by spinning seeded wheels a few
//! hundred times per preset and measuring how wins spread.

use anyhow::{Context, Result, ensure};
use gameshow_engine::{WheelEngine, WheelPreset, normalize_rotation, segment_index};
use serde::{Deserialize, Serialize};

/// Acceptance floor: the coldest segment keeps at least a quarter of a
/// fair share.
const FAIRNESS_MIN_SHARE_RATIO: f64 = 0.25;
/// Acceptance ceiling: the hottest segment stays under two and a half
/// fair shares.
const FAIRNESS_MAX_SHARE_RATIO: f64 = 2.5;
const SPINS_PER_ITERATION: usize = 60;
/// The share bounds above assume at least this many spins per sweep.
const MIN_SWEEP_SPINS: usize = 600;

const FAIRNESS_PRESETS: [WheelPreset; 3] = [
    WheelPreset::Six,
    WheelPreset::Original,
    WheelPreset::Twelve,
];

/// One sweep: a preset spun `spins` times from one seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FairnessRecord {
    pub preset: WheelPreset,
    pub seed: u64,
    pub spins: usize,
    pub counts: Vec<usize>,
    pub min_share: f64,
    pub max_share: f64,
}

/// Sweep results rolled up per preset across seeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FairnessAggregate {
    pub preset: WheelPreset,
    pub seeds: usize,
    pub total_spins: usize,
    pub mean_min_share: f64,
    pub mean_max_share: f64,
    pub worst_min_share: f64,
    pub worst_max_share: f64,
}

/// Run one fairness sweep per preset and seed. `iterations` scales the
/// sweep length; short runs are padded up to the statistical minimum.
pub fn run_fairness_analysis(
    seeds: &[u64],
    iterations: usize,
    verbose: bool,
) -> Result<Vec<FairnessRecord>> {
    let spins = (iterations.max(1) * SPINS_PER_ITERATION).max(MIN_SWEEP_SPINS);
    let mut records = Vec::with_capacity(FAIRNESS_PRESETS.len() * seeds.len());
    for preset in FAIRNESS_PRESETS {
        for &seed in seeds {
            let record = run_fairness_sweep(preset, seed, spins)?;
            if verbose {
                println!(
                    "  🎡 {preset} seed {seed}: min share {:.3}, max share {:.3}",
                    record.min_share, record.max_share
                );
            } else {
                log::debug!(
                    "fairness sweep {preset} seed {seed}: min {:.3} max {:.3}",
                    record.min_share,
                    record.max_share
                );
            }
            records.push(record);
        }
    }
    Ok(records)
}

#[allow(clippy::cast_precision_loss)]
fn run_fairness_sweep(preset: WheelPreset, seed: u64, spins: usize) -> Result<FairnessRecord> {
    let mut engine = WheelEngine::seeded(seed);
    engine.apply_preset(preset);
    let count = engine.segments().len();

    let mut counts = vec![0_usize; count];
    let mut rotation = 0.0_f32;
    for _ in 0..spins {
        let plan = engine
            .generate_spin()
            .with_context(|| format!("spinning the {preset} wheel with seed {seed}"))?;
        // Keep the carried angle small so f32 precision holds over
        // thousands of spins.
        rotation = normalize_rotation(rotation + plan.total_rotation);
        counts[segment_index(rotation, count)] += 1;
    }

    let total = spins as f64;
    let min_share = counts.iter().copied().min().unwrap_or(0) as f64 / total;
    let max_share = counts.iter().copied().max().unwrap_or(0) as f64 / total;

    Ok(FairnessRecord {
        preset,
        seed,
        spins,
        counts,
        min_share,
        max_share,
    })
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn aggregate_fairness(records: &[FairnessRecord]) -> Vec<FairnessAggregate> {
    let mut aggregates = Vec::new();
    for preset in WheelPreset::ALL {
        let group: Vec<&FairnessRecord> =
            records.iter().filter(|r| r.preset == preset).collect();
        if group.is_empty() {
            continue;
        }
        let seeds = group.len();
        aggregates.push(FairnessAggregate {
            preset,
            seeds,
            total_spins: group.iter().map(|r| r.spins).sum(),
            mean_min_share: group.iter().map(|r| r.min_share).sum::<f64>() / seeds as f64,
            mean_max_share: group.iter().map(|r| r.max_share).sum::<f64>() / seeds as f64,
            worst_min_share: group
                .iter()
                .map(|r| r.min_share)
                .fold(f64::INFINITY, f64::min),
            worst_max_share: group.iter().map(|r| r.max_share).fold(0.0, f64::max),
        });
    }
    aggregates
}

/// Check every sweep and rollup against the acceptance bounds.
#[allow(clippy::cast_precision_loss)]
pub fn validate_fairness_targets(
    aggregates: &[FairnessAggregate],
    records: &[FairnessRecord],
) -> Result<()> {
    for record in records {
        let fair_share = 1.0 / record.counts.len().max(1) as f64;
        ensure!(
            record.counts.iter().all(|&wins| wins > 0),
            "{} with seed {} left a segment without a single win over {} spins",
            record.preset,
            record.seed,
            record.spins
        );
        ensure!(
            record.min_share >= fair_share * FAIRNESS_MIN_SHARE_RATIO,
            "{} with seed {}: min share {:.3} fell below the {:.3} floor",
            record.preset,
            record.seed,
            record.min_share,
            fair_share * FAIRNESS_MIN_SHARE_RATIO
        );
        ensure!(
            record.max_share <= fair_share * FAIRNESS_MAX_SHARE_RATIO,
            "{} with seed {}: max share {:.3} exceeded the {:.3} ceiling",
            record.preset,
            record.seed,
            record.max_share,
            fair_share * FAIRNESS_MAX_SHARE_RATIO
        );
    }

    for aggregate in aggregates {
        let fair_share = 1.0 / aggregate.preset.segments().len().max(1) as f64;
        ensure!(
            aggregate.worst_min_share >= fair_share * FAIRNESS_MIN_SHARE_RATIO,
            "{} rollup: worst min share {:.3} fell below the {:.3} floor",
            aggregate.preset,
            aggregate.worst_min_share,
            fair_share * FAIRNESS_MIN_SHARE_RATIO
        );
        ensure!(
            aggregate.worst_max_share <= fair_share * FAIRNESS_MAX_SHARE_RATIO,
            "{} rollup: worst max share {:.3} exceeded the {:.3} ceiling",
            aggregate.preset,
            aggregate.worst_max_share,
            fair_share * FAIRNESS_MAX_SHARE_RATIO
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic_record(preset: WheelPreset, seed: u64, counts: Vec<usize>) -> FairnessRecord {
        let spins: usize = counts.iter().sum();
        #[allow(clippy::cast_precision_loss)]
        let total = spins as f64;
        #[allow(clippy::cast_precision_loss)]
        let min_share = counts.iter().copied().min().unwrap_or(0) as f64 / total;
        #[allow(clippy::cast_precision_loss)]
        let max_share = counts.iter().copied().max().unwrap_or(0) as f64 / total;
        FairnessRecord {
            preset,
            seed,
            spins,
            counts,
            min_share,
            max_share,
        }
    }

    #[test]
    fn sweeps_cover_every_segment_and_pass_validation() {
        let records = run_fairness_analysis(&[1337], 10, false).unwrap();
        assert_eq!(records.len(), 3);
        for record in &records {
            assert_eq!(record.counts.len(), record.preset.segments().len());
            assert_eq!(record.counts.iter().sum::<usize>(), record.spins);
            assert!(record.counts.iter().all(|&wins| wins > 0));
        }
        let aggregates = aggregate_fairness(&records);
        validate_fairness_targets(&aggregates, &records).unwrap();
    }

    #[test]
    fn short_runs_are_padded_to_the_sweep_minimum() {
        let records = run_fairness_analysis(&[7], 1, false).unwrap();
        assert!(records.iter().all(|r| r.spins == 600));
    }

    #[test]
    fn rollups_group_records_by_preset() {
        let records = vec![
            synthetic_record(WheelPreset::Six, 1, vec![100; 6]),
            synthetic_record(WheelPreset::Six, 2, vec![90, 110, 100, 100, 100, 100]),
            synthetic_record(WheelPreset::Original, 1, vec![60; 11]),
        ];
        let aggregates = aggregate_fairness(&records);
        assert_eq!(aggregates.len(), 2);

        let six = &aggregates[0];
        assert_eq!(six.preset, WheelPreset::Six);
        assert_eq!(six.seeds, 2);
        assert_eq!(six.total_spins, 1200);
        assert!((six.worst_min_share - 90.0 / 600.0).abs() < 1e-9);
        assert!((six.worst_max_share - 110.0 / 600.0).abs() < 1e-9);

        let original = &aggregates[1];
        assert_eq!(original.preset, WheelPreset::Original);
        assert_eq!(original.seeds, 1);
    }

    #[test]
    fn validation_flags_a_starved_segment() {
        let records = vec![synthetic_record(
            WheelPreset::Six,
            3,
            vec![120, 120, 120, 120, 120, 0],
        )];
        let aggregates = aggregate_fairness(&records);
        let err = validate_fairness_targets(&aggregates, &records).unwrap_err();
        assert!(err.to_string().contains("without a single win"));
    }

    #[test]
    fn validation_flags_a_dominant_segment() {
        let records = vec![synthetic_record(
            WheelPreset::Six,
            4,
            vec![380, 44, 44, 44, 44, 44],
        )];
        let aggregates = aggregate_fairness(&records);
        let err = validate_fairness_targets(&aggregates, &records).unwrap_err();
        assert!(err.to_string().contains("max share"));
    }
}
