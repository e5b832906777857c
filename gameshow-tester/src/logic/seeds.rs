use anyhow::{Result, bail};

const DEFAULT_SEED: u64 = 1337;

/// Resolve CLI seed tokens into canonical numeric seeds.
///
/// Accepts literal integers. Negatives take their absolute value, so
/// `--seeds -7` and `--seeds 7` replay the same session. Duplicates are
/// dropped with the first occurrence winning; an empty list falls back to
/// the default seed.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>> {
    let mut resolved: Vec<u64> = Vec::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }

        if let Ok(value) = token.parse::<i64>() {
            push_unique(&mut resolved, value.unsigned_abs());
            continue;
        }

        // Values above i64::MAX still parse as u64.
        if let Ok(value) = token.parse::<u64>() {
            push_unique(&mut resolved, value);
            continue;
        }

        bail!("Unrecognized seed token: {token}");
    }

    if resolved.is_empty() {
        resolved.push(DEFAULT_SEED);
    }

    Ok(resolved)
}

fn push_unique(seeds: &mut Vec<u64>, seed: u64) {
    if !seeds.contains(&seed) {
        seeds.push(seed);
    }
}
