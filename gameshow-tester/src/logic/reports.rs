//! Report rendering for scenario results and fairness sweeps.
//!
//! Every generator writes to a caller-supplied `Write` target so the
//! same code path serves stdout and report files. Output is plain text;
//! color stays in the CLI banners.

use anyhow::Result;
use chrono::Utc;
use std::io::Write;
use std::time::Duration;

use crate::logic::fairness::{FairnessAggregate, FairnessRecord};
use crate::logic::tester::ScenarioResult;

#[allow(clippy::cast_precision_loss)]
fn success_rate(results: &[ScenarioResult]) -> f64 {
    if results.is_empty() {
        return 100.0;
    }
    let passed = results.iter().filter(|r| r.passed).count();
    passed as f64 / results.len() as f64 * 100.0
}

pub fn generate_console_report<W: Write>(
    writer: &mut W,
    results: &[ScenarioResult],
    aggregates: Option<&[FairnessAggregate]>,
    total_duration: Duration,
) -> Result<()> {
    writeln!(writer, "📊 Logic Test Results Summary")?;
    writeln!(writer, "==============================")?;
    writeln!(writer)?;

    for result in results {
        let glyph = if result.passed { "✅" } else { "❌" };
        writeln!(
            writer,
            "{glyph} {}: {}/{} iterations passed (avg {:?})",
            result.scenario_name,
            result.successful_iterations,
            result.iterations_run,
            result.average_duration
        )?;
        for failure in &result.failures {
            writeln!(writer, "     - {failure}")?;
        }
    }

    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(writer)?;
    writeln!(
        writer,
        "Scenario runs: {} | Passed: {} | Failed: {} | Success rate: {:.1}%",
        results.len(),
        passed,
        results.len() - passed,
        success_rate(results)
    )?;

    writeln!(writer)?;
    writeln!(writer, "🎡 Fairness Summary")?;
    writeln!(writer, "-------------------")?;
    if let Some(aggregates) = aggregates {
        writeln!(
            writer,
            "{:<12} {:>5} {:>7} {:>9} {:>9} {:>10} {:>10}",
            "preset", "seeds", "spins", "mean min", "mean max", "worst min", "worst max"
        )?;
        for aggregate in aggregates {
            writeln!(
                writer,
                "{:<12} {:>5} {:>7} {:>9.3} {:>9.3} {:>10.3} {:>10.3}",
                aggregate.preset.as_str(),
                aggregate.seeds,
                aggregate.total_spins,
                aggregate.mean_min_share,
                aggregate.mean_max_share,
                aggregate.worst_min_share,
                aggregate.worst_max_share
            )?;
        }
    } else {
        writeln!(writer, "Fairness data unavailable.")?;
    }

    writeln!(writer)?;
    writeln!(writer, "🏁 Total time: {total_duration:?}")?;
    Ok(())
}

pub fn generate_json_report<W: Write>(writer: &mut W, results: &[ScenarioResult]) -> Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

pub fn generate_markdown_report<W: Write>(
    writer: &mut W,
    results: &[ScenarioResult],
) -> Result<()> {
    writeln!(writer, "# Game Show Logic Test Results")?;
    writeln!(writer)?;
    writeln!(
        writer,
        "Generated: {}",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(writer)?;

    if results.is_empty() {
        writeln!(writer, "_No scenarios executed._")?;
        return Ok(());
    }

    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(writer, "## Summary")?;
    writeln!(writer)?;
    writeln!(writer, "- Scenario runs: {}", results.len())?;
    writeln!(writer, "- Passed: {passed}")?;
    writeln!(writer, "- Failed: {}", results.len() - passed)?;
    writeln!(writer, "- Success rate: {:.1}%", success_rate(results))?;
    writeln!(writer)?;

    writeln!(writer, "## Detailed Results")?;
    for result in results {
        let glyph = if result.passed { "✅" } else { "❌" };
        writeln!(writer)?;
        writeln!(writer, "### {glyph} {}", result.scenario_name)?;
        writeln!(writer)?;
        writeln!(writer, "- Iterations: {}", result.iterations_run)?;
        writeln!(writer, "- Successful: {}", result.successful_iterations)?;
        writeln!(writer, "- Average duration: {:?}", result.average_duration)?;
        if !result.failures.is_empty() {
            writeln!(writer, "- Failures:")?;
            for failure in &result.failures {
                writeln!(writer, "  - {failure}")?;
            }
        }
    }
    Ok(())
}

pub fn generate_csv_report<W: Write>(writer: &mut W, records: &[FairnessRecord]) -> Result<()> {
    writeln!(writer, "preset,seed,spins,min_share,max_share")?;
    for record in records {
        writeln!(
            writer,
            "{},{},{},{:.4},{:.4}",
            record.preset.as_str(),
            record.seed,
            record.spins,
            record.min_share,
            record.max_share
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gameshow_engine::WheelPreset;

    fn sample_result(name: &str, passed: bool) -> ScenarioResult {
        ScenarioResult {
            scenario_name: name.to_string(),
            passed,
            iterations_run: 10,
            successful_iterations: if passed { 10 } else { 7 },
            failures: if passed {
                Vec::new()
            } else {
                vec!["Iteration 3 (seed 1339): segment 2 never won".to_string()]
            },
            average_duration: Duration::from_millis(2),
            performance_data: vec![Duration::from_millis(2)],
        }
    }

    fn sample_aggregate() -> FairnessAggregate {
        FairnessAggregate {
            preset: WheelPreset::Six,
            seeds: 2,
            total_spins: 1200,
            mean_min_share: 0.142,
            mean_max_share: 0.193,
            worst_min_share: 0.138,
            worst_max_share: 0.201,
        }
    }

    fn render<F: FnOnce(&mut Vec<u8>)>(render_into: F) -> String {
        let mut buffer = Vec::new();
        render_into(&mut buffer);
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn console_report_lists_every_scenario_run() {
        let results = vec![sample_result("smoke", true), sample_result("fairness", false)];
        let aggregates = vec![sample_aggregate()];
        let text = render(|buffer| {
            generate_console_report(
                buffer,
                &results,
                Some(&aggregates),
                Duration::from_millis(1234),
            )
            .unwrap();
        });
        assert!(text.contains("📊 Logic Test Results Summary"));
        assert!(text.contains("✅ smoke: 10/10"));
        assert!(text.contains("❌ fairness: 7/10"));
        assert!(text.contains("segment 2 never won"));
        assert!(text.contains("Success rate: 50.0%"));
        assert!(text.contains("6-segment"));
        assert!(text.contains("🏁 Total time:"));
    }

    #[test]
    fn console_report_notes_missing_fairness_data() {
        let results = vec![sample_result("smoke", true)];
        let text = render(|buffer| {
            generate_console_report(buffer, &results, None, Duration::from_secs(1)).unwrap();
        });
        assert!(text.contains("Fairness data unavailable."));
    }

    #[test]
    fn json_report_round_trips() {
        let results = vec![sample_result("smoke", true)];
        let text = render(|buffer| {
            generate_json_report(buffer, &results).unwrap();
        });
        let back: Vec<ScenarioResult> = serde_json::from_str(&text).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].scenario_name, "smoke");
    }

    #[test]
    fn markdown_report_handles_an_empty_run() {
        let text = render(|buffer| {
            generate_markdown_report(buffer, &[]).unwrap();
        });
        assert!(text.contains("# Game Show Logic Test Results"));
        assert!(text.contains("_No scenarios executed._"));
    }

    #[test]
    fn markdown_report_separates_passes_from_failures() {
        let results = vec![sample_result("smoke", true), sample_result("fairness", false)];
        let text = render(|buffer| {
            generate_markdown_report(buffer, &results).unwrap();
        });
        assert!(text.contains("### ✅ smoke"));
        assert!(text.contains("### ❌ fairness"));
        assert!(text.contains("- Failures:"));
    }

    #[test]
    fn csv_report_has_a_header_and_one_row_per_sweep() {
        let records = vec![FairnessRecord {
            preset: WheelPreset::Six,
            seed: 1337,
            spins: 600,
            counts: vec![100; 6],
            min_share: 0.1417,
            max_share: 0.1933,
        }];
        let text = render(|buffer| {
            generate_csv_report(buffer, &records).unwrap();
        });
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("preset,seed,spins,min_share,max_share"));
        assert_eq!(lines.next(), Some("6-segment,1337,600,0.1417,0.1933"));
    }
}
