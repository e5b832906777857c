use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

mod common;
mod logic;

use crate::common::split_csv;
use crate::logic::scenarios;
use crate::logic::{
    FairnessAggregate, FairnessRecord, LogicTester, ScenarioResult, aggregate_fairness,
    generate_console_report, generate_csv_report, generate_json_report, generate_markdown_report,
    resolve_seed_inputs, run_fairness_analysis, validate_fairness_targets,
};

/// Automated QA harness for the game show engine.
#[derive(Parser, Debug)]
#[command(
    name = "gameshow-tester",
    version = "0.3.0",
    about = "Scripted scenarios and fairness sweeps for the game show engine"
)]
struct Args {
    /// Comma-separated scenario names, or "all"
    #[arg(short, long, default_value = "smoke")]
    scenarios: String,

    /// List available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Comma-separated seeds for deterministic runs
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Iterations per scenario per seed
    #[arg(short, long, default_value_t = 10)]
    iterations: usize,

    /// Acceptance mode: fairness sweeps run with at least 100 iterations
    #[arg(short, long)]
    acceptance: bool,

    /// Report format
    #[arg(short, long, default_value = "console", value_parser = ["json", "markdown", "console", "csv"])]
    report: String,

    /// Print per-iteration progress
    #[arg(short, long)]
    verbose: bool,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Where report output goes: stdout by default, a buffered file with
/// `--output`.
enum OutputTarget {
    Stdout(io::Stdout),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                Ok(Self::File(BufWriter::new(file)))
            }
            None => Ok(Self::Stdout(io::stdout())),
        }
    }

    fn flush_inner(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(stdout) => stdout.flush(),
            Self::File(file) => file.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout(stdout) => stdout.write(buf),
            Self::File(file) => file.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_inner()
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args, &mut io::stdout())? {
        return Ok(());
    }

    announce_banner();

    let scenario_names = expand_scenarios(&args.scenarios);
    let seeds = resolve_seed_inputs(&split_csv(&args.seeds))?;
    let fairness_iterations = compute_fairness_iterations(&args);

    let start = Instant::now();
    let results = run_logic_scenarios(&scenario_names, &seeds, args.iterations, args.verbose);
    let (records, aggregates) = gather_fairness(&args, &seeds, fairness_iterations)?;
    let total_duration = start.elapsed();

    println!();
    let mut output = OutputTarget::new(args.output.as_ref())?;
    write_reports(
        &mut output,
        &args.report,
        &results,
        records.as_deref(),
        aggregates.as_deref(),
        total_duration,
    )?;
    output.flush_inner()?;

    if let (Some(aggregates), Some(records)) = (aggregates.as_deref(), records.as_deref()) {
        validate_fairness_targets(aggregates, records)?;
    }

    if results.iter().any(|result| !result.passed) {
        eprintln!("{}", "Some scenarios failed; see the report above.".red());
        process::exit(1);
    }
    Ok(())
}

fn announce_banner() {
    println!("{}", "🎡 Game Show Automated Tester".bright_cyan().bold());
    println!("{}", "=".repeat(40).cyan());
}

fn maybe_list_scenarios<W: Write>(args: &Args, writer: &mut W) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    writeln!(writer, "Available scenarios:")?;
    for (name, description) in scenarios::list_scenarios() {
        writeln!(writer, "  {name:<20} - {description}")?;
    }
    Ok(true)
}

fn compute_fairness_iterations(args: &Args) -> usize {
    if args.acceptance {
        let iterations = args.iterations.max(100);
        println!(
            "{}",
            format!("🔁 Acceptance mode: fairness sweeps use {iterations} iterations")
                .bright_blue()
        );
        iterations
    } else {
        args.iterations
    }
}

fn expand_scenarios(raw: &str) -> Vec<String> {
    let requested = split_csv(raw);
    if requested.iter().any(|name| name == "all") {
        scenarios::SCENARIOS
            .iter()
            .map(|scenario| scenario.name.to_string())
            .collect()
    } else {
        requested
    }
}

fn run_logic_scenarios(
    scenario_names: &[String],
    seeds: &[u64],
    iterations: usize,
    verbose: bool,
) -> Vec<ScenarioResult> {
    println!("{}", "🧠 Running Logic Tests".bright_yellow());
    println!("{}", "-".repeat(30).yellow());

    let tester = LogicTester::new(verbose);
    let mut results = Vec::new();
    for name in scenario_names {
        match scenarios::get_scenario(name) {
            Some(scenario) => results.extend(tester.run_scenario(scenario, seeds, iterations)),
            None => eprintln!("{}", format!("⚠️  Unknown scenario: {name}").yellow()),
        }
    }
    results
}

type FairnessSummary = (Option<Vec<FairnessRecord>>, Option<Vec<FairnessAggregate>>);

/// Fairness sweeps feed the console and csv reports and back the
/// acceptance gate; other runs skip them.
fn gather_fairness(args: &Args, seeds: &[u64], iterations: usize) -> Result<FairnessSummary> {
    let required = matches!(args.report.as_str(), "console" | "csv") || args.acceptance;
    if !required {
        return Ok((None, None));
    }

    println!("{}", "🎡 Running Fairness Sweeps".bright_yellow());
    println!("{}", "-".repeat(30).yellow());
    let records = run_fairness_analysis(seeds, iterations, args.verbose)?;
    let aggregates = aggregate_fairness(&records);
    Ok((Some(records), Some(aggregates)))
}

fn write_reports<W: Write>(
    output: &mut W,
    report: &str,
    results: &[ScenarioResult],
    records: Option<&[FairnessRecord]>,
    aggregates: Option<&[FairnessAggregate]>,
    total_duration: Duration,
) -> Result<()> {
    match report {
        "json" => generate_json_report(output, results),
        "markdown" => generate_markdown_report(output, results),
        "csv" => generate_csv_report(output, records.unwrap_or(&[])),
        _ => generate_console_report(output, results, aggregates, total_duration),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gameshow_engine::WheelPreset;

    fn base_args() -> Args {
        Args {
            scenarios: "smoke".to_string(),
            list_scenarios: false,
            seeds: "1337".to_string(),
            iterations: 10,
            acceptance: false,
            report: "console".to_string(),
            verbose: false,
            output: None,
        }
    }

    fn sample_result(passed: bool) -> ScenarioResult {
        ScenarioResult {
            scenario_name: "smoke".to_string(),
            passed,
            iterations_run: 10,
            successful_iterations: if passed { 10 } else { 4 },
            failures: if passed {
                Vec::new()
            } else {
                vec!["Iteration 5 (seed 1341): wheel stayed empty".to_string()]
            },
            average_duration: Duration::from_millis(1),
            performance_data: vec![Duration::from_millis(1)],
        }
    }

    fn sample_record() -> FairnessRecord {
        FairnessRecord {
            preset: WheelPreset::Six,
            seed: 1337,
            spins: 600,
            counts: vec![100; 6],
            min_share: 1.0 / 6.0,
            max_share: 1.0 / 6.0,
        }
    }

    fn sample_aggregate() -> FairnessAggregate {
        FairnessAggregate {
            preset: WheelPreset::Six,
            seeds: 1,
            total_spins: 600,
            mean_min_share: 1.0 / 6.0,
            mean_max_share: 1.0 / 6.0,
            worst_min_share: 1.0 / 6.0,
            worst_max_share: 1.0 / 6.0,
        }
    }

    fn temp_path(label: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("gameshow-tester-{label}-{}-{nanos}", process::id()))
    }

    #[test]
    fn acceptance_mode_forces_at_least_one_hundred_iterations() {
        let mut args = base_args();
        args.acceptance = true;
        assert_eq!(compute_fairness_iterations(&args), 100);
        args.iterations = 150;
        assert_eq!(compute_fairness_iterations(&args), 150);
    }

    #[test]
    fn default_mode_keeps_the_requested_iterations() {
        assert_eq!(compute_fairness_iterations(&base_args()), 10);
    }

    #[test]
    fn the_all_keyword_expands_to_the_whole_catalog() {
        assert_eq!(expand_scenarios("all").len(), scenarios::SCENARIOS.len());
        assert_eq!(
            expand_scenarios("smoke,all").len(),
            scenarios::SCENARIOS.len()
        );
    }

    #[test]
    fn explicit_scenario_lists_keep_their_order() {
        assert_eq!(expand_scenarios("fairness, smoke"), vec!["fairness", "smoke"]);
    }

    #[test]
    fn listing_writes_the_catalog_and_short_circuits() {
        let mut args = base_args();
        args.list_scenarios = true;
        let mut buffer = Vec::new();
        assert!(maybe_list_scenarios(&args, &mut buffer).unwrap());
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("Available scenarios:"));
        assert!(text.contains("smoke"));
        assert!(text.contains("fairness"));
    }

    #[test]
    fn listing_is_skipped_when_not_requested() {
        let mut buffer = Vec::new();
        assert!(!maybe_list_scenarios(&base_args(), &mut buffer).unwrap());
        assert!(buffer.is_empty());
    }

    #[test]
    fn json_report_renders_results() {
        let mut buffer = Vec::new();
        write_reports(
            &mut buffer,
            "json",
            &[sample_result(true)],
            None,
            None,
            Duration::from_millis(5),
        )
        .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("\"scenario_name\""));
        assert!(text.contains("smoke"));
    }

    #[test]
    fn json_report_renders_an_empty_run_as_an_empty_list() {
        let mut buffer = Vec::new();
        write_reports(&mut buffer, "json", &[], None, None, Duration::ZERO).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap().trim(), "[]");
    }

    #[test]
    fn markdown_report_uses_the_results_heading() {
        let mut buffer = Vec::new();
        write_reports(
            &mut buffer,
            "markdown",
            &[sample_result(false)],
            None,
            None,
            Duration::from_millis(5),
        )
        .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("# Game Show Logic Test Results"));
        assert!(text.contains("### ❌ smoke"));
    }

    #[test]
    fn csv_report_renders_fairness_records() {
        let records = vec![sample_record()];
        let mut buffer = Vec::new();
        write_reports(
            &mut buffer,
            "csv",
            &[sample_result(true)],
            Some(&records),
            None,
            Duration::from_millis(5),
        )
        .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("preset,seed,spins"));
        assert!(text.contains("6-segment,1337,600"));
    }

    #[test]
    fn csv_report_without_records_is_header_only() {
        let mut buffer = Vec::new();
        write_reports(&mut buffer, "csv", &[], None, None, Duration::ZERO).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap().lines().count(), 1);
    }

    #[test]
    fn console_report_includes_the_fairness_table() {
        let aggregates = vec![sample_aggregate()];
        let mut buffer = Vec::new();
        write_reports(
            &mut buffer,
            "console",
            &[sample_result(true)],
            None,
            Some(&aggregates),
            Duration::from_millis(5),
        )
        .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("🎡 Fairness Summary"));
        assert!(text.contains("6-segment"));
    }

    #[test]
    fn console_report_notes_missing_fairness_data() {
        let mut buffer = Vec::new();
        write_reports(
            &mut buffer,
            "console",
            &[sample_result(true)],
            None,
            None,
            Duration::from_millis(5),
        )
        .unwrap();
        assert!(String::from_utf8(buffer)
            .unwrap()
            .contains("Fairness data unavailable."));
    }

    #[test]
    fn fairness_is_skipped_for_json_reports() {
        let mut args = base_args();
        args.report = "json".to_string();
        let (records, aggregates) = gather_fairness(&args, &[7], 1).unwrap();
        assert!(records.is_none());
        assert!(aggregates.is_none());
    }

    #[test]
    fn acceptance_forces_fairness_even_for_json_reports() {
        let mut args = base_args();
        args.report = "json".to_string();
        args.acceptance = true;
        let (records, aggregates) = gather_fairness(&args, &[7], 1).unwrap();
        assert_eq!(records.unwrap().len(), 3);
        assert_eq!(aggregates.unwrap().len(), 3);
    }

    #[test]
    fn unknown_scenarios_yield_no_results() {
        let results = run_logic_scenarios(&["browser-warmup".to_string()], &[1], 1, false);
        assert!(results.is_empty());
    }

    #[test]
    fn output_target_writes_report_files() {
        let path = temp_path("report");
        {
            let mut output = OutputTarget::new(Some(&path)).unwrap();
            write_reports(
                &mut output,
                "markdown",
                &[sample_result(true)],
                None,
                None,
                Duration::from_millis(5),
            )
            .unwrap();
            output.flush_inner().unwrap();
        }
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("# Game Show Logic Test Results"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn report_flag_rejects_unknown_formats() {
        assert!(Args::try_parse_from(["gameshow-tester", "--report", "xml"]).is_err());
        assert!(Args::try_parse_from(["gameshow-tester", "--report", "json"]).is_ok());
    }
}
