pub mod fairness;
pub mod reports;
pub mod scenarios;
pub mod seeds;
pub mod tester;

pub use fairness::{
    FairnessAggregate, FairnessRecord, aggregate_fairness, run_fairness_analysis,
    validate_fairness_targets,
};
pub use reports::{
    generate_console_report, generate_csv_report, generate_json_report, generate_markdown_report,
};
pub use seeds::resolve_seed_inputs;
pub use tester::{LogicTester, ScenarioResult};
