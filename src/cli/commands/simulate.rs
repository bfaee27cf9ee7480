//! Simulate command - run the named experiments and print the comparison

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    cli::output::{format_report_line, print_training_details, report_header},
    experiment::{DEFAULT_EXPERIMENTS, ExperimentConfig, ExperimentReport, run_experiment_with},
    pipeline::{MetricsSummary, Observer, ProgressObserver, SharedMetrics},
    q_learning::AgentConfig,
};

#[derive(Parser, Debug)]
#[command(
    name = "combolock",
    version,
    about = "Compare Q-learning curricula on a combination lock"
)]
pub struct SimulateArgs {
    /// Number of actions S
    #[arg(long, short = 's', default_value_t = 10)]
    pub alphabet_size: usize,

    /// Advance actions needed to open the lock k
    #[arg(long, short = 'k', default_value_t = 4)]
    pub sequence_length: usize,

    /// Episode budget per configuration
    #[arg(long, short = 'e', default_value_t = 12000)]
    pub episodes: usize,

    /// Configurations to compare, comma separated
    /// [default: classic_td0,classic_td_lambda,scaffolded_td0]
    #[arg(long, short = 'c', value_delimiter = ',')]
    pub configs: Vec<String>,

    /// Step size α
    #[arg(long, default_value_t = 0.5)]
    pub learning_rate: f64,

    /// Discount factor γ
    #[arg(long, default_value_t = 0.9)]
    pub discount_factor: f64,

    /// Exploration rate ε
    #[arg(long, default_value_t = 0.1)]
    pub epsilon: f64,

    /// Steps after which an episode is reported as stuck
    #[arg(long, default_value_t = 100_000)]
    pub max_steps: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show a progress bar per configuration
    #[arg(long, default_value_t = false)]
    pub progress: bool,

    /// Print per-configuration episode statistics after the table
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,

    /// Print results as JSON instead of the table
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl SimulateArgs {
    /// Configuration names to run, falling back to the default comparison
    pub fn experiment_names(&self) -> Vec<String> {
        if self.configs.is_empty() {
            DEFAULT_EXPERIMENTS.iter().map(|s| s.to_string()).collect()
        } else {
            self.configs.clone()
        }
    }

    pub fn experiment_config(&self) -> ExperimentConfig {
        let agent = AgentConfig::default()
            .with_learning_rate(self.learning_rate)
            .with_discount_factor(self.discount_factor)
            .with_epsilon(self.epsilon);
        let config = ExperimentConfig::default()
            .with_alphabet_size(self.alphabet_size)
            .with_sequence_length(self.sequence_length)
            .with_total_episodes(self.episodes)
            .with_max_steps_per_episode(self.max_steps)
            .with_agent(agent);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    alphabet_size: usize,
    sequence_length: usize,
    total_episodes: usize,
    seed: Option<u64>,
    experiments: &'a [ExperimentReport],
}

/// One configuration's report, with episode metrics when `--verbose` is set
#[derive(Debug)]
pub struct SimulationRun {
    pub report: ExperimentReport,
    pub metrics: Option<MetricsSummary>,
}

/// Run every requested configuration without printing anything
pub fn run_simulations(args: &SimulateArgs) -> Result<Vec<SimulationRun>> {
    let config = args.experiment_config();
    config.validate().context("invalid simulation parameters")?;

    let names = args.experiment_names();
    let mut runs = Vec::with_capacity(names.len());
    for name in &names {
        let mut observers: Vec<Box<dyn Observer>> = Vec::new();
        if args.progress {
            observers.push(Box::new(ProgressObserver::new(name.clone())));
        }
        let metrics = args.verbose.then(SharedMetrics::new);
        if let Some(metrics) = &metrics {
            observers.push(Box::new(metrics.clone()));
        }
        let report = run_experiment_with(name, &config, observers)
            .with_context(|| format!("experiment '{name}' failed"))?;
        runs.push(SimulationRun {
            report,
            metrics: metrics.map(|m| m.summary()),
        });
    }
    Ok(runs)
}

pub fn execute(args: SimulateArgs) -> Result<()> {
    let config = args.experiment_config();
    let runs = run_simulations(&args)?;
    let reports: Vec<ExperimentReport> = runs.iter().map(|run| run.report.clone()).collect();

    if args.json {
        let summary = JsonReport {
            alphabet_size: config.alphabet_size,
            sequence_length: config.sequence_length,
            total_episodes: config.total_episodes,
            seed: config.seed,
            experiments: &reports,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{}",
        report_header(config.alphabet_size, config.sequence_length)
    );
    for report in &reports {
        println!("{}", format_report_line(&report.name, report.milestones()));
    }

    if args.verbose {
        for run in &runs {
            print_training_details(&run.report, run.metrics.as_ref());
        }
    }

    Ok(())
}
