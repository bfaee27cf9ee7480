//! Command-line parsing and end-to-end runs of the simulate command

use clap::Parser;
use combolock::{
    DEFAULT_EXPERIMENTS,
    cli::commands::simulate::{SimulateArgs, execute, run_simulations},
};

fn parse_args<I, T>(args: I) -> SimulateArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    SimulateArgs::parse_from(args)
}

#[test]
fn no_arguments_runs_the_default_comparison() {
    let args = parse_args(["combolock"]);

    assert_eq!(args.experiment_names(), DEFAULT_EXPERIMENTS.to_vec());

    let config = args.experiment_config();
    assert_eq!(config.alphabet_size, 10);
    assert_eq!(config.sequence_length, 4);
    assert_eq!(config.total_episodes, 12000);
    assert_eq!(config.max_steps_per_episode, 100_000);
    assert_eq!(config.seed, None);
    assert_eq!(config.agent.learning_rate, 0.5);
    assert_eq!(config.agent.discount_factor, 0.9);
    assert_eq!(config.agent.epsilon, 0.1);
}

#[test]
fn configs_are_split_on_commas() {
    let args = parse_args([
        "combolock",
        "--configs",
        "scaffolded_td_lambda,classic_td0",
    ]);
    assert_eq!(
        args.experiment_names(),
        vec!["scaffolded_td_lambda", "classic_td0"]
    );
}

#[test]
fn overrides_reach_the_experiment_config() {
    let args = parse_args([
        "combolock",
        "-s",
        "3",
        "-k",
        "2",
        "-e",
        "500",
        "--epsilon",
        "0.25",
        "--max-steps",
        "1000",
        "--seed",
        "17",
    ]);
    let config = args.experiment_config();

    assert_eq!(config.alphabet_size, 3);
    assert_eq!(config.sequence_length, 2);
    assert_eq!(config.total_episodes, 500);
    assert_eq!(config.max_steps_per_episode, 1000);
    assert_eq!(config.seed, Some(17));
    assert_eq!(config.agent.epsilon, 0.25);
    // λ is chosen per configuration name, never from the command line
    assert_eq!(config.agent.trace_decay, 0.0);
}

#[test]
fn small_seeded_run_succeeds() {
    let args = parse_args([
        "combolock", "-s", "2", "-k", "2", "-e", "100", "--epsilon", "0.5", "--seed", "3",
        "--json",
    ]);
    execute(args).expect("small comparison should succeed");
}

#[test]
fn verbose_run_records_episode_metrics() {
    let args = parse_args([
        "combolock", "-s", "2", "-k", "2", "-e", "100", "--epsilon", "0.5", "--seed", "3",
        "--configs", "classic_td0,scaffolded_td0", "--verbose",
    ]);
    let runs = run_simulations(&args).unwrap();
    assert_eq!(runs.len(), 2);

    for run in &runs {
        let metrics = run.metrics.as_ref().expect("verbose runs carry metrics");
        let training = &run.report.training;
        assert_eq!(metrics.total_episodes, training.total_episodes);
        assert_eq!(metrics.successes, training.successes);
        assert_eq!(metrics.regressions, training.regressions);
        assert_eq!(metrics.phases.len(), training.phases);
        let steps: usize = metrics.phases.iter().map(|p| p.steps).sum();
        assert_eq!(steps, training.total_steps);
    }
    let starts: Vec<usize> = runs[1]
        .metrics
        .as_ref()
        .unwrap()
        .phases
        .iter()
        .map(|p| p.start_state)
        .collect();
    assert_eq!(starts, vec![1, 0]);

    let args = parse_args([
        "combolock", "-s", "2", "-k", "2", "-e", "100", "--epsilon", "0.5", "--seed", "3",
        "--verbose",
    ]);
    execute(args).expect("verbose comparison should print");
}

#[test]
fn quiet_run_skips_metrics() {
    let args = parse_args(["combolock", "-s", "2", "-k", "1", "-e", "20", "--seed", "1"]);
    let runs = run_simulations(&args).unwrap();
    assert!(runs.iter().all(|run| run.metrics.is_none()));
}

#[test]
fn unknown_configuration_fails() {
    let args = parse_args(["combolock", "-e", "10", "--configs", "sarsa"]);
    let err = execute(args).unwrap_err();
    assert!(format!("{err:#}").contains("sarsa"));
}

#[test]
fn invalid_rate_fails_before_running() {
    let args = parse_args(["combolock", "--epsilon", "1.5"]);
    assert!(execute(args).is_err());
}
