//! Named experiment configurations and the runner that compares them
//!
//! A configuration name selects the regimen and whether eligibility traces are
//! on: names containing `scaffolded` train with the reverse curriculum, names
//! containing `classic` train directly, and `lambda` anywhere in the name
//! turns traces on.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    Error, Result,
    lock::CombinationLock,
    pipeline::{
        MilestoneThresholds, Milestones, Observer, TrainingConfig, TrainingPipeline,
        TrainingRegimen, TrainingResult,
    },
    q_learning::{AgentConfig, QLearningAgent},
};

/// Configurations compared by default, in report order
pub const DEFAULT_EXPERIMENTS: [&str; 3] = ["classic_td0", "classic_td_lambda", "scaffolded_td0"];

/// Trace decay used by configurations with `lambda` in their name
pub const LAMBDA_TRACE_DECAY: f64 = 0.9;

const TRACE_MARKER: &str = "lambda";
const SCAFFOLDED_MARKER: &str = "scaffolded";
const CLASSIC_MARKER: &str = "classic";

/// Regimen and trace mode decoded from a configuration name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentKind {
    pub regimen: TrainingRegimen,
    pub traces: bool,
}

impl ExperimentKind {
    /// Decode a configuration name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownExperiment`] if the name names neither
    /// regimen.
    pub fn from_name(name: &str) -> Result<Self> {
        let regimen = if name.contains(SCAFFOLDED_MARKER) {
            TrainingRegimen::Scaffolded
        } else if name.contains(CLASSIC_MARKER) {
            TrainingRegimen::Direct
        } else {
            return Err(Error::UnknownExperiment {
                name: name.to_string(),
                expected: format!(
                    "a name containing '{CLASSIC_MARKER}' or '{SCAFFOLDED_MARKER}' (e.g. {})",
                    DEFAULT_EXPERIMENTS.join(", ")
                ),
            });
        };
        Ok(Self {
            regimen,
            traces: name.contains(TRACE_MARKER),
        })
    }

    /// Trace decay λ this kind trains with
    pub fn trace_decay(&self) -> f64 {
        if self.traces { LAMBDA_TRACE_DECAY } else { 0.0 }
    }
}

/// Parameters shared by every experiment in a comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Number of actions `S`
    pub alphabet_size: usize,
    /// Advance actions needed to open the lock `k`
    pub sequence_length: usize,
    /// Episode budget per experiment
    pub total_episodes: usize,
    /// Agent hyperparameters; the trace decay is overridden per experiment
    pub agent: AgentConfig,
    /// Steps after which an episode is declared stuck
    pub max_steps_per_episode: usize,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    /// Milestone thresholds
    pub thresholds: MilestoneThresholds,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        let training = TrainingConfig::default();
        Self {
            alphabet_size: 10,
            sequence_length: 4,
            total_episodes: training.total_episodes,
            agent: AgentConfig::default(),
            max_steps_per_episode: training.max_steps_per_episode,
            seed: None,
            thresholds: training.thresholds,
        }
    }
}

impl ExperimentConfig {
    pub fn with_alphabet_size(mut self, alphabet_size: usize) -> Self {
        self.alphabet_size = alphabet_size;
        self
    }

    pub fn with_sequence_length(mut self, sequence_length: usize) -> Self {
        self.sequence_length = sequence_length;
        self
    }

    pub fn with_total_episodes(mut self, total_episodes: usize) -> Self {
        self.total_episodes = total_episodes;
        self
    }

    pub fn with_max_steps_per_episode(mut self, max_steps: usize) -> Self {
        self.max_steps_per_episode = max_steps;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_agent(mut self, agent: AgentConfig) -> Self {
        self.agent = agent;
        self
    }

    /// Validate the lock shape and agent rates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the alphabet lacks the
    /// advance action, the sequence is empty, the step cap is zero, or an
    /// agent rate is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.alphabet_size < 2 {
            return Err(Error::invalid_config(format!(
                "alphabet size must be at least 2 so the advance action exists, got {}",
                self.alphabet_size
            )));
        }
        if self.sequence_length == 0 {
            return Err(Error::invalid_config("sequence length must be at least 1"));
        }
        if self.max_steps_per_episode == 0 {
            return Err(Error::invalid_config(
                "max steps per episode must be at least 1",
            ));
        }
        self.agent.validate()
    }

    fn training_config(&self) -> TrainingConfig {
        TrainingConfig {
            total_episodes: self.total_episodes,
            max_steps_per_episode: self.max_steps_per_episode,
            seed: self.seed,
            thresholds: self.thresholds,
        }
    }
}

/// Outcome of one named experiment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub name: String,
    pub kind: ExperimentKind,
    pub training: TrainingResult,
}

impl ExperimentReport {
    pub fn milestones(&self) -> &Milestones {
        &self.training.milestones
    }
}

/// Run the named experiment with a fresh lock and agent
pub fn run_experiment(name: &str, config: &ExperimentConfig) -> Result<ExperimentReport> {
    run_experiment_with(name, config, Vec::new())
}

/// Run the named experiment, reporting to `observers`
pub fn run_experiment_with(
    name: &str,
    config: &ExperimentConfig,
    observers: Vec<Box<dyn Observer>>,
) -> Result<ExperimentReport> {
    config.validate()?;
    let kind = ExperimentKind::from_name(name)?;

    let mut lock = CombinationLock::new(config.alphabet_size, config.sequence_length);
    let agent_config = config.agent.with_trace_decay(kind.trace_decay());
    let mut agent = QLearningAgent::new(lock.num_states(), lock.alphabet_size(), agent_config);

    if kind.regimen == TrainingRegimen::Scaffolded
        && config.total_episodes < config.sequence_length
    {
        warn!(
            experiment = name,
            total_episodes = config.total_episodes,
            sequence_length = config.sequence_length,
            "episode budget is smaller than the number of phases; no episodes will run"
        );
    }

    let mut pipeline = observers
        .into_iter()
        .fold(TrainingPipeline::new(config.training_config()), |p, o| {
            p.with_observer(o)
        });

    info!(experiment = name, "running experiment");
    let training = pipeline.run(&mut lock, &mut agent, kind.regimen)?;

    Ok(ExperimentReport {
        name: name.to_string(),
        kind,
        training,
    })
}

/// Run every named experiment in order, each fully isolated
pub fn run_comparison<S: AsRef<str>>(
    names: &[S],
    config: &ExperimentConfig,
) -> Result<Vec<ExperimentReport>> {
    names
        .iter()
        .map(|name| run_experiment(name.as_ref(), config))
        .collect()
}
