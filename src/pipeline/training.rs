//! Training pipeline driving a learner through episodes on the lock

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    milestones::{MilestoneThresholds, Milestones},
    regimen::{StepStatus, TrainingPhase, TrainingRegimen},
};
use crate::{
    Error, Result,
    lock::CombinationLock,
    ports::{Experience, Learner, Observer},
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Episode budget before curriculum splitting
    pub total_episodes: usize,

    /// Steps after which an episode is declared stuck
    pub max_steps_per_episode: usize,

    /// Random seed handed to the learner
    pub seed: Option<u64>,

    /// Milestone thresholds
    pub thresholds: MilestoneThresholds,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            total_episodes: 12000,
            max_steps_per_episode: 100_000,
            seed: None,
            thresholds: MilestoneThresholds::default(),
        }
    }
}

/// How a single episode went
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Phase the episode belonged to
    pub phase_idx: usize,
    /// State the episode was reset to
    pub start_state: usize,
    /// Number of environment steps taken
    pub steps: usize,
    /// Status of the final step
    pub status: StepStatus,
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Milestone episodes
    pub milestones: Milestones,

    /// Episodes actually run
    pub total_episodes: usize,

    /// Episodes that opened the lock
    pub successes: usize,

    /// Episodes cut short by the phase's break rule
    pub regressions: usize,

    /// Environment steps across all episodes
    pub total_steps: usize,

    /// Phases in the schedule
    pub phases: usize,
}

impl TrainingResult {
    /// Fraction of episodes that opened the lock
    pub fn success_rate(&self) -> f64 {
        if self.total_episodes > 0 {
            self.successes as f64 / self.total_episodes as f64
        } else {
            0.0
        }
    }
}

/// Training pipeline for a single learner on a combination lock
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run the schedule `regimen` produces for the configured episode budget
    pub fn run(
        &mut self,
        lock: &mut CombinationLock,
        agent: &mut dyn Learner,
        regimen: TrainingRegimen,
    ) -> Result<TrainingResult> {
        let schedule = regimen.schedule(self.config.total_episodes, lock.sequence_length());
        info!(
            regimen = regimen.label(),
            learner = agent.name(),
            phases = schedule.len(),
            "starting training"
        );
        self.run_schedule(lock, agent, &schedule)
    }

    /// Run training over an explicit sequence of phases
    ///
    /// The agent keeps its values across phases. Episodes are numbered
    /// globally, so phase `p` of equal-sized phases starts at
    /// `p * phase_episodes`.
    pub fn run_schedule(
        &mut self,
        lock: &mut CombinationLock,
        agent: &mut dyn Learner,
        schedule: &[TrainingPhase],
    ) -> Result<TrainingResult> {
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed)?;
        }

        let all_episodes: usize = schedule.iter().map(|p| p.episodes).sum();
        for observer in &mut self.observers {
            observer.on_training_start(all_episodes)?;
        }

        let signal_state = lock.sequence_length().saturating_sub(1);
        let mut result = TrainingResult {
            milestones: Milestones::new(),
            total_episodes: 0,
            successes: 0,
            regressions: 0,
            total_steps: 0,
            phases: schedule.len(),
        };

        for (phase_idx, phase) in schedule.iter().enumerate() {
            debug!(
                phase = phase_idx,
                start_state = phase.start_state,
                episodes = phase.episodes,
                break_rule = phase.break_rule.label(),
                "entering phase"
            );
            for observer in &mut self.observers {
                observer.on_phase_start(phase_idx, phase)?;
            }

            for _ in 0..phase.episodes {
                let episode = result.total_episodes;
                let summary = self.run_episode(episode, phase_idx, phase, lock, agent)?;

                for milestone in result.milestones.observe(
                    episode,
                    agent.max_value(signal_state),
                    agent.max_value(0),
                    &self.config.thresholds,
                ) {
                    debug!(episode, phase = phase_idx, "reached {milestone}");
                }

                match summary.status {
                    StepStatus::Succeeded => result.successes += 1,
                    StepStatus::Regressed => result.regressions += 1,
                    StepStatus::Continue => {}
                }
                result.total_steps += summary.steps;
                result.total_episodes += 1;

                for observer in &mut self.observers {
                    observer.on_episode_end(episode, &summary)?;
                }
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        info!(
            episodes = result.total_episodes,
            successes = result.successes,
            signal = ?result.milestones.eps_to_first_signal,
            mastery = ?result.milestones.eps_to_mastery,
            "training finished"
        );
        Ok(result)
    }

    fn run_episode(
        &mut self,
        episode: usize,
        phase_idx: usize,
        phase: &TrainingPhase,
        lock: &mut CombinationLock,
        agent: &mut dyn Learner,
    ) -> Result<EpisodeSummary> {
        let mut state = lock.reset(phase.start_state);
        for observer in &mut self.observers {
            observer.on_episode_start(episode, state)?;
        }

        let mut steps = 0;
        loop {
            if steps >= self.config.max_steps_per_episode {
                return Err(Error::EpisodeDidNotTerminate {
                    episode,
                    start_state: phase.start_state,
                    steps,
                });
            }

            let action = agent.choose_action(state);
            let transition = lock.step(action);
            let experience = Experience {
                state,
                action,
                reward: transition.reward,
                next_state: transition.next_state,
                terminal: transition.terminal,
            };
            let td_error = agent.update(&experience);

            for observer in &mut self.observers {
                observer.on_step(episode, steps, &experience, td_error)?;
            }

            let status = phase
                .break_rule
                .classify(phase.start_state, state, action, &transition);
            state = transition.next_state;
            steps += 1;

            if status.is_terminal() {
                return Ok(EpisodeSummary {
                    phase_idx,
                    start_state: phase.start_state,
                    steps,
                    status,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        pipeline::EpisodeBreak,
        q_learning::{AgentConfig, QLearningAgent},
    };

    #[test]
    fn test_training_pipeline_direct() {
        let config = TrainingConfig {
            total_episodes: 200,
            seed: Some(42),
            ..TrainingConfig::default()
        };
        let mut pipeline = TrainingPipeline::new(config);
        let mut lock = CombinationLock::new(10, 4);
        let mut agent = QLearningAgent::new(5, 10, AgentConfig::default());

        let result = pipeline
            .run(&mut lock, &mut agent, TrainingRegimen::Direct)
            .unwrap();

        assert_eq!(result.total_episodes, 200);
        assert_eq!(result.phases, 1);
        assert_eq!(result.successes + result.regressions, 200);
        assert!(result.total_steps >= 200);
    }

    #[test]
    fn test_step_cap_surfaces_error() {
        // With ε = 0 and a fresh table the greedy action is 0, so a phase
        // starting at the origin under the below-start rule never ends.
        let config = TrainingConfig {
            total_episodes: 1,
            max_steps_per_episode: 50,
            ..TrainingConfig::default()
        };
        let mut pipeline = TrainingPipeline::new(config);
        let mut lock = CombinationLock::new(10, 4);
        let mut agent = QLearningAgent::new(5, 10, AgentConfig::default().with_epsilon(0.0));
        let schedule = [TrainingPhase::new(0, 1, EpisodeBreak::BelowStart)];

        let err = pipeline
            .run_schedule(&mut lock, &mut agent, &schedule)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::EpisodeDidNotTerminate {
                episode: 0,
                start_state: 0,
                steps: 50
            }
        ));
    }

    #[test]
    fn test_empty_schedule_runs_nothing() {
        let mut pipeline = TrainingPipeline::new(TrainingConfig::default());
        let mut lock = CombinationLock::new(10, 4);
        let mut agent = QLearningAgent::new(5, 10, AgentConfig::default());

        let result = pipeline.run_schedule(&mut lock, &mut agent, &[]).unwrap();

        assert_eq!(result.total_episodes, 0);
        assert_eq!(result.milestones, Milestones::default());
        assert_eq!(result.success_rate(), 0.0);
    }
}
