//! Training regimens and curriculum phases
//!
//! A regimen expands into a schedule of [`TrainingPhase`]s. Each phase fixes
//! the episode start state and the rule that ends an episode early.

use serde::{Deserialize, Serialize};

use crate::lock::{ADVANCE_ACTION, Transition};

/// Outcome of a single step within an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    /// Episode keeps going
    Continue,
    /// The lock opened
    Succeeded,
    /// The step left the sub-problem the episode is training on
    Regressed,
}

impl StepStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StepStatus::Continue)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StepStatus::Succeeded)
    }
}

/// Rule that ends an episode before the lock opens
///
/// Direct training only stops on a wasted action at the origin, while
/// curriculum phases stop as soon as progress falls behind the phase's start
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeBreak {
    /// Stop when a non-advance action is taken while already at state 0
    MistakeAtOrigin,
    /// Stop when the state drops below the episode's start state
    BelowStart,
}

impl EpisodeBreak {
    /// Classify a step given the state before it, the action taken, and the
    /// resulting transition.
    pub fn classify(
        &self,
        start_state: usize,
        state_before: usize,
        action: usize,
        transition: &Transition,
    ) -> StepStatus {
        if transition.terminal {
            return StepStatus::Succeeded;
        }
        let regressed = match self {
            EpisodeBreak::MistakeAtOrigin => state_before == 0 && action != ADVANCE_ACTION,
            EpisodeBreak::BelowStart => transition.next_state < start_state,
        };
        if regressed {
            StepStatus::Regressed
        } else {
            StepStatus::Continue
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EpisodeBreak::MistakeAtOrigin => "mistake-at-origin",
            EpisodeBreak::BelowStart => "below-start",
        }
    }
}

/// A block of episodes sharing a start state and break rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingPhase {
    /// State every episode in the phase resets to
    pub start_state: usize,
    /// Number of episodes in the phase
    pub episodes: usize,
    /// Early-termination rule
    pub break_rule: EpisodeBreak,
}

impl TrainingPhase {
    pub fn new(start_state: usize, episodes: usize, break_rule: EpisodeBreak) -> Self {
        Self {
            start_state,
            episodes,
            break_rule,
        }
    }
}

/// Training regimen strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainingRegimen {
    /// Every episode starts at state 0
    Direct,
    /// Reverse curriculum: start next to the goal, then move the start back
    Scaffolded,
}

impl TrainingRegimen {
    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            TrainingRegimen::Direct => "Direct training from the start state",
            TrainingRegimen::Scaffolded => {
                "Reverse curriculum starting next to the goal and backing off one state per phase"
            }
        }
    }

    /// Get short label
    pub fn label(&self) -> &'static str {
        match self {
            TrainingRegimen::Direct => "direct",
            TrainingRegimen::Scaffolded => "scaffolded",
        }
    }

    /// Generate the phase schedule for `total_episodes` on a lock of length
    /// `sequence_length`.
    ///
    /// Scaffolded schedules split the budget into `sequence_length` equal
    /// phases; the remainder of the integer division is not run.
    pub fn schedule(&self, total_episodes: usize, sequence_length: usize) -> Vec<TrainingPhase> {
        match self {
            TrainingRegimen::Direct => vec![TrainingPhase::new(
                0,
                total_episodes,
                EpisodeBreak::MistakeAtOrigin,
            )],
            TrainingRegimen::Scaffolded => build_reverse_curriculum(total_episodes, sequence_length),
        }
    }
}

/// Phase `p` starts at `k - 1 - p`, so the last phase trains from state 0.
fn build_reverse_curriculum(total_episodes: usize, sequence_length: usize) -> Vec<TrainingPhase> {
    if sequence_length == 0 {
        return vec![];
    }
    let phase_episodes = total_episodes / sequence_length;
    (0..sequence_length)
        .map(|phase| {
            TrainingPhase::new(
                sequence_length - 1 - phase,
                phase_episodes,
                EpisodeBreak::BelowStart,
            )
        })
        .collect()
}
