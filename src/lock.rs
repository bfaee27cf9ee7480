//! Combination-lock MDP
//!
//! A deterministic chain of `k + 1` progress states over an alphabet of `S`
//! actions. Only [`ADVANCE_ACTION`] moves progress forward; every other
//! action snaps progress back to 0. Reaching progress `k` ends the episode
//! with reward 1.0.

use serde::{Deserialize, Serialize};

/// The single action that advances progress along the sequence.
pub const ADVANCE_ACTION: usize = 1;

/// Reward paid on the terminal (unlocking) transition.
pub const UNLOCK_REWARD: f64 = 1.0;

/// Result of one environment step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// State after the step
    pub next_state: usize,
    /// Immediate reward
    pub reward: f64,
    /// Whether the lock opened on this step
    pub terminal: bool,
}

/// Combination-lock environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinationLock {
    alphabet_size: usize,
    sequence_length: usize,
    state: usize,
}

impl CombinationLock {
    /// Create a lock with `alphabet_size` actions and a required run of
    /// `sequence_length` advance actions. Starts at state 0.
    pub fn new(alphabet_size: usize, sequence_length: usize) -> Self {
        Self {
            alphabet_size,
            sequence_length,
            state: 0,
        }
    }

    /// Begin a new episode at `start_state` and return it.
    pub fn reset(&mut self, start_state: usize) -> usize {
        debug_assert!(start_state <= self.sequence_length);
        self.state = start_state;
        self.state
    }

    /// Apply `action` to the current state.
    pub fn step(&mut self, action: usize) -> Transition {
        if action == ADVANCE_ACTION {
            self.state += 1;
            let terminal = self.state == self.sequence_length;
            Transition {
                next_state: self.state,
                reward: if terminal { UNLOCK_REWARD } else { 0.0 },
                terminal,
            }
        } else {
            self.state = 0;
            Transition {
                next_state: 0,
                reward: 0.0,
                terminal: false,
            }
        }
    }

    pub fn state(&self) -> usize {
        self.state
    }

    /// Number of actions (`S`)
    pub fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    /// Number of advance actions needed to open the lock (`k`)
    pub fn sequence_length(&self) -> usize {
        self.sequence_length
    }

    /// Rows needed in a value table covering every reachable state, including
    /// the terminal one.
    pub fn num_states(&self) -> usize {
        self.sequence_length + 1
    }
}
