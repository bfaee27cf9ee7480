//! Learning-progress milestones read off the value table
//!
//! Both milestones are first-write-wins latches keyed by global episode index.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Value thresholds that trigger each milestone (strict greater-than)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MilestoneThresholds {
    /// Threshold on `max_a Q(k-1, a)`
    pub signal: f64,
    /// Threshold on `max_a Q(0, a)`
    pub mastery: f64,
}

impl Default for MilestoneThresholds {
    fn default() -> Self {
        Self {
            signal: 0.01,
            mastery: 0.1,
        }
    }
}

/// Milestone latched during an [`Milestones::observe`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    FirstSignal,
    Mastery,
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Milestone::FirstSignal => write!(f, "first signal"),
            Milestone::Mastery => write!(f, "mastery"),
        }
    }
}

/// Episodes at which each milestone was first reached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestones {
    /// First episode where the penultimate state shows any learned value
    pub eps_to_first_signal: Option<usize>,
    /// First episode where the start state shows a strong learned value
    pub eps_to_mastery: Option<usize>,
}

impl Milestones {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check both latches after `episode`.
    ///
    /// `signal_value` is the best value at the penultimate state and
    /// `mastery_value` the best value at the start state. Returns the
    /// milestones newly latched by this call.
    pub fn observe(
        &mut self,
        episode: usize,
        signal_value: f64,
        mastery_value: f64,
        thresholds: &MilestoneThresholds,
    ) -> Vec<Milestone> {
        let mut latched = Vec::new();
        if self.eps_to_first_signal.is_none() && signal_value > thresholds.signal {
            self.eps_to_first_signal = Some(episode);
            latched.push(Milestone::FirstSignal);
        }
        if self.eps_to_mastery.is_none() && mastery_value > thresholds.mastery {
            self.eps_to_mastery = Some(episode);
            latched.push(Milestone::Mastery);
        }
        latched
    }

    /// Whether signal was reached no later than mastery, when mastery was
    /// reached at all
    pub fn is_ordered(&self) -> bool {
        match (self.eps_to_first_signal, self.eps_to_mastery) {
            (_, None) => true,
            (Some(signal), Some(mastery)) => signal <= mastery,
            (None, Some(_)) => false,
        }
    }
}
