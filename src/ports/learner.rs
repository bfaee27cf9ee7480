//! Learner port - abstraction over value-learning agents
//!
//! The training pipeline drives any agent through this trait: it asks for
//! actions, feeds back experience, and reads state values to detect
//! milestones.

use serde::{Deserialize, Serialize};

use crate::Result;

/// One observed step: `(s, a, r, s', terminal)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub state: usize,
    pub action: usize,
    pub reward: f64,
    pub next_state: usize,
    pub terminal: bool,
}

/// Learner trait - unified interface for tabular value learners
///
/// # Examples
///
/// ```no_run
/// use combolock::ports::{Experience, Learner};
///
/// fn one_step<L: Learner>(agent: &mut L, state: usize) -> usize {
///     agent.choose_action(state)
/// }
/// ```
pub trait Learner: Send {
    /// Select an action for `state`.
    ///
    /// Consumes draws from the learner's random source when it explores.
    fn choose_action(&mut self, state: usize) -> usize;

    /// Apply one learning update and return the TD error.
    fn update(&mut self, experience: &Experience) -> f64;

    /// Highest action value currently estimated for `state`.
    fn max_value(&self, state: usize) -> f64;

    /// Get the learner's name.
    ///
    /// Used for identification in logs and reports.
    fn name(&self) -> &str;

    /// Reset learner state to initial conditions.
    ///
    /// The pipeline never calls this mid-run; learned values are meant to
    /// carry across episodes and curriculum phases.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn reset(&mut self) -> Result<()> {
        Ok(())
    }

    /// Seed the learner's internal random number generator.
    ///
    /// Training pipelines call this when supplied with a deterministic seed.
    ///
    /// # Default Implementation
    ///
    /// Does nothing and returns `Ok(())`.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}
