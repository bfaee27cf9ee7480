//! Q-learning agent
//!
//! Tabular off-policy TD control over the combination lock, optionally with
//! accumulating eligibility traces. Traces are not cut after exploratory
//! actions; they only clear on a terminal transition.

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::{Experience, Learner},
    q_learning::{exploration::select_epsilon_greedy, q_table::QTable},
};

/// Hyperparameters for a [`QLearningAgent`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Step size α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
    /// Trace decay λ, 0 disables eligibility traces
    pub trace_decay: f64,
    /// Exploration rate ε
    pub epsilon: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.5,
            discount_factor: 0.9,
            trace_decay: 0.0,
            epsilon: 0.1,
            seed: None,
        }
    }
}

impl AgentConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_trace_decay(mut self, trace_decay: f64) -> Self {
        self.trace_decay = trace_decay;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every rate lies in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first offending
    /// parameter.
    pub fn validate(&self) -> Result<()> {
        let rates = [
            ("learning rate", self.learning_rate),
            ("discount factor", self.discount_factor),
            ("trace decay", self.trace_decay),
            ("epsilon", self.epsilon),
        ];
        for (label, value) in rates {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::invalid_config(format!(
                    "{label} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Q-learning agent (off-policy TD control)
///
/// Owns its Q-table for the whole run: values persist across episodes and
/// curriculum phases.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    epsilon: f64,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl QLearningAgent {
    /// Create an agent for `num_states` states and `num_actions` actions
    pub fn new(num_states: usize, num_actions: usize, config: AgentConfig) -> Self {
        Self {
            q_table: QTable::new(
                num_states,
                num_actions,
                config.learning_rate,
                config.discount_factor,
                config.trace_decay,
            ),
            epsilon: config.epsilon,
            rng: build_rng(config.seed),
            rng_seed: config.seed,
        }
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Whether updates sweep eligibility traces
    pub fn uses_traces(&self) -> bool {
        self.q_table.uses_traces()
    }

    fn reset_rng(&mut self) {
        self.rng = build_rng(self.rng_seed);
    }
}

impl Learner for QLearningAgent {
    fn choose_action(&mut self, state: usize) -> usize {
        select_epsilon_greedy(self.q_table.row(state), self.epsilon, &mut self.rng)
    }

    fn update(&mut self, experience: &Experience) -> f64 {
        self.q_table.q_learning_update(
            experience.state,
            experience.action,
            experience.reward,
            experience.next_state,
            experience.terminal,
        )
    }

    fn max_value(&self, state: usize) -> f64 {
        self.q_table.max_q(state)
    }

    fn name(&self) -> &str {
        if self.uses_traces() {
            "Q(λ)"
        } else {
            "Q-Learning"
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.q_table.reset();
        self.reset_rng();
        Ok(())
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn experience(
        state: usize,
        action: usize,
        reward: f64,
        next_state: usize,
        terminal: bool,
    ) -> Experience {
        Experience {
            state,
            action,
            reward,
            next_state,
            terminal,
        }
    }

    #[test]
    fn test_default_config_matches_experiment_constants() {
        let config = AgentConfig::default();
        assert_eq!(config.learning_rate, 0.5);
        assert_eq!(config.discount_factor, 0.9);
        assert_eq!(config.trace_decay, 0.0);
        assert_eq!(config.epsilon, 0.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_rates() {
        let err = AgentConfig::default()
            .with_epsilon(1.5)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("epsilon"));
        assert!(
            AgentConfig::default()
                .with_learning_rate(-0.1)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_greedy_agent_picks_lowest_index_on_fresh_table() {
        let mut agent = QLearningAgent::new(5, 10, AgentConfig::default().with_epsilon(0.0));
        for state in 0..5 {
            assert_eq!(agent.choose_action(state), 0);
        }
    }

    #[test]
    fn test_update_moves_visited_value() {
        let mut agent = QLearningAgent::new(5, 10, AgentConfig::default().with_seed(1));
        let td_error = agent.update(&experience(3, 1, 1.0, 4, true));
        assert_eq!(td_error, 1.0);
        assert!((agent.max_value(3) - 0.5).abs() < 1e-12);
        assert_eq!(agent.max_value(0), 0.0);
    }

    #[test]
    fn test_reset_clears_learning() {
        let mut agent = QLearningAgent::new(5, 10, AgentConfig::default().with_trace_decay(0.9));
        agent.update(&experience(0, 1, 0.0, 1, false));
        agent.update(&experience(3, 1, 1.0, 4, true));
        assert!(agent.max_value(3) > 0.0);

        agent.reset().unwrap();
        assert!(agent.q_table().values().cells().iter().all(|&q| q == 0.0));
        assert!(agent.q_table().traces().cells().iter().all(|&e| e == 0.0));
    }

    #[test]
    fn test_seeded_agents_choose_identically() {
        let config = AgentConfig::default().with_epsilon(0.5).with_seed(42);
        let mut a = QLearningAgent::new(5, 10, config);
        let mut b = QLearningAgent::new(5, 10, config);
        let left: Vec<usize> = (0..50).map(|_| a.choose_action(0)).collect();
        let right: Vec<usize> = (0..50).map(|_| b.choose_action(0)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_name_reflects_trace_mode() {
        let plain = QLearningAgent::new(5, 10, AgentConfig::default());
        let traced = QLearningAgent::new(5, 10, AgentConfig::default().with_trace_decay(0.9));
        assert_eq!(plain.name(), "Q-Learning");
        assert_eq!(traced.name(), "Q(λ)");
    }
}
