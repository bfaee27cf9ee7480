//! Tabular Q-learning with optional eligibility traces
//!
//! ## Update rule
//!
//! | Trace decay | Cells touched per update | Traces |
//! |-------------|--------------------------|--------|
//! | λ = 0 | visited (s, a) only | unused |
//! | λ > 0 | every cell, scaled by its trace | +1 at (s, a), then ×γλ or cleared on terminal |
//!
//! ## Usage Example
//!
//! ```no_run
//! use combolock::ports::Learner;
//! use combolock::q_learning::{AgentConfig, QLearningAgent};
//!
//! let config = AgentConfig::default().with_trace_decay(0.9).with_seed(7);
//! let mut agent = QLearningAgent::new(5, 10, config);
//! let action = agent.choose_action(0);
//! ```

pub mod agent;
pub mod exploration;
pub mod q_table;

pub use agent::{AgentConfig, QLearningAgent};
pub use exploration::{ExplorationSource, select_epsilon_greedy};
pub use q_table::{QTable, ValueGrid, first_max};
