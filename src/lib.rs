//! Combination-lock curriculum experiments
//!
//! This crate provides:
//! - A deterministic combination-lock MDP
//! - A tabular Q-learning agent with optional eligibility traces
//! - A training pipeline with direct and reverse-curriculum regimens
//! - Milestone tracking of how fast value reaches the start state
//! - A CLI that compares named configurations side by side

pub mod cli;
pub mod error;
pub mod experiment;
pub mod lock;
pub mod pipeline;
pub mod ports;
pub mod q_learning;

pub use error::{Error, Result};
pub use experiment::{
    DEFAULT_EXPERIMENTS, ExperimentConfig, ExperimentKind, ExperimentReport, run_comparison,
    run_experiment,
};
pub use lock::{CombinationLock, Transition};
pub use pipeline::Milestones;
pub use q_learning::{AgentConfig, QLearningAgent};
