//! Training pipeline abstractions
//!
//! This module provides:
//! - Training regimens that expand into curriculum phases
//! - The episode loop driving a learner on the combination lock
//! - Milestone latches read off the learner's values
//! - Observers recording progress during training

pub mod milestones;
pub mod observers;
pub mod regimen;
pub mod training;

pub use milestones::{Milestone, MilestoneThresholds, Milestones};
pub use observers::{
    MetricsObserver, MetricsSummary, PhaseMetrics, ProgressObserver, SharedMetrics,
};
pub use regimen::{EpisodeBreak, StepStatus, TrainingPhase, TrainingRegimen};
pub use training::{EpisodeSummary, TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Learner, Observer};
