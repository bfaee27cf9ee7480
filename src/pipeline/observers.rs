//! Observer implementations for training pipelines

use std::sync::{Arc, Mutex, MutexGuard};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use super::{
    regimen::{StepStatus, TrainingPhase},
    training::EpisodeSummary,
};
use crate::{
    Result,
    ports::{Experience, Observer},
};

/// Progress bar observer - shows episode progress and success count
pub struct ProgressObserver {
    label: String,
    progress_bar: Option<ProgressBar>,
    successes: usize,
    phase_idx: usize,
}

impl ProgressObserver {
    /// Create a new progress observer with a prefix label (usually the
    /// experiment name)
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            progress_bar: None,
            successes: 0,
            phase_idx: 0,
        }
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{prefix:20} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        pb.set_prefix(self.label.clone());
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_phase_start(&mut self, phase_idx: usize, _phase: &TrainingPhase) -> Result<()> {
        self.phase_idx = phase_idx;
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, summary: &EpisodeSummary) -> Result<()> {
        if summary.status.is_success() {
            self.successes += 1;
        }
        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(format!(
                "phase {} | unlocked {}",
                self.phase_idx, self.successes
            ));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_and_clear();
        }
        Ok(())
    }
}

/// Per-phase episode statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseMetrics {
    pub start_state: usize,
    pub episodes: usize,
    pub successes: usize,
    pub regressions: usize,
    pub steps: usize,
}

impl PhaseMetrics {
    /// Fraction of this phase's episodes that opened the lock
    pub fn success_rate(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.successes as f64 / self.episodes as f64
        }
    }
}

/// Metrics observer - tracks outcomes and episode lengths per phase
#[derive(Debug, Default)]
pub struct MetricsObserver {
    phases: Vec<PhaseMetrics>,
    episode_lengths: Vec<usize>,
    td_error_sum: f64,
    updates: usize,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phases(&self) -> &[PhaseMetrics] {
        &self.phases
    }

    pub fn total_episodes(&self) -> usize {
        self.episode_lengths.len()
    }

    /// Get average episode length in steps
    pub fn avg_episode_length(&self) -> f64 {
        if self.episode_lengths.is_empty() {
            0.0
        } else {
            self.episode_lengths.iter().sum::<usize>() as f64 / self.episode_lengths.len() as f64
        }
    }

    /// Mean absolute TD error over every update seen
    pub fn mean_abs_td_error(&self) -> f64 {
        if self.updates == 0 {
            0.0
        } else {
            self.td_error_sum / self.updates as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_episodes: self.total_episodes(),
            successes: self.phases.iter().map(|p| p.successes).sum(),
            regressions: self.phases.iter().map(|p| p.regressions).sum(),
            avg_episode_length: self.avg_episode_length(),
            mean_abs_td_error: self.mean_abs_td_error(),
            phases: self.phases.clone(),
        }
    }
}

/// Cloneable handle to a [`MetricsObserver`]
///
/// The pipeline owns its observers, so callers keep one clone and hand the
/// other to [`TrainingPipeline::with_observer`](super::TrainingPipeline::with_observer)
/// to read the summary after the run.
#[derive(Debug, Clone, Default)]
pub struct SharedMetrics {
    inner: Arc<Mutex<MetricsObserver>>,
}

impl SharedMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Summary of everything recorded so far
    pub fn summary(&self) -> MetricsSummary {
        self.lock().summary()
    }

    fn lock(&self) -> MutexGuard<'_, MetricsObserver> {
        // Recording never panics midway, so a poisoned lock still holds
        // consistent counts
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Observer for SharedMetrics {
    fn on_phase_start(&mut self, phase_idx: usize, phase: &TrainingPhase) -> Result<()> {
        self.lock().on_phase_start(phase_idx, phase)
    }

    fn on_step(
        &mut self,
        episode: usize,
        step_num: usize,
        experience: &Experience,
        td_error: f64,
    ) -> Result<()> {
        self.lock().on_step(episode, step_num, experience, td_error)
    }

    fn on_episode_end(&mut self, episode: usize, summary: &EpisodeSummary) -> Result<()> {
        self.lock().on_episode_end(episode, summary)
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_episodes: usize,
    pub successes: usize,
    pub regressions: usize,
    pub avg_episode_length: f64,
    pub mean_abs_td_error: f64,
    pub phases: Vec<PhaseMetrics>,
}

impl Observer for MetricsObserver {
    fn on_phase_start(&mut self, _phase_idx: usize, phase: &TrainingPhase) -> Result<()> {
        self.phases.push(PhaseMetrics {
            start_state: phase.start_state,
            ..PhaseMetrics::default()
        });
        Ok(())
    }

    fn on_step(
        &mut self,
        _episode: usize,
        _step_num: usize,
        _experience: &Experience,
        td_error: f64,
    ) -> Result<()> {
        self.td_error_sum += td_error.abs();
        self.updates += 1;
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, summary: &EpisodeSummary) -> Result<()> {
        self.episode_lengths.push(summary.steps);
        if self.phases.len() <= summary.phase_idx {
            self.phases
                .resize_with(summary.phase_idx + 1, PhaseMetrics::default);
        }
        let phase = &mut self.phases[summary.phase_idx];
        phase.episodes += 1;
        phase.steps += summary.steps;
        match summary.status {
            StepStatus::Succeeded => phase.successes += 1,
            StepStatus::Regressed => phase.regressions += 1,
            StepStatus::Continue => {}
        }
        Ok(())
    }
}
