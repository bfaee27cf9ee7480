//! Observer port - abstraction for training observation
//!
//! Observers collect data during training without coupling the episode loop
//! to any particular output.

use crate::{
    Result,
    pipeline::{EpisodeSummary, TrainingPhase},
    ports::Experience,
};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - once
/// 2. For each phase:
///    - `on_phase_start(phase_idx, phase)`
///    - For each episode:
///      - `on_episode_start(episode, start_state)`
///      - `on_step(...)` - after each learning update
///      - `on_episode_end(episode, summary)`
/// 3. `on_training_end()` - once
///
/// # Examples
///
/// ```no_run
/// use combolock::{pipeline::EpisodeSummary, ports::Observer};
///
/// struct SuccessCounter {
///     successes: usize,
/// }
///
/// impl Observer for SuccessCounter {
///     fn on_episode_end(
///         &mut self,
///         _episode: usize,
///         summary: &EpisodeSummary,
///     ) -> combolock::Result<()> {
///         if summary.status.is_success() {
///             self.successes += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before the first episode.
    ///
    /// `total_episodes` counts only episodes the schedule will actually run.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a curriculum phase begins.
    fn on_phase_start(&mut self, _phase_idx: usize, _phase: &TrainingPhase) -> Result<()> {
        Ok(())
    }

    /// Called after the environment is reset for an episode.
    fn on_episode_start(&mut self, _episode: usize, _start_state: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each learning update.
    ///
    /// # Parameters
    ///
    /// * `episode` - Global episode index
    /// * `step_num` - Step within the episode (0-based)
    /// * `experience` - The transition just learned from
    /// * `td_error` - TD error of that update
    fn on_step(
        &mut self,
        _episode: usize,
        _step_num: usize,
        _experience: &Experience,
        _td_error: f64,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when an episode ends, after milestones are checked.
    fn on_episode_end(&mut self, _episode: usize, _summary: &EpisodeSummary) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
