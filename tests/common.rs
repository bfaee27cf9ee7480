//! Common test utilities for the combolock test suite.
//!
//! Scripted learners and recording observers that make pipeline behavior
//! deterministic without depending on a particular RNG stream.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use combolock::{
    Result,
    pipeline::{EpisodeSummary, Learner, Observer, TrainingPhase},
    ports::Experience,
};

/// Learner that always plays a fixed action and reports scripted values.
///
/// `max_value` for the penultimate state returns `signal_per_update` times
/// the number of updates seen; for state 0 it returns
/// `mastery_per_update` times that count.
pub struct ScriptedLearner {
    pub action: usize,
    pub signal_state: usize,
    pub signal_per_update: f64,
    pub mastery_per_update: f64,
    pub updates: usize,
    pub seen: Vec<Experience>,
}

impl ScriptedLearner {
    pub fn always(action: usize, signal_state: usize) -> Self {
        Self {
            action,
            signal_state,
            signal_per_update: 0.0,
            mastery_per_update: 0.0,
            updates: 0,
            seen: Vec::new(),
        }
    }
}

impl Learner for ScriptedLearner {
    fn choose_action(&mut self, _state: usize) -> usize {
        self.action
    }

    fn update(&mut self, experience: &Experience) -> f64 {
        self.updates += 1;
        self.seen.push(*experience);
        0.0
    }

    fn max_value(&self, state: usize) -> f64 {
        if state == 0 {
            self.mastery_per_update * self.updates as f64
        } else if state == self.signal_state {
            self.signal_per_update * self.updates as f64
        } else {
            0.0
        }
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}

/// Event captured by [`RecordingObserver`]
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    TrainingStart(usize),
    PhaseStart(usize, TrainingPhase),
    EpisodeStart(usize, usize),
    EpisodeEnd(usize, EpisodeSummary),
    TrainingEnd,
}

/// Observer that appends every lifecycle event to a shared log
#[derive(Clone, Default)]
pub struct RecordingObserver {
    pub events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

impl Observer for RecordingObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        self.events
            .lock()
            .unwrap()
            .push(Event::TrainingStart(total_episodes));
        Ok(())
    }

    fn on_phase_start(&mut self, phase_idx: usize, phase: &TrainingPhase) -> Result<()> {
        self.events
            .lock()
            .unwrap()
            .push(Event::PhaseStart(phase_idx, *phase));
        Ok(())
    }

    fn on_episode_start(&mut self, episode: usize, start_state: usize) -> Result<()> {
        self.events
            .lock()
            .unwrap()
            .push(Event::EpisodeStart(episode, start_state));
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, summary: &EpisodeSummary) -> Result<()> {
        self.events
            .lock()
            .unwrap()
            .push(Event::EpisodeEnd(episode, *summary));
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.events.lock().unwrap().push(Event::TrainingEnd);
        Ok(())
    }
}
