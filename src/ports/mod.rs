//! Ports (trait boundaries) between the training loop and its collaborators.
//!
//! The pipeline owns these traits; agents and observers implement them.

pub mod learner;
pub mod observer;

pub use learner::{Experience, Learner};
pub use observer::Observer;
