//! ε-greedy action selection over a single Q-value row

use rand::Rng;

use super::q_table::first_max;

/// Source of the random draws consumed by ε-greedy selection.
///
/// Every [`rand::Rng`] is a source; tests substitute fixed sequences.
pub trait ExplorationSource {
    /// Uniform draw in `[0, 1)`
    fn unit(&mut self) -> f64;

    /// Uniform action index in `[0, num_actions)`
    fn action(&mut self, num_actions: usize) -> usize;
}

impl<R: Rng + ?Sized> ExplorationSource for R {
    fn unit(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn action(&mut self, num_actions: usize) -> usize {
        self.random_range(0..num_actions)
    }
}

/// Pick an action from `row` with probability `epsilon` of exploring.
///
/// Exploration samples uniformly over every column of the row; exploitation
/// takes the first maximum. Always consumes one `unit` draw, plus one `action`
/// draw when exploring.
pub fn select_epsilon_greedy<S: ExplorationSource + ?Sized>(
    row: &[f64],
    epsilon: f64,
    source: &mut S,
) -> usize {
    if source.unit() < epsilon {
        source.action(row.len())
    } else {
        first_max(row).0
    }
}
