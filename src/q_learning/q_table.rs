//! Dense Q-table with accumulating eligibility traces

use serde::{Deserialize, Serialize};

/// Owned row-major grid indexed by (state, action)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueGrid {
    rows: usize,
    cols: usize,
    cells: Vec<f64>,
}

impl ValueGrid {
    /// Create a zero-filled grid
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![0.0; rows * cols],
        }
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[self.index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        let idx = self.index(row, col);
        self.cells[idx] = value;
    }

    /// All values of one row
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Flat view over every cell, row-major
    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    pub fn fill(&mut self, value: f64) {
        self.cells.iter_mut().for_each(|cell| *cell = value);
    }

    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }
}

/// Index and value of the first maximum in `row`.
///
/// Ties resolve to the lowest index.
pub fn first_max(row: &[f64]) -> (usize, f64) {
    let mut best = (0, f64::NEG_INFINITY);
    for (idx, &value) in row.iter().enumerate() {
        if value > best.1 {
            best = (idx, value);
        }
    }
    best
}

/// Q-table mapping (state, action) pairs to Q-values
///
/// Holds the eligibility traces alongside the values. With `trace_decay == 0`
/// the trace grid is never read or written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QTable {
    values: ValueGrid,
    traces: ValueGrid,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
    /// Trace decay λ (0 disables traces)
    trace_decay: f64,
}

impl QTable {
    /// Create a zero-initialized Q-table with `num_states` rows and
    /// `num_actions` columns
    pub fn new(
        num_states: usize,
        num_actions: usize,
        learning_rate: f64,
        discount_factor: f64,
        trace_decay: f64,
    ) -> Self {
        Self {
            values: ValueGrid::zeros(num_states, num_actions),
            traces: ValueGrid::zeros(num_states, num_actions),
            learning_rate,
            discount_factor,
            trace_decay,
        }
    }

    pub fn get(&self, state: usize, action: usize) -> f64 {
        self.values.get(state, action)
    }

    pub fn set(&mut self, state: usize, action: usize, value: f64) {
        self.values.set(state, action, value);
    }

    /// Q-values for every action in `state`
    pub fn row(&self, state: usize) -> &[f64] {
        self.values.row(state)
    }

    /// Maximum Q-value over actions in `state`
    pub fn max_q(&self, state: usize) -> f64 {
        first_max(self.values.row(state)).1
    }

    /// Greedy action in `state`, lowest index on ties
    pub fn greedy_action(&self, state: usize) -> usize {
        first_max(self.values.row(state)).0
    }

    pub fn values(&self) -> &ValueGrid {
        &self.values
    }

    pub fn traces(&self) -> &ValueGrid {
        &self.traces
    }

    pub fn uses_traces(&self) -> bool {
        self.trace_decay != 0.0
    }

    /// Q-learning update with optional accumulating traces, returning the TD
    /// error.
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// With traces every cell moves by `α δ E(s,a)`, then traces are zeroed on
    /// a terminal transition or decayed by `γλ` otherwise. The sweep touches
    /// the whole table on every step.
    pub fn q_learning_update(
        &mut self,
        state: usize,
        action: usize,
        reward: f64,
        next_state: usize,
        done: bool,
    ) -> f64 {
        let max_next_q = if done { 0.0 } else { self.max_q(next_state) };
        let td_target = reward + self.discount_factor * max_next_q;
        let td_error = td_target - self.get(state, action);

        if !self.uses_traces() {
            let new_q = self.get(state, action) + self.learning_rate * td_error;
            self.set(state, action, new_q);
            return td_error;
        }

        let trace = self.traces.get(state, action);
        self.traces.set(state, action, trace + 1.0);

        let step = self.learning_rate * td_error;
        for (q, e) in self.values.cells.iter_mut().zip(self.traces.cells.iter()) {
            *q += step * *e;
        }

        if done {
            self.traces.fill(0.0);
        } else {
            let decay = self.discount_factor * self.trace_decay;
            self.traces.cells.iter_mut().for_each(|e| *e *= decay);
        }

        td_error
    }

    /// Zero all values and traces
    pub fn reset(&mut self) {
        self.values.fill(0.0);
        self.traces.fill(0.0);
    }

    /// Total number of (state, action) cells
    pub fn size(&self) -> usize {
        self.values.cells.len()
    }
}
