//! CLI infrastructure for the combolock simulator
//!
//! This module provides the command-line surface that runs the named
//! experiments and prints the comparison table.

pub mod commands;
pub mod output;
