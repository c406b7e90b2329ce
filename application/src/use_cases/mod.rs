//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod execute_round;
pub mod run_consensus;
