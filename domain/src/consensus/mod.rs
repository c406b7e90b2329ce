//! Consensus domain
//!
//! The convergence protocol: agents answer independently, their answers are
//! merged, and the merge is re-voted until everyone agrees or the iteration
//! bound is hit.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  iteration 0   raw question        → independent answers     │
//! │  iteration 1   merge prompt        → merged answers          │
//! │                (first agent's merged answer = candidate)     │
//! │  iteration 2+  feedback prompt     → True/False votes        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Consensus is checked after every round, including iteration 0.

pub mod outcome;
pub mod round;
pub mod rule;
pub mod state;

pub use outcome::{ConsensusOutcome, ConvergenceStatus};
pub use round::RoundResult;
pub use rule::has_consensus;
pub use state::{ConvergencePhase, ConvergenceState, MERGE_ITERATION};
