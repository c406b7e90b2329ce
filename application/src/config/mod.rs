//! Application-level configuration.
//!
//! - [`ConsensusParams`] — convergence loop control (iterations, timeouts, dispatch)

pub mod consensus_params;

pub use consensus_params::{
    ConsensusParams, DEFAULT_AGENT_TIMEOUT, DEFAULT_MAX_ITERATIONS, DispatchMode,
};
