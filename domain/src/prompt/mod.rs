//! Prompt domain
//!
//! Templates for the initial, merge and feedback prompts of the convergence loop.

mod template;

pub use template::{PromptKind, PromptTemplate};
