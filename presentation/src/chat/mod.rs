//! Interactive chat module
//!
//! Provides a readline-based interactive chat interface for consensus runs.

mod repl;

pub use repl::ChatRepl;
