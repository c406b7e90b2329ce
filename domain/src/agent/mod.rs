//! Agent domain
//!
//! Identity of a participating oracle and the shape of what it answers.

pub mod id;
pub mod response;

pub use id::AgentId;
pub use response::{AGREE_TOKEN, AgentResponse};
