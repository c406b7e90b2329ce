//! Agent responses and the two-part wire format.
//!
//! Every agent answers in the same free-text protocol: the first line is the
//! agreement flag (`True` / `False`), the rest is the answer body.
//!
//! ```text
//! True
//! Rust is a systems programming language focused on safety...
//! ```
//!
//! The protocol is fragile (it depends on the oracle following the
//! instructions in the prompt) but it is the contract the prompts advertise,
//! so it is parsed exactly as advertised.

use serde::{Deserialize, Serialize};

/// The literal first-line token that signals agreement.
pub const AGREE_TOKEN: &str = "true";

/// One agent's answer for one round.
///
/// Produced fresh each round and never mutated. `text` may be empty, for
/// example when the gateway could not reach the oracle.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AgentResponse {
    /// Whether the agent declared agreement on its first line
    pub agrees: bool,
    /// The answer body (or the raw payload when no body line was present)
    pub text: String,
}

impl AgentResponse {
    pub fn new(agrees: bool, text: impl Into<String>) -> Self {
        Self {
            agrees,
            text: text.into(),
        }
    }

    /// An agreeing response
    pub fn agree(text: impl Into<String>) -> Self {
        Self::new(true, text)
    }

    /// A disagreeing response
    pub fn disagree(text: impl Into<String>) -> Self {
        Self::new(false, text)
    }

    /// The degraded response used when an oracle could not be reached.
    pub fn unavailable() -> Self {
        Self::new(false, String::new())
    }

    /// Parse raw oracle output.
    ///
    /// Splits at the first line break into `head` and `rest`. `agrees` is
    /// `head` trimmed and lowercased compared against `"true"`. `text` is
    /// `rest` trimmed when a line break exists, otherwise the whole raw
    /// output verbatim.
    ///
    /// # Examples
    ///
    /// ```
    /// use consensus_domain::AgentResponse;
    ///
    /// let r = AgentResponse::parse("True\nfoo bar");
    /// assert!(r.agrees);
    /// assert_eq!(r.text, "foo bar");
    ///
    /// let r = AgentResponse::parse("garbage with no match");
    /// assert!(!r.agrees);
    /// assert_eq!(r.text, "garbage with no match");
    /// ```
    pub fn parse(raw: &str) -> Self {
        match raw.split_once('\n') {
            Some((head, rest)) => Self {
                agrees: is_agree_token(head),
                text: rest.trim().to_string(),
            },
            None => Self {
                agrees: is_agree_token(raw),
                text: raw.to_string(),
            },
        }
    }
}

fn is_agree_token(head: &str) -> bool {
    head.trim().to_lowercase() == AGREE_TOKEN
}
