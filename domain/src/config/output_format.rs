//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished consensus run is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Only the final answer (default)
    #[default]
    Answer,
    /// Status, iteration count, final votes and the answer
    Full,
    /// Machine-readable outcome
    Json,
}
