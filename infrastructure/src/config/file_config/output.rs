//! Output configuration from TOML (`[output]` section)

use consensus_domain::{DEFAULT_PREVIEW_CHARS, OutputFormat};
use serde::{Deserialize, Serialize};

// Re-export OutputFormat from domain for convenience
pub use consensus_domain::OutputFormat as FileOutputFormat;

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format (uses domain type)
    pub format: Option<OutputFormat>,
    /// Characters of each answer echoed in progress output
    pub preview_chars: usize,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            preview_chars: DEFAULT_PREVIEW_CHARS,
            color: true,
        }
    }
}
