use serde::{Deserialize, Serialize};

/// Options applied when a statement is normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecomposerConfig {
    /// Reject statements that do not start with `select`.
    pub strict: bool,
}

impl Default for DecomposerConfig {
    fn default() -> Self {
        Self { strict: true }
    }
}

impl DecomposerConfig {
    pub fn lenient() -> Self {
        Self { strict: false }
    }
}
