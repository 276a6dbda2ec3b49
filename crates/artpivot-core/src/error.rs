//! Error type for pivot runs.

use serde::{Deserialize, Serialize};

/// The only fatal condition: the host rejected an attribute write. Per-drawing
/// problems (no target, empty artwork) are skips, not errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PivotError {
    #[error("failed to write attribute {attr} on {node}: {reason}")]
    AttributeWrite {
        node: String,
        attr: String,
        reason: String,
    },
}
