//! Crate-level error types.

use std::fmt;

use crate::scene::SceneMode;

/// Errors produced by the hitscan crate.
///
/// "Nothing was hit" is never an error: pick operations return
/// `Ok(None)` or an empty list for that case. The variants here are the
/// synchronous faults a caller can actually act on.
#[derive(Debug)]
pub enum PickError {
    /// A screen-space pick was requested without a window position
    /// (e.g. the cursor has left the canvas).
    MissingWindowPosition,
    /// A ray pick was requested without a ray.
    MissingRay,
    /// The supplied ray has a zero or non-finite direction.
    DegenerateRay,
    /// The requested strategy is not legal in the current scene mode.
    UnsupportedMode(SceneMode),
    /// Position resolution was requested but the runtime reports no
    /// depth-buffer support. Distinct from "no position" (supported, but
    /// nothing was hit).
    PickPositionUnsupported,
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure (options preset loading).
    Io(std::io::Error),
}

impl fmt::Display for PickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingWindowPosition => {
                write!(f, "window position is required for screen picking")
            }
            Self::MissingRay => write!(f, "ray is required for ray picking"),
            Self::DegenerateRay => {
                write!(f, "ray direction must be finite and non-zero")
            }
            Self::UnsupportedMode(mode) => {
                write!(f, "picking strategy not supported in {mode:?} mode")
            }
            Self::PickPositionUnsupported => {
                write!(f, "position resolution is not supported by the runtime")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for PickError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PickError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_mode() {
        let msg = PickError::UnsupportedMode(SceneMode::Scene2d).to_string();
        assert!(msg.contains("Scene2d"), "got: {msg}");
    }

    #[test]
    fn capability_fault_reads_differently_from_no_position() {
        let msg = PickError::PickPositionUnsupported.to_string();
        assert!(msg.contains("not supported"), "got: {msg}");
    }
}
