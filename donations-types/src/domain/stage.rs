//! Stages of a single payment initialization.

use std::fmt;

use crate::error::ErrorKind;

/// Linear progress of one invocation:
/// `Received -> Authenticating -> Authenticated -> Initializing -> Completed`,
/// with `Failed` reachable from any non-terminal stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStage {
    Received,
    Authenticating,
    Authenticated,
    Initializing,
    Completed,
    Failed(ErrorKind),
}

impl InitStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, InitStage::Completed | InitStage::Failed(_))
    }
}

impl fmt::Display for InitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitStage::Received => f.write_str("received"),
            InitStage::Authenticating => f.write_str("authenticating"),
            InitStage::Authenticated => f.write_str("authenticated"),
            InitStage::Initializing => f.write_str("initializing"),
            InitStage::Completed => f.write_str("completed"),
            InitStage::Failed(kind) => write!(f, "failed({kind})"),
        }
    }
}
