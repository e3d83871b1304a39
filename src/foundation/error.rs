/// Convenience result type used across segue.
pub type SegueResult<T> = Result<T, SegueError>;

/// Top-level error taxonomy used by orchestration APIs.
///
/// Missing collaborators (screens without behaviours, unresolvable views) are deliberately not
/// represented here: they degrade to no-ops.
#[derive(thiserror::Error, Debug)]
pub enum SegueError {
    /// Invalid user-provided configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A run was started on an orchestrator whose previous run has not finalized.
    #[error("transition '{transition}' is already running")]
    RunInProgress {
        /// Transition identifier of the busy orchestrator.
        transition: String,
    },

    /// An interactive-only operation was used on a timed run.
    #[error("interaction error: {0}")]
    NotInteractive(String),

    /// A run operation was used while no run is active.
    #[error("no active run: {0}")]
    NoActiveRun(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SegueError {
    /// Build a [`SegueError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SegueError::RunInProgress`] value.
    pub fn run_in_progress(transition: impl Into<String>) -> Self {
        Self::RunInProgress {
            transition: transition.into(),
        }
    }

    /// Build a [`SegueError::NotInteractive`] value.
    pub fn not_interactive(msg: impl Into<String>) -> Self {
        Self::NotInteractive(msg.into())
    }

    /// Build a [`SegueError::NoActiveRun`] value.
    pub fn no_active_run(msg: impl Into<String>) -> Self {
        Self::NoActiveRun(msg.into())
    }

    /// Build a [`SegueError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
