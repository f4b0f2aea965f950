// strand/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StrandError {
  /// A queued step returned an error or panicked. `position` is the cursor value
  /// at the time of failure (the 1-based index of the failing step).
  #[error("{source} [step '{label}' at position {position}]")]
  StepFailed {
    position: usize,
    label: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Mixin not registered: {name}")]
  MixinNotFound { name: String },

  #[error("Mixin '{name}' called with mismatched arguments (expected {expected_type})")]
  TypeMismatch { name: String, expected_type: String },

  #[error("Error in user-provided step body. Source: {source}")]
  StepError {
    #[source]
    source: AnyhowError,
  },

  #[error("Internal strand error: {0}")]
  Internal(String),
}

impl StrandError {
  /// Annotates a step body's error with the step's queue position.
  pub(crate) fn step_failed(position: usize, label: &str, source: AnyhowError) -> Self {
    StrandError::StepFailed {
      position,
      label: label.to_string(),
      source,
    }
  }
}

impl From<AnyhowError> for StrandError {
  fn from(err: AnyhowError) -> Self {
    StrandError::StepError { source: err }
  }
}

pub type StrandResult<T, E = StrandError> = std::result::Result<T, E>;
