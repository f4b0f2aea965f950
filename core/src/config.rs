// strand/src/config.rs

//! Construction-time settings for a strand session.

/// Settings shared by a strand's scheduler for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrandConfig {
  /// Session name recorded on tracing spans and events.
  pub label: String,
  /// When `true` (the default), a panicking step is reported like a failing one
  /// and the drain continues. When `false`, the panic unwinds to whoever is
  /// driving the drain.
  pub contain_panics: bool,
}

impl Default for StrandConfig {
  fn default() -> Self {
    Self {
      label: "strand".to_string(),
      contain_panics: true,
    }
  }
}
