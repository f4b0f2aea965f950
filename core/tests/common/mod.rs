// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use once_cell::sync::Lazy;
use strand::{Access, Strand};
use tracing::Level;

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Common step bodies ---
pub fn push_marker(marker: i32) -> impl FnOnce(&Access<i32>) -> anyhow::Result<()> + Send + 'static {
  move |access| {
    access.write().push(marker);
    Ok(())
  }
}

pub fn failing_step(message: &'static str) -> impl FnOnce(&Access<i32>) -> anyhow::Result<()> + Send + 'static {
  move |_access| Err(anyhow::anyhow!(message))
}

pub fn numbers() -> Strand<i32> {
  Strand::new(vec![1, 2, 3])
}
