// strand/examples/basic_chain.rs

use strand::{Step, Strand};
use tracing::info;

fn main() {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Chain Example ---");

  // 1. Wrap a sequence. Nothing runs while steps are queued.
  let strand = Strand::new(vec![1, 2, 3, 4, 5]);
  strand
    .map(|x| x * 2)
    .filter(|x| *x > 4)
    .tap(|access, snapshot| info!("after filter: {:?} (step {} of {})", access.get(), snapshot.cursor, snapshot.len()))
    .prepend([0]);

  // 2. A failing step is logged and skipped over.
  strand.enqueue(Step::auto("validate", |access| {
    if access.len() > 3 {
      anyhow::bail!("sequence too long: {}", access.len());
    }
    Ok(())
  }));
  strand.append([100]);

  // 3. value() drains the queue and returns the result.
  let result = strand.value_with(|access| info!("final callback sees {:?}", access.get()));
  info!("Result: {:?}", result);
  assert_eq!(result, vec![0, 6, 8, 10, 100]);
}
