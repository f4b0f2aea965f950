// strand/examples/async_wait.rs

use std::time::Duration;
use strand::{Access, MixinTable, Strand};
use tokio::sync::oneshot;
use tracing::info;

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

  info!("--- Async Wait Example ---");

  let strand = Strand::builder().label("prices").build(vec![120_u32, 80, 45]);
  strand.mixins(MixinTable::new().with("discount", |access: &Access<u32>, percent: u32| {
    let discounted: Vec<u32> = access.read().iter().map(|p| p * (100 - percent) / 100).collect();
    access.set(discounted);
    Ok(())
  }));

  let (done_tx, done_rx) = oneshot::channel();

  strand
    .wait(|access, resume| {
      // Simulate fetching an extra price from somewhere slow.
      tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        access.write().push(200);
        resume.resume();
      });
      Ok(())
    })
    .call("discount", 10_u32)
    .sort()
    .tap(move |access, _| {
      let _ = done_tx.send(access.get());
    });

  // The drain pauses at the wait, so this is the untouched sequence.
  let early = strand.value();
  info!("Returned immediately: {:?}", early);

  let finished = done_rx.await.expect("pipeline finished");
  info!("After resume: {:?}", finished);
  assert_eq!(finished, vec![40, 72, 108, 180]);
}
