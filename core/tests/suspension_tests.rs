// tests/suspension_tests.rs
mod common;
use common::*;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use strand::{DrainState, Resume, Strand};
use tokio::sync::oneshot;
use tracing_test::traced_test;

#[traced_test]
#[tokio::test]
async fn test_wait_pauses_until_timer_resumes() {
  let strand = numbers();
  let (done_tx, done_rx) = oneshot::channel();

  strand
    .wait(move |_access, resume| {
      tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        resume.resume();
        let _ = done_tx.send(());
      });
      Ok(())
    })
    .append([9]);

  let snapshot = strand.value();
  assert_eq!(snapshot, vec![1, 2, 3]);
  assert_eq!(strand.snapshot().state, DrainState::Suspended { position: 1 });

  done_rx.await.unwrap();
  assert_eq!(strand.get(), vec![1, 2, 3, 9]);
  assert_eq!(strand.snapshot().state, DrainState::Idle);
}

#[traced_test]
#[tokio::test]
async fn test_wait_resumed_from_another_thread() {
  let strand = Strand::new(vec!["start".to_string()]);
  let (done_tx, done_rx) = oneshot::channel();
  let (go_tx, go_rx) = std::sync::mpsc::channel::<()>();

  strand
    .wait(move |access, resume| {
      std::thread::spawn(move || {
        go_rx.recv().unwrap();
        access.write().push("fetched".to_string());
        resume.resume();
        let _ = done_tx.send(());
      });
      Ok(())
    })
    .map(|s| s.to_uppercase());

  assert_eq!(strand.value(), vec!["start"]);
  go_tx.send(()).unwrap();
  done_rx.await.unwrap();
  assert_eq!(strand.get(), vec!["START", "FETCHED"]);
}

#[traced_test]
#[test]
fn test_synchronous_resume_continues_same_drain() {
  let strand = numbers();
  let out = strand
    .wait(|access, resume| {
      access.write().push(4);
      resume.resume();
      Ok(())
    })
    .append([5])
    .value();
  assert_eq!(out, vec![1, 2, 3, 4, 5]);
}

#[traced_test]
#[test]
fn test_value_while_suspended_does_not_skip_the_wait() {
  let parked: Arc<Mutex<Option<Resume<i32>>>> = Arc::new(Mutex::new(None));
  let slot = parked.clone();
  let strand = numbers();
  strand
    .wait(move |_access, resume| {
      *slot.lock().unwrap() = Some(resume);
      Ok(())
    })
    .append([4]);

  assert_eq!(strand.value(), vec![1, 2, 3]);
  // A second value() queues its callback behind the wait and drains nothing.
  let seen = Arc::new(Mutex::new(Vec::new()));
  let sink = seen.clone();
  assert_eq!(strand.value_with(move |access| *sink.lock().unwrap() = access.get()), vec![1, 2, 3]);
  assert!(seen.lock().unwrap().is_empty());

  let resume = parked.lock().unwrap().take().unwrap();
  assert_eq!(resume.position(), 1);
  resume.resume();
  assert_eq!(strand.get(), vec![1, 2, 3, 4]);
  assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3, 4]);
}

#[traced_test]
#[test]
fn test_consecutive_waits_each_hold_the_drain() {
  let parked: Arc<Mutex<Vec<Resume<i32>>>> = Arc::new(Mutex::new(Vec::new()));
  let strand = Strand::new(vec![]);
  for marker in 1..=2 {
    let slot = parked.clone();
    strand
      .wait(move |_access, resume| {
        slot.lock().unwrap().push(resume);
        Ok(())
      })
      .append([marker]);
  }

  assert!(strand.value().is_empty());
  let first = parked.lock().unwrap().remove(0);
  first.resume();
  assert_eq!(strand.get(), vec![1]);
  assert_eq!(strand.snapshot().state, DrainState::Suspended { position: 3 });

  let second = parked.lock().unwrap().remove(0);
  second.resume();
  assert_eq!(strand.get(), vec![1, 2]);
}

#[traced_test]
#[test]
fn test_stale_resume_is_ignored() {
  let parked: Arc<Mutex<Option<Resume<i32>>>> = Arc::new(Mutex::new(None));
  let slot = parked.clone();
  let strand = numbers();
  strand
    .wait(move |_access, resume| {
      *slot.lock().unwrap() = Some(resume);
      Err(anyhow::anyhow!("gave up"))
    })
    .append([4]);
  assert_eq!(strand.value(), vec![1, 2, 3, 4]);

  strand.append([5]);
  let stale = parked.lock().unwrap().take().unwrap();
  stale.resume();
  assert!(logs_contain("Stale resume ignored"));
  assert_eq!(strand.get(), vec![1, 2, 3, 4]);
}
