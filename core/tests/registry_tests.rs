// tests/registry_tests.rs
mod common;

use common::*;
use strand::{Access, MixinRegistry, MixinTable, Strand};
use tracing_test::traced_test;

fn arithmetic() -> MixinTable<i32> {
  MixinTable::new()
    .with("scale", |access: &Access<i32>, factor: i32| {
      let scaled: Vec<i32> = access.read().iter().map(|x| x * factor).collect();
      access.set(scaled);
      Ok(())
    })
    .with("push_all", |access: &Access<i32>, values: Vec<i32>| {
      access.write().extend(values);
      Ok(())
    })
}

#[traced_test]
#[test]
fn test_mixin_call_runs_in_queue_order() {
  let strand = numbers();
  let out = strand
    .mixins(arithmetic())
    .append([4])
    .call("scale", 10)
    .call("push_all", vec![0, 1])
    .value();
  assert_eq!(out, vec![10, 20, 30, 40, 0, 1]);
}

#[traced_test]
#[test]
fn test_mixin_visible_to_strand_created_before_registration() {
  let first = numbers();
  let earlier = Strand::builder().registry(first.registry().clone()).build(vec![5, 6]);

  first.mixins(arithmetic());

  assert!(earlier.registry().contains("scale"));
  assert_eq!(earlier.call("scale", 2).value(), vec![10, 12]);
  // The mixin acted on the calling strand, not the registering one.
  assert_eq!(first.get(), vec![1, 2, 3]);
}

#[traced_test]
#[test]
fn test_separate_registries_do_not_leak() {
  let registering = numbers();
  let isolated = numbers();
  registering.mixins(arithmetic());

  assert!(!isolated.registry().contains("scale"));
  assert!(!isolated.registry().same_as(registering.registry()));

  let out = isolated.call("scale", 2).append([4]).value();
  assert_eq!(out, vec![1, 2, 3, 4]);
  assert!(logs_contain("Mixin not registered: scale"));
}

#[traced_test]
#[test]
fn test_mixin_with_wrong_argument_type_is_a_step_failure() {
  let strand = numbers();
  strand.mixins(arithmetic());

  let out = strand.call("scale", "twice").append([4]).value();
  assert_eq!(out, vec![1, 2, 3, 4]);
  assert!(logs_contain("Mixin 'scale' called with mismatched arguments"));
}

#[traced_test]
#[test]
fn test_call_resolves_name_when_step_runs() {
  let registry = MixinRegistry::new();
  let strand = Strand::builder().registry(registry.clone()).build(vec![1]);

  // Queued before the verb exists; installed before the drain starts.
  strand.call("scale", 7);
  registry.install(arithmetic());
  assert_eq!(strand.value(), vec![7]);
  assert_eq!(registry.names(), vec!["push_all".to_string(), "scale".to_string()]);
}

#[traced_test]
#[test]
fn test_clones_share_registry() {
  let strand = numbers();
  let clone = strand.clone();
  clone.mixins(arithmetic());
  assert!(strand.registry().same_as(clone.registry()));
  assert_eq!(strand.registry().len(), 2);
}
