//! Tests for the run context.

use super::*;

#[test]
fn test_run_time_is_fixed() {
    let run_time = Timestamp::from_epoch_millis(1_700_000_000_000).unwrap();
    let context = RunContext::at(run_time);

    assert_eq!(context.run_time(), run_time);
    assert_eq!(context.clone().run_time(), run_time);
}

#[test]
fn test_each_run_gets_its_own_id() {
    let first = RunContext::new();
    let second = RunContext::new();

    assert_ne!(first.run_id(), second.run_id());
}
