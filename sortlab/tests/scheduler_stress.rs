//! Stress tests hammering the scheduler's state transitions.

use sortlab::scheduler::{RunState, Speed};
use sortlab::{Algorithm, Scheduler};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[test]
fn rapid_start_cancel_cycles() {
    let mut scheduler = Scheduler::new();

    for round in 0..50 {
        let data = Arc::new(Mutex::new((1..=20).rev().collect::<Vec<i32>>()));
        let handle = scheduler.start(Arc::clone(&data), Algorithm::Bubble, Speed::new(100));

        if round % 2 == 0 {
            // Cancel immediately, before the worker gets far.
            handle.cancel();
        } else {
            std::thread::sleep(Duration::from_millis(1));
        }
        scheduler.cancel_active();

        let state = handle.state();
        assert!(
            state == RunState::Cancelled || state == RunState::Completed,
            "round {round}: unexpected state {state}"
        );
    }
}

#[test]
fn concurrent_speed_changes_do_not_stall_the_run() {
    let mut scheduler = Scheduler::new();
    let data = Arc::new(Mutex::new((1..=15).rev().collect::<Vec<i32>>()));
    let handle = scheduler.start(Arc::clone(&data), Algorithm::Selection, Speed::MIN);

    // Flip the speed on every delivered event while draining; set_speed
    // only touches an atomic and the condvar, so it is safe to call
    // concurrently with delivery.
    let mut flips = 0_u32;
    while handle.events().recv().is_ok() {
        flips += 1;
        let speed = if flips % 2 == 0 { Speed::MAX } else { Speed::new(180) };
        handle.set_speed(speed);
    }

    assert_eq!(handle.state(), RunState::Completed);
    assert_eq!(handle.snapshot(), (1..=15).collect::<Vec<i32>>());
}

#[test]
fn pause_storm_then_resume_completes() {
    let mut scheduler = Scheduler::new();
    let data = Arc::new(Mutex::new((1..=12).rev().collect::<Vec<i32>>()));
    let handle = scheduler.start(Arc::clone(&data), Algorithm::Insertion, Speed::new(195));

    for _ in 0..200 {
        handle.pause();
        handle.resume();
    }
    handle.resume();

    while handle.events().recv().is_ok() {}
    assert_eq!(handle.state(), RunState::Completed);
    assert_eq!(handle.snapshot(), (1..=12).collect::<Vec<i32>>());
}

#[test]
fn start_replaces_a_run_blocked_on_a_full_channel() {
    let mut scheduler = Scheduler::new();
    let data = Arc::new(Mutex::new((1..=200).rev().collect::<Vec<i32>>()));
    let first = scheduler.start(Arc::clone(&data), Algorithm::Bubble, Speed::MAX);

    // Never drain: the pending operations overflow the bounded channel
    // and leave the worker blocked on delivery.
    std::thread::sleep(Duration::from_millis(300));

    // Replacing the run joins that blocked worker while the first handle
    // (and with it the full channel) is still alive. This must return.
    let second_data = Arc::new(Mutex::new(vec![2, 1]));
    let second = scheduler.start(Arc::clone(&second_data), Algorithm::Bubble, Speed::MAX);

    assert_eq!(first.state(), RunState::Cancelled);

    while second.events().recv().is_ok() {}
    assert_eq!(second.state(), RunState::Completed);
    assert_eq!(second.snapshot(), vec![1, 2]);
}

#[test]
fn cancel_releases_a_worker_blocked_on_a_full_channel() {
    let mut scheduler = Scheduler::new();
    let data = Arc::new(Mutex::new((1..=200).rev().collect::<Vec<i32>>()));
    let handle = scheduler.start(Arc::clone(&data), Algorithm::Bubble, Speed::MAX);

    std::thread::sleep(Duration::from_millis(300));
    handle.cancel();

    // Joins the blocked worker; hangs here if delivery ignores cancels.
    scheduler.cancel_active();
    assert_eq!(handle.state(), RunState::Cancelled);
}

#[test]
fn dropping_the_handle_releases_a_blocked_worker() {
    let mut scheduler = Scheduler::new();
    let data = Arc::new(Mutex::new((1..=60).rev().collect::<Vec<i32>>()));
    let handle = scheduler.start(Arc::clone(&data), Algorithm::Bubble, Speed::MAX);

    // Never drain; at MAX speed the worker fills the bounded channel and
    // blocks on send. Dropping the receiver must unblock it.
    std::thread::sleep(Duration::from_millis(50));
    drop(handle);

    // Joins the worker; hangs here if the hang-up is not treated as a
    // cancellation.
    scheduler.cancel_active();
}

#[test]
fn cancel_while_paused_wakes_the_worker() {
    let mut scheduler = Scheduler::new();
    let data = Arc::new(Mutex::new((1..=30).rev().collect::<Vec<i32>>()));
    let handle = scheduler.start(Arc::clone(&data), Algorithm::Bubble, Speed::new(150));

    std::thread::sleep(Duration::from_millis(20));
    handle.pause();
    std::thread::sleep(Duration::from_millis(20));
    handle.cancel();

    scheduler.cancel_active();
    assert_eq!(handle.state(), RunState::Cancelled);
}
