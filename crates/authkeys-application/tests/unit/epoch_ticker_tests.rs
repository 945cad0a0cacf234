//! Tests for the epoch-aligned ticker
//!
//! Time is paused; tokio auto-advances to the ticker's next wakeup whenever
//! the test is waiting on it.

use crate::test_utils::VirtualClock;
use authkeys_application::domain_services::EpochIntervalTicker;
use authkeys_domain::Bucket;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const INTERVAL: Duration = Duration::from_secs(10);

#[tokio::test(start_paused = true)]
async fn test_ticks_at_each_boundary() {
    let clock = VirtualClock::at_secs(1000);
    let mut ticker = EpochIntervalTicker::start(clock, INTERVAL, CancellationToken::new());

    assert_eq!(ticker.initial_bucket(), Bucket::new(100));
    assert_eq!(ticker.tick().await, Some(Bucket::new(101)));
    assert_eq!(ticker.tick().await, Some(Bucket::new(102)));
    assert_eq!(ticker.tick().await, Some(Bucket::new(103)));
}

#[tokio::test(start_paused = true)]
async fn test_ticks_align_to_unix_time_not_start_time() {
    let clock = VirtualClock::at_secs(1007);
    let mut ticker = EpochIntervalTicker::start(clock, INTERVAL, CancellationToken::new());

    let started = tokio::time::Instant::now();
    assert_eq!(ticker.tick().await, Some(Bucket::new(101)));
    let waited = started.elapsed();
    assert!(waited >= Duration::from_secs(3) && waited < Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn test_clock_jump_emits_only_latest_bucket() {
    let clock = VirtualClock::at_secs(1000);
    let mut ticker =
        EpochIntervalTicker::start(clock.clone(), INTERVAL, CancellationToken::new());

    assert_eq!(ticker.tick().await, Some(Bucket::new(101)));

    clock.jump(Duration::from_secs(75));
    let after_jump = ticker.tick().await.unwrap();
    assert!(after_jump >= Bucket::new(109));

    let next = ticker.tick().await.unwrap();
    assert_eq!(next, after_jump.next());
}

#[tokio::test(start_paused = true)]
async fn test_stale_starting_bucket_emits_immediately() {
    let clock = VirtualClock::at_secs(1000);
    let mut ticker = EpochIntervalTicker::starting_at(
        clock,
        INTERVAL,
        Bucket::new(97),
        CancellationToken::new(),
    );

    let started = tokio::time::Instant::now();
    assert_eq!(ticker.tick().await, Some(Bucket::new(100)));
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_long_interval_still_wakes_periodically() {
    let clock = VirtualClock::at_secs(0);
    let mut ticker = EpochIntervalTicker::start(
        clock.clone(),
        Duration::from_secs(3600),
        CancellationToken::new(),
    );

    // Let the ticker settle into a capped sleep, then skip most of the hour
    tokio::time::sleep(Duration::from_secs(1)).await;
    clock.jump(Duration::from_secs(3590));

    let started = tokio::time::Instant::now();
    assert_eq!(ticker.tick().await, Some(Bucket::new(1)));
    assert!(started.elapsed() <= Duration::from_secs(30));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_closes_ticker() {
    let clock = VirtualClock::at_secs(1000);
    let cancel = CancellationToken::new();
    let mut ticker = EpochIntervalTicker::start(clock, INTERVAL, cancel.clone());

    cancel.cancel();
    assert_eq!(ticker.tick().await, None);
}
