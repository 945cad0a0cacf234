//! Unit tests for bucket arithmetic

use authkeys_domain::value_objects::key_blob_ttl;
use authkeys_domain::Bucket;
use std::time::Duration;

#[test]
fn test_bucket_boundaries_for_short_interval() {
    let interval = Duration::from_secs(10);
    assert_eq!(Bucket::at(Duration::from_millis(9_999), interval), Bucket::new(0));
    assert_eq!(Bucket::at(Duration::from_millis(10_000), interval), Bucket::new(1));
    assert_eq!(
        Bucket::until_next_boundary(Duration::from_millis(9_999), interval),
        Duration::from_millis(1)
    );
}

#[test]
fn test_sub_second_interval() {
    let interval = Duration::from_millis(250);
    assert_eq!(Bucket::at(Duration::from_millis(1_000), interval), Bucket::new(4));
}

#[test]
fn test_zero_interval_does_not_divide_by_zero() {
    let bucket = Bucket::at(Duration::from_millis(5), Duration::ZERO);
    assert_eq!(bucket, Bucket::new(5));
}

#[test]
fn test_bucket_ordering_and_serde() {
    assert!(Bucket::new(3) < Bucket::new(4));
    assert_eq!(serde_json::to_string(&Bucket::new(9)).unwrap(), "9");
    assert_eq!(Bucket::new(9).to_string(), "9");
}

#[test]
fn test_ttl_spans_two_intervals() {
    let interval = Duration::from_secs(60);
    assert!(key_blob_ttl(interval) > interval * 2);
}
