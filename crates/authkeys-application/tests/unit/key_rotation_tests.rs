//! Tests for the key store rotater over the in-memory backend

use crate::test_utils::{FlakyStore, ManualClock, TEST_KEY_BITS};
use authkeys_application::domain_services::RotatingKeyStore;
use authkeys_application::use_cases::{Generation, KeyStoreRotater};
use authkeys_domain::ports::infrastructure::KeyStore;
use authkeys_domain::ports::providers::BlobStore;
use authkeys_domain::{Bucket, Error, Key};
use authkeys_providers::blob_store::MokaBlobStore;
use std::sync::Arc;
use std::time::Duration;

const INTERVAL: Duration = Duration::from_secs(3600);

fn rotater(store: Arc<dyn BlobStore>, clock: Arc<ManualClock>) -> KeyStoreRotater {
    KeyStoreRotater::new(store, clock, INTERVAL, TEST_KEY_BITS).unwrap()
}

fn shared_store() -> Arc<dyn BlobStore> {
    Arc::new(MokaBlobStore::new())
}

#[test]
fn test_new_rejects_invalid_settings() {
    let clock = ManualClock::at_secs(0);
    let zero = KeyStoreRotater::new(shared_store(), clock.clone(), Duration::ZERO, 2048);
    assert!(matches!(zero, Err(Error::InvalidArgument { .. })));

    let weak = KeyStoreRotater::new(shared_store(), clock, INTERVAL, 512);
    assert!(matches!(weak, Err(Error::InvalidArgument { .. })));
}

#[test]
fn test_current_bucket_follows_clock() {
    let clock = ManualClock::at_secs(36_000);
    let rotater = rotater(shared_store(), clock.clone());
    assert_eq!(rotater.current_bucket(), Bucket::new(10));

    clock.set_secs(39_599);
    assert_eq!(rotater.current_bucket(), Bucket::new(10));
    clock.set_secs(39_600);
    assert_eq!(rotater.current_bucket(), Bucket::new(11));
}

#[tokio::test]
async fn test_find_missing_bucket_is_none() {
    let rotater = rotater(shared_store(), ManualClock::at_secs(36_000));
    assert!(rotater.find(Bucket::new(10)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_rejects_corrupt_blob() {
    let store = shared_store();
    store
        .write("rsa:10", b"not a pem", INTERVAL)
        .await
        .unwrap();

    let rotater = rotater(store, ManualClock::at_secs(36_000));
    assert!(rotater.find(Bucket::new(10)).await.is_err());
}

#[tokio::test]
async fn test_generate_stores_key_under_bucket_name() {
    let store = shared_store();
    let rotater = rotater(store.clone(), ManualClock::at_secs(36_000));

    let generation = rotater.generate().await.unwrap();
    assert!(generation.is_won());

    let pem = store.read("rsa:10").await.unwrap().unwrap();
    assert_eq!(Key::from_pem(&pem).unwrap().id(), generation.key().id());
}

#[tokio::test]
async fn test_second_generator_adopts_winner() {
    let store = shared_store();
    let clock = ManualClock::at_secs(36_000);
    let first = rotater(store.clone(), clock.clone());
    let second = rotater(store, clock);

    let won = first.generate_for(Bucket::new(10)).await.unwrap().into_key();
    match second.generate_for(Bucket::new(10)).await.unwrap() {
        Generation::Adopted { winner, discarded } => {
            assert_eq!(winner.id(), won.id());
            assert_ne!(discarded.id(), won.id());
        }
        Generation::Won(_) => panic!("second NX-write must lose"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_generators_converge_on_one_key() {
    let store = shared_store();
    let clock = ManualClock::at_secs(36_000);
    let rotaters: Vec<_> = (0..4)
        .map(|_| Arc::new(rotater(store.clone(), clock.clone())))
        .collect();

    let handles: Vec<_> = rotaters
        .iter()
        .map(|r| {
            let r = Arc::clone(r);
            tokio::spawn(async move { r.generate().await })
        })
        .collect();

    let mut outcomes = Vec::new();
    for handle in handles {
        outcomes.push(handle.await.unwrap().unwrap());
    }

    assert_eq!(outcomes.iter().filter(|g| g.is_won()).count(), 1);
    let id = outcomes[0].key().id().to_string();
    assert!(outcomes.iter().all(|g| g.key().id() == id));
}

#[tokio::test]
async fn test_restore_generates_when_store_is_empty() {
    let store = shared_store();
    let rotater = rotater(store.clone(), ManualClock::at_secs(36_000));
    let keys = RotatingKeyStore::new();

    let bucket = rotater.restore(&keys).await.unwrap();
    assert_eq!(bucket, Bucket::new(10));
    assert_eq!(keys.len(), 1);
    assert!(store.read("rsa:10").await.unwrap().is_some());
}

#[tokio::test]
async fn test_restore_loads_previous_and_current() {
    let store = shared_store();
    let clock = ManualClock::at_secs(36_000);
    let rotater = rotater(store.clone(), clock.clone());

    let k10 = rotater.generate_for(Bucket::new(10)).await.unwrap().into_key();
    let k11 = rotater.generate_for(Bucket::new(11)).await.unwrap().into_key();

    clock.set_secs(39_600 + 5);
    let keys = RotatingKeyStore::new();
    rotater.restore(&keys).await.unwrap();

    let ids: Vec<_> = keys.keys().iter().map(|k| k.id().to_string()).collect();
    assert_eq!(ids, [k10.id(), k11.id()]);
}

#[tokio::test]
async fn test_restore_with_only_previous_generates_current() {
    let store = shared_store();
    let clock = ManualClock::at_secs(36_000);
    let rotater = rotater(store, clock.clone());

    let k10 = rotater.generate().await.unwrap().into_key();

    clock.set_secs(39_600);
    let keys = RotatingKeyStore::new();
    rotater.restore(&keys).await.unwrap();

    let window = keys.keys();
    assert_eq!(window.len(), 2);
    assert_eq!(window[0].id(), k10.id());
    assert_ne!(window[1].id(), k10.id());
}

#[tokio::test]
async fn test_two_processes_restore_the_same_window() {
    let store = shared_store();
    let clock = ManualClock::at_secs(36_000);

    let a_keys = RotatingKeyStore::new();
    let b_keys = RotatingKeyStore::new();
    rotater(store.clone(), clock.clone()).restore(&a_keys).await.unwrap();
    rotater(store, clock).restore(&b_keys).await.unwrap();

    assert_eq!(b_keys.len(), 1);
    assert_eq!(a_keys.key().unwrap().id(), b_keys.key().unwrap().id());
}

#[tokio::test]
async fn test_restore_fails_on_storage_error() {
    let flaky = FlakyStore::new(shared_store());
    flaky.set_failing(true);
    let rotater = rotater(flaky, ManualClock::at_secs(36_000));
    let keys = RotatingKeyStore::new();

    let err = rotater.restore(&keys).await.unwrap_err();
    assert!(matches!(err, Error::Storage { .. }));
    assert!(keys.is_empty());
}

#[tokio::test]
async fn test_rotate_installs_bucket_key() {
    let store = shared_store();
    let rotater = rotater(store, ManualClock::at_secs(36_000));
    let keys = RotatingKeyStore::new();
    rotater.restore(&keys).await.unwrap();
    let k10 = keys.key().unwrap();

    let k11 = rotater.rotate(&keys, Bucket::new(11)).await.unwrap();
    let window = keys.keys();
    assert_eq!(window.len(), 2);
    assert_eq!(window[0].id(), k10.id());
    assert_eq!(window[1].id(), k11.id());
}

#[tokio::test]
async fn test_rotate_to_current_key_is_a_no_op() {
    let store = shared_store();
    let rotater = rotater(store, ManualClock::at_secs(36_000));
    let keys = RotatingKeyStore::new();
    rotater.restore(&keys).await.unwrap();

    rotater.rotate(&keys, Bucket::new(10)).await.unwrap();
    assert_eq!(keys.len(), 1);
}

#[tokio::test]
async fn test_failed_rotate_leaves_window_unchanged() {
    let flaky = FlakyStore::new(shared_store());
    let rotater = rotater(flaky.clone(), ManualClock::at_secs(36_000));
    let keys = RotatingKeyStore::new();
    rotater.restore(&keys).await.unwrap();
    let before = keys.key().unwrap();

    flaky.set_failing(true);
    assert!(rotater.rotate(&keys, Bucket::new(11)).await.is_err());
    assert_eq!(keys.len(), 1);
    assert_eq!(keys.key().unwrap().id(), before.id());
}
