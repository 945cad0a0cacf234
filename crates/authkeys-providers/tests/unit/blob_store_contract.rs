//! Behaviour every blob store backend must share

use authkeys_providers::BlobStore;
use std::sync::Arc;
use std::time::Duration;

const TTL: Duration = Duration::from_secs(60);

/// Blob names unique to one test run on a shared server
pub fn unique_name(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{prefix}:{nanos}")
}

pub async fn read_missing_is_none(store: &dyn BlobStore) {
    assert_eq!(store.read(&unique_name("missing")).await.unwrap(), None);
}

pub async fn first_nx_write_wins(store: &dyn BlobStore) {
    let name = unique_name("nx");
    assert!(store.write_nx(&name, b"first", TTL).await.unwrap());
    assert!(!store.write_nx(&name, b"second", TTL).await.unwrap());
    assert_eq!(store.read(&name).await.unwrap().as_deref(), Some(&b"first"[..]));
}

pub async fn write_overwrites(store: &dyn BlobStore) {
    let name = unique_name("overwrite");
    store.write(&name, b"one", TTL).await.unwrap();
    store.write(&name, b"two", TTL).await.unwrap();
    assert_eq!(store.read(&name).await.unwrap().as_deref(), Some(&b"two"[..]));
}

pub async fn binary_values_survive(store: &dyn BlobStore) {
    let name = unique_name("binary");
    let value: Vec<u8> = (0..=255).collect();
    store.write(&name, &value, TTL).await.unwrap();
    assert_eq!(store.read(&name).await.unwrap(), Some(value));
}

pub async fn entries_expire(store: &dyn BlobStore) {
    let name = unique_name("ttl");
    assert!(store.write_nx(&name, b"short", Duration::from_millis(200)).await.unwrap());
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(store.read(&name).await.unwrap(), None);

    // An expired name can be claimed again
    assert!(store.write_nx(&name, b"again", TTL).await.unwrap());
}

pub async fn racing_nx_writes_have_one_winner(store: Arc<dyn BlobStore>) {
    let name = unique_name("race");
    let handles: Vec<_> = (0..8u8)
        .map(|i| {
            let store = Arc::clone(&store);
            let name = name.clone();
            tokio::spawn(async move { (i, store.write_nx(&name, &[i], TTL).await.unwrap()) })
        })
        .collect();

    let mut winners = Vec::new();
    for handle in handles {
        let (i, won) = handle.await.unwrap();
        if won {
            winners.push(i);
        }
    }
    assert_eq!(winners.len(), 1, "winners: {winners:?}");

    // The stored value is the winner's payload
    assert_eq!(store.read(&name).await.unwrap(), Some(vec![winners[0]]));
}

pub async fn run_all(store: Arc<dyn BlobStore>) {
    read_missing_is_none(store.as_ref()).await;
    first_nx_write_wins(store.as_ref()).await;
    write_overwrites(store.as_ref()).await;
    binary_values_survive(store.as_ref()).await;
    entries_expire(store.as_ref()).await;
    racing_nx_writes_have_one_winner(store).await;
}
