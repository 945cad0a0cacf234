//! Token signing and verification tests

use authkeys_application::domain_services::RotatingKeyStore;
use authkeys_domain::ports::infrastructure::KeyStore;
use authkeys_domain::{Error, Key};
use authkeys_infrastructure::crypto::{TokenSigner, TokenVerifier};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: u64,
}

fn claims(sub: &str) -> Claims {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs();
    Claims {
        sub: sub.to_string(),
        exp: now + 600,
    }
}

fn test_keys() -> &'static [Arc<Key>; 3] {
    static KEYS: OnceLock<[Arc<Key>; 3]> = OnceLock::new();
    KEYS.get_or_init(|| std::array::from_fn(|_| Arc::new(Key::generate(1024).unwrap())))
}

fn window(keys: &[Arc<Key>]) -> Arc<RotatingKeyStore> {
    let store = Arc::new(RotatingKeyStore::new());
    for key in keys {
        store.rotate(Arc::clone(key));
    }
    store
}

fn kid_of(token: &str) -> String {
    jsonwebtoken::decode_header(token).unwrap().kid.unwrap()
}

#[test]
fn test_sign_uses_current_key_id() {
    let [k1, k2, _] = test_keys();
    let store = window(&[Arc::clone(k1), Arc::clone(k2)]);

    let token = TokenSigner::new(store).sign(&claims("alice")).unwrap();
    assert_eq!(kid_of(&token), k2.id());
}

#[test]
fn test_verify_round_trip() {
    let [k1, _, _] = test_keys();
    let store = window(&[Arc::clone(k1)]);

    let token = TokenSigner::new(store.clone()).sign(&claims("alice")).unwrap();
    let decoded: Claims = TokenVerifier::new(store).verify(&token).unwrap();
    assert_eq!(decoded.sub, "alice");
}

#[test]
fn test_token_from_previous_key_verifies_for_one_rotation() {
    let [k1, k2, k3] = test_keys();
    let store = window(&[Arc::clone(k1)]);
    let signer = TokenSigner::new(store.clone());
    let verifier = TokenVerifier::new(store.clone());

    let token = signer.sign(&claims("alice")).unwrap();

    store.rotate(Arc::clone(k2));
    assert!(verifier.verify::<Claims>(&token).is_ok());

    store.rotate(Arc::clone(k3));
    let err = verifier.verify::<Claims>(&token).unwrap_err();
    assert!(matches!(err, Error::Token { .. }));
    assert!(err.to_string().contains("Unknown key id"));
}

#[test]
fn test_sign_without_key_fails() {
    let store = Arc::new(RotatingKeyStore::new());
    assert!(store.key().is_none());

    let err = TokenSigner::new(store).sign(&claims("alice")).unwrap_err();
    assert!(matches!(err, Error::Token { .. }));
}

#[test]
fn test_token_without_kid_rejected() {
    let [k1, _, _] = test_keys();
    let store = window(&[Arc::clone(k1)]);

    let header = jsonwebtoken::Header::new(jsonwebtoken::Algorithm::RS256);
    let encoding_key = jsonwebtoken::EncodingKey::from_rsa_der(&k1.to_der().unwrap());
    let token = jsonwebtoken::encode(&header, &claims("alice"), &encoding_key).unwrap();

    let err = TokenVerifier::new(store).verify::<Claims>(&token).unwrap_err();
    assert!(err.to_string().contains("no key id"));
}

#[test]
fn test_malformed_token_rejected() {
    let [k1, _, _] = test_keys();
    let verifier = TokenVerifier::new(window(&[Arc::clone(k1)]));
    assert!(verifier.verify::<Claims>("not.a.token").is_err());
}
