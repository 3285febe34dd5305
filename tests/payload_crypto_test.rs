//! Tests for encrypted audit payloads: blob layout, IV freshness, and the
//! opaque failure mode.

use inv_guard::{CryptoBox, CryptoError, PayloadValue};

const SECRET: &str = "InventoryClient2024SecureKey419!";

#[test]
fn round_trip_preserves_plaintext() {
    let cb = CryptoBox::new(SECRET);

    for plaintext in ["", "x", "registration audit entry", "ñandú 🛠"] {
        let blob = cb.encrypt(plaintext).unwrap();
        assert_eq!(cb.decrypt(&blob).unwrap(), plaintext);
    }
}

#[test]
fn same_plaintext_two_different_blobs() {
    let cb = CryptoBox::new(SECRET);

    let first = cb.encrypt("duplicate payload").unwrap();
    let second = cb.encrypt("duplicate payload").unwrap();

    assert_ne!(first, second);
    assert_eq!(cb.decrypt(&first).unwrap(), "duplicate payload");
    assert_eq!(cb.decrypt(&second).unwrap(), "duplicate payload");
}

#[test]
fn blob_is_hex_of_iv_then_ciphertext() {
    let cb = CryptoBox::new(SECRET);

    let blob = cb.encrypt("layout check").unwrap();
    let bytes = hex::decode(&blob).unwrap();

    // 16-byte IV followed by whole ciphertext blocks.
    assert!(bytes.len() > 16);
    assert_eq!((bytes.len() - 16) % 16, 0);
}

#[test]
fn registration_payload_round_trip() {
    let cb = CryptoBox::new(SECRET);

    let record = [
        ("username", PayloadValue::Str("warehouse7".to_string())),
        ("email", PayloadValue::Str("w7@example.com".to_string())),
        ("attempt", PayloadValue::Int(1)),
        ("accepted", PayloadValue::Bool(true)),
    ];

    let blob = cb.create_encrypted_payload(&record).unwrap();
    let plaintext = cb.decrypt_payload(&blob).unwrap();
    assert_eq!(
        plaintext,
        r#"{"username":"warehouse7","email":"w7@example.com","attempt":1,"accepted":true}"#
    );
}

#[test]
fn failures_are_opaque() {
    let cb = CryptoBox::new(SECRET);

    let err = cb.decrypt("zz-not-hex").unwrap_err();
    assert_eq!(err, CryptoError::DecryptionFailed);
    // The message names the operation and nothing else.
    assert_eq!(err.to_string(), "Decryption failed");
}

#[test]
fn truncated_blob_rejected() {
    let cb = CryptoBox::new(SECRET);

    let blob = cb.encrypt("will be truncated").unwrap();
    let truncated = &blob[..blob.len() - 2];
    assert!(cb.decrypt(truncated).is_err());
}
