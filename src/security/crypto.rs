//! Symmetric encryption of audit payloads.
//!
//! Derives a 256-bit key from a static secret and encrypts flat key/value
//! records with AES-256-CBC and PKCS#7 padding. The transport blob is
//! `hex(IV || ciphertext)` with no version header; the layout is part of
//! the external consumer contract.
//!
//! The key is a bare SHA-256 of the static secret, with no salt or
//! iteration count. That derivation is frozen by blobs already in the
//! wild and is a known weakness; see DESIGN.md before reusing it
//! elsewhere.

use aes::cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes256;
use rand::RngCore;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Key size (256 bits).
pub const KEY_SIZE: usize = 32;
/// IV and cipher block size (128 bits).
pub const BLOCK_SIZE: usize = 16;

/// Opaque cryptographic failures.
///
/// Deliberately detail-free: cipher and decode failures all collapse into
/// one variant per direction so no partial plaintext or key material can
/// leak through error messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("Encryption failed")]
    EncryptionFailed,

    #[error("Decryption failed")]
    DecryptionFailed,
}

/// A value permitted in an encrypted payload record.
///
/// The payload serializer performs naive stringification only, so the
/// value domain is restricted to types that need no escaping rules.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl PayloadValue {
    fn write_literal(&self, out: &mut String) {
        match self {
            PayloadValue::Str(s) => {
                out.push('"');
                out.push_str(s);
                out.push('"');
            }
            PayloadValue::Int(n) => out.push_str(&n.to_string()),
            PayloadValue::Float(n) => out.push_str(&n.to_string()),
            PayloadValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        }
    }
}

/// Key derivation plus payload encryption/decryption.
pub struct CryptoBox {
    key: [u8; KEY_SIZE],
}

impl CryptoBox {
    /// Derive the key as `SHA-256(secret)` and build the box.
    pub fn new(secret: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(secret.as_bytes());
        let key: [u8; KEY_SIZE] = hasher.finalize().into();
        Self { key }
    }

    /// Encrypt a plaintext into a `hex(IV || ciphertext)` blob.
    ///
    /// A fresh random IV is generated on every call; two encryptions of
    /// the same plaintext never produce the same blob.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        let mut iv = [0u8; BLOCK_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut iv);

        let ciphertext = self.encrypt_cbc(plaintext.as_bytes(), &iv);

        let mut blob = Vec::with_capacity(BLOCK_SIZE + ciphertext.len());
        blob.extend_from_slice(&iv);
        blob.extend_from_slice(&ciphertext);
        Ok(hex::encode(blob))
    }

    /// Decrypt a `hex(IV || ciphertext)` blob back into the plaintext.
    pub fn decrypt(&self, blob: &str) -> Result<String, CryptoError> {
        let decoded = hex::decode(blob).map_err(|_| CryptoError::DecryptionFailed)?;

        // At least one full ciphertext block must follow the IV.
        if decoded.len() < BLOCK_SIZE * 2 || (decoded.len() - BLOCK_SIZE) % BLOCK_SIZE != 0 {
            return Err(CryptoError::DecryptionFailed);
        }

        let (iv, ciphertext) = decoded.split_at(BLOCK_SIZE);
        let padded = self.decrypt_cbc(ciphertext, iv);
        let plaintext = unpad(&padded)?;

        String::from_utf8(plaintext).map_err(|_| CryptoError::DecryptionFailed)
    }

    /// Serialize a flat record into an object-literal string and encrypt it.
    ///
    /// Insertion order is preserved. Stringification is naive: string
    /// values are wrapped in quotes without escaping, numbers and booleans
    /// are written as bare literals.
    pub fn create_encrypted_payload(
        &self,
        record: &[(&str, PayloadValue)],
    ) -> Result<String, CryptoError> {
        self.encrypt(&serialize_record(record))
    }

    /// Decrypt an encrypted response blob from the remote store.
    pub fn decrypt_payload(&self, blob: &str) -> Result<String, CryptoError> {
        self.decrypt(blob)
    }

    /// CBC encryption: each padded block is XORed with the previous
    /// ciphertext block (the IV for the first) before the block cipher.
    fn encrypt_cbc(&self, plaintext: &[u8], iv: &[u8; BLOCK_SIZE]) -> Vec<u8> {
        let cipher = Aes256::new(GenericArray::from_slice(&self.key));
        let mut buffer = pad(plaintext);
        let mut chain = *iv;

        for block in buffer.chunks_mut(BLOCK_SIZE) {
            for (byte, prev) in block.iter_mut().zip(chain.iter()) {
                *byte ^= prev;
            }
            let block = GenericArray::from_mut_slice(block);
            cipher.encrypt_block(block);
            chain.copy_from_slice(block.as_slice());
        }
        buffer
    }

    fn decrypt_cbc(&self, ciphertext: &[u8], iv: &[u8]) -> Vec<u8> {
        let cipher = Aes256::new(GenericArray::from_slice(&self.key));
        let mut buffer = ciphertext.to_vec();
        let mut chain = [0u8; BLOCK_SIZE];
        chain.copy_from_slice(iv);

        for block in buffer.chunks_mut(BLOCK_SIZE) {
            let mut next_chain = [0u8; BLOCK_SIZE];
            next_chain.copy_from_slice(block);

            cipher.decrypt_block(GenericArray::from_mut_slice(block));
            for (byte, prev) in block.iter_mut().zip(chain.iter()) {
                *byte ^= prev;
            }
            chain = next_chain;
        }
        buffer
    }
}

fn serialize_record(record: &[(&str, PayloadValue)]) -> String {
    let mut out = String::from("{");
    for (i, (key, value)) in record.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push('"');
        out.push_str(key);
        out.push_str("\":");
        value.write_literal(&mut out);
    }
    out.push('}');
    out
}

/// PKCS#7 padding; always appends at least one byte.
fn pad(data: &[u8]) -> Vec<u8> {
    let padding_len = BLOCK_SIZE - (data.len() % BLOCK_SIZE);
    let mut padded = data.to_vec();
    padded.extend(std::iter::repeat(padding_len as u8).take(padding_len));
    padded
}

fn unpad(data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let padding_len = *data.last().ok_or(CryptoError::DecryptionFailed)? as usize;
    if padding_len == 0 || padding_len > BLOCK_SIZE || padding_len > data.len() {
        return Err(CryptoError::DecryptionFailed);
    }
    if data[data.len() - padding_len..]
        .iter()
        .any(|&b| b as usize != padding_len)
    {
        return Err(CryptoError::DecryptionFailed);
    }
    Ok(data[..data.len() - padding_len].to_vec())
}
