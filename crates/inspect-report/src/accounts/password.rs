//! Salted password digests in the `sha256$<salt>$<hex>` layout.

use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const SCHEME: &str = "sha256";

static SALT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

pub(crate) fn hash_password(raw: &str) -> String {
    let salt = generate_salt();
    let digest = digest_hex(&salt, raw);
    format!("{SCHEME}${salt}${digest}")
}

pub(crate) fn verify_password(raw: &str, stored: &str) -> bool {
    let mut parts = stored.splitn(3, '$');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(salt), Some(expected)) if scheme == SCHEME => {
            digest_hex(salt, raw) == expected
        }
        _ => false,
    }
}

fn digest_hex(salt: &str, raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(raw.as_bytes());
    hex_encode(&hasher.finalize())
}

fn generate_salt() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    let sequence = SALT_SEQUENCE.fetch_add(1, Ordering::Relaxed);

    let mut hasher = Sha256::new();
    hasher.update(nanos.to_le_bytes());
    hasher.update(sequence.to_le_bytes());
    let digest = hex_encode(&hasher.finalize());
    digest[..16].to_string()
}

pub(crate) fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}
