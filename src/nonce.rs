//! CSP nonce generation
//!
//! A nonce permits one inline script/style under a Content-Security-Policy
//! and must never be reused, so every call draws fresh CSPRNG bytes. The
//! random source is a capability so hosts and tests can inject their own.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::RngCore;

use crate::patterns::NONCE_BYTES;

/// Source of cryptographically-secure random bytes.
pub trait RandomSource {
    fn fill_bytes(&mut self, dest: &mut [u8]);
}

/// Default source backed by the thread-local CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand::rng().fill_bytes(dest);
    }
}

/// Generate a fresh base64-encoded CSP nonce from the thread-local CSPRNG.
pub fn generate_csp_nonce() -> String {
    generate_csp_nonce_with(&mut ThreadRandom)
}

/// Generate a nonce from an injected random source.
pub fn generate_csp_nonce_with<S: RandomSource + ?Sized>(source: &mut S) -> String {
    let mut bytes = [0u8; NONCE_BYTES];
    source.fill_bytes(&mut bytes);
    STANDARD.encode(bytes)
}
