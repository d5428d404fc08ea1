// src/backend/mod.rs
//! Pluggable crypto backend
//!
//! One [`CipherBackend`] contract for every build flavor, selected once at
//! compile time. With the `rustcrypto` feature the active backend is the
//! static-table RustCrypto implementation; with no backend feature every
//! call fails with [`CryptoError::NoCrypto`].

use crate::descriptor::{Algorithm, Direction};
use crate::error::Result;

#[cfg(not(feature = "rustcrypto"))]
use crate::error::CryptoError;

#[cfg(feature = "rsa")]
pub(crate) mod asymmetric;
#[cfg(feature = "rustcrypto")]
mod rustcrypto;

/// Streaming contract every backend context satisfies.
///
/// `update` may emit zero or more bytes per chunk (block ciphers buffer
/// partial blocks internally). `finalize` flushes the buffered remainder —
/// padding for block ciphers — and must be called exactly once, after which
/// the context is done.
pub(crate) trait CipherContext {
    fn update(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<()>;
    fn finalize(&mut self, out: &mut Vec<u8>) -> Result<()>;
}

/// A source of cipher contexts. Each `begin` allocates a context owned
/// exclusively by one transform invocation.
pub(crate) trait CipherBackend: Sync {
    fn name(&self) -> &'static str;
    fn available(&self) -> bool;
    fn begin(
        &self,
        algorithm: Algorithm,
        direction: Direction,
        key: &[u8],
        iv: &[u8],
    ) -> Result<Box<dyn CipherContext>>;
}

/// Stub backend for builds with no crypto compiled in.
#[cfg(not(feature = "rustcrypto"))]
struct Unavailable;

#[cfg(not(feature = "rustcrypto"))]
impl CipherBackend for Unavailable {
    fn name(&self) -> &'static str {
        "none"
    }

    fn available(&self) -> bool {
        false
    }

    fn begin(
        &self,
        _algorithm: Algorithm,
        _direction: Direction,
        _key: &[u8],
        _iv: &[u8],
    ) -> Result<Box<dyn CipherContext>> {
        Err(CryptoError::NoCrypto)
    }
}

/// The backend compiled into this build.
pub(crate) fn active() -> &'static dyn CipherBackend {
    #[cfg(feature = "rustcrypto")]
    {
        static BACKEND: rustcrypto::RustCryptoBackend = rustcrypto::RustCryptoBackend;
        &BACKEND
    }
    #[cfg(not(feature = "rustcrypto"))]
    {
        static BACKEND: Unavailable = Unavailable;
        &BACKEND
    }
}
