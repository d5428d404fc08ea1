// src/error.rs
//! Public error type for the entire crate
//!
//! Backend failures are translated into one of these variants at the
//! module boundary — callers never see raw backend error codes.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CryptoError>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CryptoError {
    /// The cipher name is not in the registry (lookup is case-insensitive).
    #[error("unknown cipher {0:?}")]
    UnknownCipher(String),

    /// Key length outside the descriptor's `[min, max]` bounds.
    #[error("{cipher}: key is {got} bytes, expected {min}..={max}")]
    BadKeyLength {
        cipher: String,
        got: usize,
        min: usize,
        max: usize,
    },

    /// IV length does not equal the descriptor's required IV length.
    #[error("{cipher}: IV is {got} bytes, cipher requires {expected}")]
    BadIvLength {
        cipher: String,
        got: usize,
        expected: usize,
    },

    /// Backend context setup failed (bad key material, parse failure, ...).
    #[error("cipher initialization failed: {0}")]
    InitFailed(String),

    /// Backend update/finalize failed mid-stream.
    #[error("crypto backend failure: {0}")]
    Backend(String),

    /// No crypto backend compiled in — every operation fails with this.
    #[error("no crypto backend compiled in")]
    NoCrypto,

    /// Registration past the fixed registry capacity.
    #[error("cipher registry is full ({0} entries max)")]
    RegistryFull(usize),

    /// Reader or writer failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
