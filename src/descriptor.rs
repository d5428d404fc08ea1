// src/descriptor.rs
//! Cipher metadata and per-call request types
//!
//! A [`CipherDescriptor`] is static metadata about a named cipher: key
//! length bounds, IV length, block size. Descriptors are immutable after
//! registration (see [`crate::registry`]).

use serde::{Deserialize, Serialize};

/// Whether a transform encrypts or decrypts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// Built-in symmetric constructions a backend knows how to instantiate.
///
/// Several registry names may share one algorithm (aliases).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Algorithm {
    Aes128Cbc,
    Aes192Cbc,
    Aes256Cbc,
    Aes128Ecb,
    Aes192Ecb,
    Aes256Ecb,
    Aes128Ctr,
    Aes192Ctr,
    Aes256Ctr,
    DesCbc,
    TdesEde3Cbc,
}

/// Static metadata for one registered cipher name.
#[derive(Debug, Clone)]
pub struct CipherDescriptor {
    /// Registry name, matched case-insensitively.
    pub name: String,
    /// Minimum accepted key length in bytes.
    pub key_min: usize,
    /// Maximum accepted key length in bytes.
    pub key_max: usize,
    /// Required IV length in bytes; 0 means no IV is required and any
    /// caller-supplied IV is ignored.
    pub iv_len: usize,
    /// Cipher block size in bytes; 1 for stream modes (no padding).
    pub block_size: usize,
    /// The construction the backend instantiates for this name.
    pub algorithm: Algorithm,
}

impl CipherDescriptor {
    pub fn new(
        name: impl Into<String>,
        key_min: usize,
        key_max: usize,
        iv_len: usize,
        block_size: usize,
        algorithm: Algorithm,
    ) -> Self {
        Self {
            name: name.into(),
            key_min,
            key_max,
            iv_len,
            block_size,
            algorithm,
        }
    }

    /// Fixed-key-length convenience (every built-in cipher is exact-length).
    pub fn exact(
        name: impl Into<String>,
        key_len: usize,
        iv_len: usize,
        block_size: usize,
        algorithm: Algorithm,
    ) -> Self {
        Self::new(name, key_len, key_len, iv_len, block_size, algorithm)
    }
}

/// One encrypt-or-decrypt request; transient, constructed per call.
#[derive(Debug, Clone, Copy)]
pub struct CipherRequest<'a> {
    pub direction: Direction,
    /// Cipher name; `rsa*` prefixes select the asymmetric path.
    pub cipher: &'a str,
    pub key: &'a [u8],
    pub iv: Option<&'a [u8]>,
    /// Caller label used to attribute log lines; never affects control flow.
    pub context: &'a str,
}

impl<'a> CipherRequest<'a> {
    pub fn new(direction: Direction, cipher: &'a str, key: &'a [u8], iv: Option<&'a [u8]>) -> Self {
        Self {
            direction,
            cipher,
            key,
            iv,
            context: "cryptic",
        }
    }

    pub fn with_context(mut self, context: &'a str) -> Self {
        self.context = context;
        self
    }
}
