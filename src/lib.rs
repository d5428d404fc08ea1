// src/lib.rs
//! cryptic — streaming cipher dispatch over named ciphers
//!
//! Features:
//! - Named symmetric ciphers (AES/DES in CBC, ECB, CTR modes), matched
//!   case-insensitively against a fixed-capacity descriptor registry
//! - Streaming transforms over any `Read`/`Write` pair, one bounded
//!   block-aligned chunk in flight at a time
//! - `rsa*` names dispatch to whole-message RSA (encrypt/decrypt and
//!   sign/verify-recover, key kind chosen by the `rsapub` prefix)
//! - Build-time backend selection: RustCrypto by default, or a stub
//!   where every operation fails with `NoCrypto`
//!
//! ```no_run
//! use cryptic::{decrypt, encrypt};
//!
//! let key = [0u8; 16];
//! let iv = [0u8; 16];
//! let ct = encrypt("aes128", &key, Some(&iv), b"hello world")?;
//! assert_eq!(decrypt("aes128", &key, Some(&iv), &ct)?, b"hello world");
//! # Ok::<(), cryptic::CryptoError>(())
//! ```

pub mod buffer;
pub mod consts;
pub mod descriptor;
pub mod engine;
pub mod error;
pub mod registry;

mod backend;

// Re-export everything users need at the crate root
pub use buffer::ByteSink;
pub use descriptor::{Algorithm, CipherDescriptor, CipherRequest, Direction};
pub use engine::{decrypt, encrypt, transform};
pub use error::{CryptoError, Result};
pub use registry::{default_registry, CipherRegistry, RegistryBuilder};
