// src/registry.rs
//! Cipher descriptor registry
//!
//! A registry is built once, before any concurrent transform calls are
//! issued, and is immutable afterwards. [`default_registry`] is the
//! lazily-initialized process-wide instance seeded with the built-in
//! table; callers wanting extra names construct their own via
//! [`CipherRegistry::builder`].

use once_cell::sync::Lazy;

use crate::consts::MAX_REGISTERED_CIPHERS;
use crate::descriptor::CipherDescriptor;
use crate::error::{CryptoError, Result};

#[cfg(feature = "rustcrypto")]
use crate::descriptor::Algorithm;

/// Immutable, case-insensitive name → descriptor table.
#[derive(Debug)]
pub struct CipherRegistry {
    entries: Vec<CipherDescriptor>,
}

impl CipherRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder {
            entries: Vec::new(),
        }
    }

    /// Case-insensitive lookup.
    pub fn find(&self, name: &str) -> Option<&CipherDescriptor> {
        self.entries
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|d| d.name.as_str())
    }
}

/// Builder step executed during process initialization.
#[derive(Debug)]
pub struct RegistryBuilder {
    entries: Vec<CipherDescriptor>,
}

impl RegistryBuilder {
    /// Add one descriptor. Later registrations never shadow earlier ones:
    /// the first case-insensitive match wins on lookup.
    pub fn register(&mut self, descriptor: CipherDescriptor) -> Result<&mut Self> {
        if self.entries.len() >= MAX_REGISTERED_CIPHERS {
            return Err(CryptoError::RegistryFull(MAX_REGISTERED_CIPHERS));
        }
        self.entries.push(descriptor);
        Ok(self)
    }

    pub fn build(self) -> CipherRegistry {
        CipherRegistry {
            entries: self.entries,
        }
    }
}

/// The process-wide registry. Initialized on first use; immutable after.
pub fn default_registry() -> &'static CipherRegistry {
    static REGISTRY: Lazy<CipherRegistry> = Lazy::new(|| {
        let mut builder = CipherRegistry::builder();
        #[cfg(feature = "rustcrypto")]
        for descriptor in builtin_table() {
            builder
                .register(descriptor)
                .expect("built-in table fits the registry");
        }
        builder.build()
    });
    &REGISTRY
}

/// The static table compiled in with the RustCrypto backend. Aliases are
/// separate entries sharing an [`Algorithm`].
#[cfg(feature = "rustcrypto")]
fn builtin_table() -> Vec<CipherDescriptor> {
    use Algorithm::*;
    vec![
        CipherDescriptor::exact("aes128", 16, 16, 16, Aes128Cbc),
        CipherDescriptor::exact("aes-128-cbc", 16, 16, 16, Aes128Cbc),
        CipherDescriptor::exact("aes192", 24, 16, 16, Aes192Cbc),
        CipherDescriptor::exact("aes-192-cbc", 24, 16, 16, Aes192Cbc),
        CipherDescriptor::exact("aes256", 32, 16, 16, Aes256Cbc),
        CipherDescriptor::exact("aes-256-cbc", 32, 16, 16, Aes256Cbc),
        CipherDescriptor::exact("aes-128-ecb", 16, 0, 16, Aes128Ecb),
        CipherDescriptor::exact("aes-192-ecb", 24, 0, 16, Aes192Ecb),
        CipherDescriptor::exact("aes-256-ecb", 32, 0, 16, Aes256Ecb),
        CipherDescriptor::exact("aes-128-ctr", 16, 16, 1, Aes128Ctr),
        CipherDescriptor::exact("aes-192-ctr", 24, 16, 1, Aes192Ctr),
        CipherDescriptor::exact("aes-256-ctr", 32, 16, 1, Aes256Ctr),
        CipherDescriptor::exact("des-cbc", 8, 8, 8, DesCbc),
        CipherDescriptor::exact("des-ede3-cbc", 24, 8, 8, TdesEde3Cbc),
        CipherDescriptor::exact("3des", 24, 8, 8, TdesEde3Cbc),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Algorithm;

    #[test]
    fn registry_caps_at_fixed_size() {
        let mut builder = CipherRegistry::builder();
        for i in 0..MAX_REGISTERED_CIPHERS {
            builder
                .register(CipherDescriptor::exact(
                    format!("cipher-{i}"),
                    16,
                    16,
                    16,
                    Algorithm::Aes128Cbc,
                ))
                .unwrap();
        }
        let overflow = builder.register(CipherDescriptor::exact(
            "one-too-many",
            16,
            16,
            16,
            Algorithm::Aes128Cbc,
        ));
        assert!(matches!(overflow, Err(CryptoError::RegistryFull(_))));
    }

    #[test]
    fn lookup_ignores_ascii_case() {
        let mut builder = CipherRegistry::builder();
        builder
            .register(CipherDescriptor::exact(
                "MyCipher",
                16,
                16,
                16,
                Algorithm::Aes128Cbc,
            ))
            .unwrap();
        let registry = builder.build();
        assert!(registry.find("mycipher").is_some());
        assert!(registry.find("MYCIPHER").is_some());
        assert!(registry.find("mycipher2").is_none());
    }
}
