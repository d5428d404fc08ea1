// src/backend/rustcrypto.rs
//! Symmetric backend over the RustCrypto cipher crates
//!
//! Contexts own the partial-block buffering so the engine (and its
//! callers) never manage block boundaries: CBC/ECB encryption drains
//! whole blocks per update and emits the PKCS#7 padding block at
//! finalize; decryption additionally holds the last full block back
//! until finalize so the padding can be stripped. CTR is a stream mode —
//! bytes pass through 1:1 and finalize is a no-op.

use cipher::generic_array::GenericArray;
use cipher::{BlockDecryptMut, BlockEncryptMut, BlockSizeUser, KeyInit, KeyIvInit, StreamCipher};

use crate::descriptor::{Algorithm, Direction};
use crate::error::{CryptoError, Result};

use super::{CipherBackend, CipherContext};

pub(crate) struct RustCryptoBackend;

impl CipherBackend for RustCryptoBackend {
    fn name(&self) -> &'static str {
        "rustcrypto"
    }

    fn available(&self) -> bool {
        true
    }

    fn begin(
        &self,
        algorithm: Algorithm,
        direction: Direction,
        key: &[u8],
        iv: &[u8],
    ) -> Result<Box<dyn CipherContext>> {
        macro_rules! cbc_mode {
            ($core:ty) => {
                match direction {
                    Direction::Encrypt => Box::new(BlockEnc::new(
                        cbc::Encryptor::<$core>::new_from_slices(key, iv).map_err(init_err)?,
                    )) as Box<dyn CipherContext>,
                    Direction::Decrypt => Box::new(BlockDec::new(
                        cbc::Decryptor::<$core>::new_from_slices(key, iv).map_err(init_err)?,
                    )),
                }
            };
        }
        macro_rules! ecb_mode {
            ($core:ty) => {
                match direction {
                    Direction::Encrypt => Box::new(BlockEnc::new(
                        ecb::Encryptor::<$core>::new_from_slice(key).map_err(init_err)?,
                    )) as Box<dyn CipherContext>,
                    Direction::Decrypt => Box::new(BlockDec::new(
                        ecb::Decryptor::<$core>::new_from_slice(key).map_err(init_err)?,
                    )),
                }
            };
        }
        macro_rules! ctr_mode {
            ($core:ty) => {
                // Encryption and decryption are the same keystream XOR.
                Box::new(Stream::new(
                    ctr::Ctr128BE::<$core>::new_from_slices(key, iv).map_err(init_err)?,
                )) as Box<dyn CipherContext>
            };
        }

        Ok(match algorithm {
            Algorithm::Aes128Cbc => cbc_mode!(aes::Aes128),
            Algorithm::Aes192Cbc => cbc_mode!(aes::Aes192),
            Algorithm::Aes256Cbc => cbc_mode!(aes::Aes256),
            Algorithm::Aes128Ecb => ecb_mode!(aes::Aes128),
            Algorithm::Aes192Ecb => ecb_mode!(aes::Aes192),
            Algorithm::Aes256Ecb => ecb_mode!(aes::Aes256),
            Algorithm::Aes128Ctr => ctr_mode!(aes::Aes128),
            Algorithm::Aes192Ctr => ctr_mode!(aes::Aes192),
            Algorithm::Aes256Ctr => ctr_mode!(aes::Aes256),
            Algorithm::DesCbc => cbc_mode!(des::Des),
            Algorithm::TdesEde3Cbc => cbc_mode!(des::TdesEde3),
        })
    }
}

fn init_err(err: cipher::InvalidLength) -> CryptoError {
    CryptoError::InitFailed(err.to_string())
}

/// Block-mode encryption with PKCS#7 padding at finalize.
struct BlockEnc<C: BlockEncryptMut> {
    cipher: C,
    pending: Vec<u8>,
}

impl<C: BlockEncryptMut> BlockEnc<C> {
    fn new(cipher: C) -> Self {
        Self {
            cipher,
            pending: Vec::with_capacity(C::block_size()),
        }
    }
}

impl<C: BlockEncryptMut> CipherContext for BlockEnc<C> {
    fn update(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<()> {
        let bs = C::block_size();
        self.pending.extend_from_slice(input);
        let full = self.pending.len() - self.pending.len() % bs;
        if full == 0 {
            return Ok(());
        }
        let start = out.len();
        out.extend_from_slice(&self.pending[..full]);
        for block in out[start..].chunks_exact_mut(bs) {
            self.cipher.encrypt_block_mut(GenericArray::from_mut_slice(block));
        }
        self.pending.drain(..full);
        Ok(())
    }

    fn finalize(&mut self, out: &mut Vec<u8>) -> Result<()> {
        // pending is always shorter than one block here, so the pad byte
        // is in 1..=block_size and empty input still emits a full block.
        let bs = C::block_size();
        let pad = bs - self.pending.len();
        let mut block = std::mem::take(&mut self.pending);
        block.resize(bs, pad as u8);
        self.cipher.encrypt_block_mut(GenericArray::from_mut_slice(&mut block));
        out.extend_from_slice(&block);
        Ok(())
    }
}

/// Block-mode decryption; strips PKCS#7 padding from the held-back final
/// block at finalize.
struct BlockDec<C: BlockDecryptMut> {
    cipher: C,
    pending: Vec<u8>,
}

impl<C: BlockDecryptMut> BlockDec<C> {
    fn new(cipher: C) -> Self {
        Self {
            cipher,
            pending: Vec::with_capacity(2 * C::block_size()),
        }
    }
}

impl<C: BlockDecryptMut> CipherContext for BlockDec<C> {
    fn update(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<()> {
        let bs = C::block_size();
        self.pending.extend_from_slice(input);
        if self.pending.len() <= bs {
            return Ok(());
        }
        // Keep at least one full block back for padding removal.
        let rem = self.pending.len() % bs;
        let keep = if rem == 0 { bs } else { rem };
        let take = self.pending.len() - keep;
        if take == 0 {
            return Ok(());
        }
        let start = out.len();
        out.extend_from_slice(&self.pending[..take]);
        for block in out[start..].chunks_exact_mut(bs) {
            self.cipher.decrypt_block_mut(GenericArray::from_mut_slice(block));
        }
        self.pending.drain(..take);
        Ok(())
    }

    fn finalize(&mut self, out: &mut Vec<u8>) -> Result<()> {
        let bs = C::block_size();
        if self.pending.len() != bs {
            return Err(CryptoError::Backend(format!(
                "ciphertext is not a whole number of {bs}-byte blocks"
            )));
        }
        let mut block = std::mem::take(&mut self.pending);
        self.cipher.decrypt_block_mut(GenericArray::from_mut_slice(&mut block));
        let pad = block[bs - 1] as usize;
        if pad == 0 || pad > bs || block[bs - pad..].iter().any(|&b| b as usize != pad) {
            return Err(CryptoError::Backend("bad PKCS#7 padding".into()));
        }
        out.extend_from_slice(&block[..bs - pad]);
        Ok(())
    }
}

/// Stream-mode context; no padding, no buffering.
struct Stream<C: StreamCipher> {
    cipher: C,
}

impl<C: StreamCipher> Stream<C> {
    fn new(cipher: C) -> Self {
        Self { cipher }
    }
}

impl<C: StreamCipher> CipherContext for Stream<C> {
    fn update(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<()> {
        let start = out.len();
        out.extend_from_slice(input);
        self.cipher.apply_keystream(&mut out[start..]);
        Ok(())
    }

    fn finalize(&mut self, _out: &mut Vec<u8>) -> Result<()> {
        Ok(())
    }
}
