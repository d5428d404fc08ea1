// src/engine.rs
//! The transform operation — streaming cipher dispatch
//!
//! One invocation walks Created → DescriptorResolved → BackendInitialized
//! → streaming loop → Finalizing → Completed or Failed. The loop never
//! re-enters streaming once finalization begins, and the backend context
//! is dropped on every exit path. Partial output already handed to the
//! writer before a failure is NOT retracted: any error return means the
//! destination is in an indeterminate state and must be discarded.

use std::io::{Cursor, ErrorKind, Read, Write};

use log::{debug, trace};

use crate::backend;
use crate::buffer::ByteSink;
use crate::consts::MAX_CHUNK;
use crate::descriptor::{CipherRequest, Direction};
use crate::error::{CryptoError, Result};
use crate::registry::{default_registry, CipherRegistry};

impl CipherRegistry {
    /// Full encrypt-or-decrypt transformation of an arbitrary-length byte
    /// stream: chunks are pulled from `reader` (up to [`MAX_CHUNK`] bytes,
    /// block-aligned, at a time), transformed, and pushed to `writer`.
    /// Returns the total number of bytes written.
    ///
    /// A slow writer blocks the loop directly — there is no internal
    /// queueing, no cancellation and no timeout; callers wanting either
    /// implement them inside their reader/writer.
    pub fn transform<R: Read, W: Write>(
        &self,
        request: &CipherRequest<'_>,
        reader: R,
        writer: W,
    ) -> Result<u64> {
        if is_rsa_name(request.cipher) {
            return run_asymmetric(request, reader, writer);
        }
        run_symmetric(self, request, reader, writer)
    }

    /// In-memory convenience over [`Self::transform`]; output buffer starts
    /// at twice the input length and grows per the [`ByteSink`] policy.
    pub fn encrypt(&self, cipher: &str, key: &[u8], iv: Option<&[u8]>, data: &[u8]) -> Result<Vec<u8>> {
        self.oneshot(Direction::Encrypt, cipher, key, iv, data)
    }

    /// In-memory convenience over [`Self::transform`].
    pub fn decrypt(&self, cipher: &str, key: &[u8], iv: Option<&[u8]>, data: &[u8]) -> Result<Vec<u8>> {
        self.oneshot(Direction::Decrypt, cipher, key, iv, data)
    }

    fn oneshot(
        &self,
        direction: Direction,
        cipher: &str,
        key: &[u8],
        iv: Option<&[u8]>,
        data: &[u8],
    ) -> Result<Vec<u8>> {
        let request = CipherRequest::new(direction, cipher, key, iv);
        let mut sink = ByteSink::with_capacity(data.len() * 2);
        self.transform(&request, Cursor::new(data), &mut sink)?;
        Ok(sink.into_vec())
    }
}

/// [`CipherRegistry::transform`] on the default registry.
pub fn transform<R: Read, W: Write>(
    request: &CipherRequest<'_>,
    reader: R,
    writer: W,
) -> Result<u64> {
    default_registry().transform(request, reader, writer)
}

/// [`CipherRegistry::encrypt`] on the default registry.
pub fn encrypt(cipher: &str, key: &[u8], iv: Option<&[u8]>, data: &[u8]) -> Result<Vec<u8>> {
    default_registry().encrypt(cipher, key, iv, data)
}

/// [`CipherRegistry::decrypt`] on the default registry.
pub fn decrypt(cipher: &str, key: &[u8], iv: Option<&[u8]>, data: &[u8]) -> Result<Vec<u8>> {
    default_registry().decrypt(cipher, key, iv, data)
}

/// Names beginning "rsa" (any case) select the asymmetric path; the
/// longer "rsapub" prefix marks the supplied key bytes as a public key.
fn is_rsa_name(name: &str) -> bool {
    name.len() >= 3 && name.as_bytes()[..3].eq_ignore_ascii_case(b"rsa")
}

fn is_rsapub_name(name: &str) -> bool {
    name.len() >= 6 && name.as_bytes()[..6].eq_ignore_ascii_case(b"rsapub")
}

fn run_symmetric<R: Read, W: Write>(
    registry: &CipherRegistry,
    request: &CipherRequest<'_>,
    mut reader: R,
    mut writer: W,
) -> Result<u64> {
    let backend = backend::active();
    if !backend.available() {
        return Err(CryptoError::NoCrypto);
    }

    let descriptor = registry
        .find(request.cipher)
        .ok_or_else(|| CryptoError::UnknownCipher(request.cipher.to_string()))?;

    // IV first: a zero-iv_len descriptor accepts (and ignores) anything.
    let iv = request.iv.unwrap_or(&[]);
    if descriptor.iv_len != 0 && iv.len() != descriptor.iv_len {
        return Err(CryptoError::BadIvLength {
            cipher: descriptor.name.clone(),
            got: iv.len(),
            expected: descriptor.iv_len,
        });
    }
    if request.key.len() < descriptor.key_min || request.key.len() > descriptor.key_max {
        return Err(CryptoError::BadKeyLength {
            cipher: descriptor.name.clone(),
            got: request.key.len(),
            min: descriptor.key_min,
            max: descriptor.key_max,
        });
    }

    let effective_iv: &[u8] = if descriptor.iv_len == 0 { &[] } else { iv };
    let mut context = backend.begin(
        descriptor.algorithm,
        request.direction,
        request.key,
        effective_iv,
    )?;

    debug!(
        "{}: {:?} {} via {} backend",
        request.context,
        request.direction,
        descriptor.name,
        backend.name()
    );

    let chunk_len = chunk_for(descriptor.block_size);
    let mut chunk = vec![0u8; chunk_len];
    let mut scratch: Vec<u8> = Vec::with_capacity(chunk_len + descriptor.block_size);
    let mut consumed: u64 = 0;
    let mut emitted: u64 = 0;

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        consumed += n as u64;
        scratch.clear();
        context.update(&chunk[..n], &mut scratch)?;
        if !scratch.is_empty() {
            writer.write_all(&scratch)?;
            emitted += scratch.len() as u64;
        }
        trace!(
            "{}: {} consumed {consumed} emitted {emitted}",
            request.context,
            descriptor.name
        );
        if log::log_enabled!(log::Level::Trace) && !scratch.is_empty() {
            trace!(
                "{}: out[..{}] = {}",
                request.context,
                scratch.len().min(32),
                hex::encode(&scratch[..scratch.len().min(32)])
            );
        }
    }

    scratch.clear();
    context.finalize(&mut scratch)?;
    if !scratch.is_empty() {
        writer.write_all(&scratch)?;
        emitted += scratch.len() as u64;
    }

    debug!(
        "{}: {} done, {consumed} bytes in, {emitted} bytes out",
        request.context, descriptor.name
    );
    Ok(emitted)
}

/// Largest block-multiple read size within [`MAX_CHUNK`]; a block larger
/// than the cap (no built-in cipher has one) is used as-is.
fn chunk_for(block_size: usize) -> usize {
    if block_size > 1 {
        (MAX_CHUNK / block_size).max(1) * block_size
    } else {
        MAX_CHUNK
    }
}

#[cfg(feature = "rsa")]
fn run_asymmetric<R: Read, W: Write>(
    request: &CipherRequest<'_>,
    mut reader: R,
    mut writer: W,
) -> Result<u64> {
    // Asymmetric mode buffers the whole input: RSA is whole-message.
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;
    debug!(
        "{}: {:?} {} ({} input bytes)",
        request.context,
        request.direction,
        request.cipher,
        input.len()
    );
    let output = backend::asymmetric::transform(
        request.direction,
        is_rsapub_name(request.cipher),
        request.key,
        &input,
    )?;
    writer.write_all(&output)?;
    Ok(output.len() as u64)
}

#[cfg(not(feature = "rsa"))]
fn run_asymmetric<R: Read, W: Write>(
    _request: &CipherRequest<'_>,
    _reader: R,
    _writer: W,
) -> Result<u64> {
    Err(CryptoError::NoCrypto)
}
