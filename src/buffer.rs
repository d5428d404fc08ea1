// src/buffer.rs
//! Growable byte sink used by the in-memory convenience wrappers
//!
//! Growth policy: when capacity runs out, the new capacity is the larger
//! of double the current capacity and the required size rounded up to the
//! next [`SINK_ALIGN`] boundary. Never shrinks.

use std::io::{self, Write};

use crate::consts::SINK_ALIGN;

#[derive(Debug, Default)]
pub struct ByteSink {
    buf: Vec<u8>,
}

impl ByteSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }

    pub fn append(&mut self, bytes: &[u8]) {
        let required = self.buf.len() + bytes.len();
        if required > self.buf.capacity() {
            let doubled = self.buf.capacity() * 2;
            let aligned = required.div_ceil(SINK_ALIGN) * SINK_ALIGN;
            let target = doubled.max(aligned);
            self.buf.reserve_exact(target - self.buf.len());
        }
        self.buf.extend_from_slice(bytes);
    }
}

impl Write for ByteSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl AsRef<[u8]> for ByteSink {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}
