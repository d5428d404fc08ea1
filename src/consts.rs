// src/consts.rs
//! Shared constants — streaming and registry bounds

/// Upper bound on bytes pulled from the reader per loop iteration.
// Rounded down to a block multiple at runtime, so no chunk handed to a
// backend ever exceeds this.
pub const MAX_CHUNK: usize = 1024;

/// Fixed capacity of a cipher registry.
pub const MAX_REGISTERED_CIPHERS: usize = 64;

/// [`ByteSink`](crate::ByteSink) growth is rounded up to this boundary.
pub const SINK_ALIGN: usize = 1024;
