/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Reusable scratch memory for in-place operations
//!
//! Flipping, cropping and scaled compositing need a temporary buffer.
//! A [`TempBufferPool`] keeps one fixed capacity buffer around and hands
//! it out for requests that fit, larger requests get a fresh heap buffer
//! which is freed on release.
//!
//! The pool is used through `&mut`, a [`TempBuffer`] borrows it until
//! released so the shared buffer can never be handed out twice.
//!
//! ```
//! use texel_image::temp_buffer::TempBufferPool;
//!
//! let mut pool = TempBufferPool::with_capacity(4096);
//! let buf = pool.get(1024).unwrap();
//! assert_eq!(buf.len(), 1024);
//! buf.release();
//! assert_eq!(pool.stats().static_use_count, 1);
//! ```
use std::ops::{Deref, DerefMut};

use texel_core::constants::TEMP_BUFFER_SIZE;
use texel_core::log::{info, warn};
use texel_core::options::BufferOptions;

use crate::errors::ImageErrors;

/// Counters describing how a pool has been used
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct PoolStats {
    /// Requests served from the shared buffer
    pub static_use_count:    u64,
    /// Requests too large for the shared buffer
    pub dynamic_alloc_count: u64,
    /// Largest request seen, in bytes
    pub max_request_size:    usize,
    /// Capacity of the shared buffer
    pub capacity:            usize
}

/// A scratch buffer handed out by [`TempBufferPool::get`]
pub enum TempBuffer<'a> {
    /// Part of the pool's shared buffer
    Shared(&'a mut [u8]),
    /// A heap buffer for a request larger than the pool capacity
    Owned(Vec<u8>)
}

impl TempBuffer<'_> {
    /// Return true if this buffer lives in the pool's shared memory
    pub const fn is_shared(&self) -> bool {
        matches!(self, TempBuffer::Shared(_))
    }

    /// Give the buffer back to its pool
    ///
    /// Heap buffers are freed, the shared buffer is kept for reuse.
    pub fn release(self) {}
}

impl Deref for TempBuffer<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            TempBuffer::Shared(buf) => buf,
            TempBuffer::Owned(buf) => buf
        }
    }
}

impl DerefMut for TempBuffer<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        match self {
            TempBuffer::Shared(buf) => buf,
            TempBuffer::Owned(buf) => buf
        }
    }
}

/// Zeroed heap buffer of exactly `size` bytes, failing instead of aborting
pub(crate) fn try_alloc_zeroed(size: usize) -> Result<Vec<u8>, ImageErrors> {
    let mut buffer = Vec::new();

    buffer
        .try_reserve_exact(size)
        .map_err(|_| ImageErrors::AllocationFailure(size))?;
    buffer.resize(size, 0);

    Ok(buffer)
}

/// A scratch buffer provider
///
/// The shared buffer is allocated on first use.
pub struct TempBufferPool {
    shared:   Vec<u8>,
    capacity: usize,
    stats:    PoolStats
}

impl TempBufferPool {
    /// Create a pool with the default shared capacity of 5 MiB
    pub fn new() -> TempBufferPool {
        TempBufferPool::with_capacity(TEMP_BUFFER_SIZE)
    }

    /// Create a pool whose shared buffer holds `capacity` bytes
    pub fn with_capacity(capacity: usize) -> TempBufferPool {
        TempBufferPool {
            shared: Vec::new(),
            capacity,
            stats: PoolStats {
                capacity,
                ..PoolStats::default()
            }
        }
    }

    /// Create a pool sized by `options`
    pub fn with_options(options: &BufferOptions) -> TempBufferPool {
        TempBufferPool::with_capacity(options.get_temp_buffer_size())
    }

    /// Create a pool without shared memory, every request is a
    /// fresh heap buffer
    pub fn dynamic() -> TempBufferPool {
        TempBufferPool::with_capacity(0)
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Obtain a zero initialized scratch buffer of exactly `size` bytes
    ///
    /// # Errors
    /// [`ImageErrors::AllocationFailure`] if memory cannot be obtained
    pub fn get(&mut self, size: usize) -> Result<TempBuffer<'_>, ImageErrors> {
        self.stats.max_request_size = self.stats.max_request_size.max(size);

        if size <= self.capacity {
            if self.shared.len() < self.capacity {
                self.shared = try_alloc_zeroed(self.capacity).inspect_err(|_| {
                    warn!("Could not allocate {} bytes of shared scratch memory", self.capacity);
                })?;
            }
            self.stats.static_use_count += 1;

            let buffer = &mut self.shared[..size];
            buffer.fill(0);

            return Ok(TempBuffer::Shared(buffer));
        }

        self.stats.dynamic_alloc_count += 1;

        try_alloc_zeroed(size).map(TempBuffer::Owned)
    }

    pub const fn stats(&self) -> PoolStats {
        self.stats
    }

    /// Log usage counters at info level
    pub fn dump_stats(&self) {
        info!(
            "Static temp buffer usages count: {} - Dynamic temp buffer allocations count: {} - Maximum requested size for temporary buffer: {} bytes - Size of static temp buffer: {} bytes.",
            self.stats.static_use_count,
            self.stats.dynamic_alloc_count,
            self.stats.max_request_size,
            self.capacity
        );
    }
}

impl Default for TempBufferPool {
    fn default() -> Self {
        TempBufferPool::new()
    }
}
