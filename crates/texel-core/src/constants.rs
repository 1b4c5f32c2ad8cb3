/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Hard limits for raw images
//!
//! These are the defaults used by [`BufferOptions`](crate::options::BufferOptions),
//! anything stricter or looser should go through the options instead of
//! editing the constants.

/// Log2 of the smallest power of two dimension an image is scaled to
pub const MIN_IMAGE_MIP: u32 = 2;
/// Log2 of the largest dimension an image may have
pub const MAX_IMAGE_MIP: u32 = 11;

/// Smallest power of two dimension, `4`
pub const MIN_IMAGE_SIZE: u32 = 1 << MIN_IMAGE_MIP;
/// Largest width or height, `2048`
pub const MAX_IMAGE_SIZE: u32 = 1 << MAX_IMAGE_MIP;

pub const MIN_IMAGE_AREA: usize = (MIN_IMAGE_SIZE * MIN_IMAGE_SIZE) as usize;
pub const MAX_IMAGE_AREA: usize = (MAX_IMAGE_SIZE as usize) * (MAX_IMAGE_SIZE as usize);

/// Maximum number of interleaved components a raw image may carry
pub const MAX_IMAGE_COMPONENTS: u8 = 8;

/// Maximum size in bytes of a decoded raw image
pub const MAX_IMAGE_DATA_SIZE: usize = MAX_IMAGE_AREA * MAX_IMAGE_COMPONENTS as usize;

/// Upper bound for a single buffer allocation.
///
/// Larger than [`MAX_IMAGE_DATA_SIZE`] because encoded data with headers
/// is allocated through the same path before it is decoded.
pub const MAX_ALLOC_SIZE: usize = 4096 * 4096 * 16;

/// Capacity of the shared scratch buffer of a temp buffer pool, 5 MiB
pub const TEMP_BUFFER_SIZE: usize = 5 * 1024 * 1024;
