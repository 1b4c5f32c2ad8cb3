/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Pixel buffer operations
//!
//! Each module adds methods to [`PixelBuffer`](crate::pixel_buffer::PixelBuffer)
//! which validate the buffers involved and hand the pixel memory to the
//! kernels in `texel-imageprocs`.
pub mod alpha;
pub mod composite;
pub mod fill;
pub mod flip;
pub mod mip;
pub mod scale;
