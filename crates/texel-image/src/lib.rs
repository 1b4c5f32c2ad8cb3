/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Owned raster images for texture pipelines
//!
//! A [`PixelBuffer`](pixel_buffer::PixelBuffer) holds an 8 bit interleaved
//! image with 1 to 4 channels and knows how to resize, composite, flip and
//! mip itself. Operations needing scratch memory take a
//! [`TempBufferPool`](temp_buffer::TempBufferPool).
//!
//! # Example
//! - Halve an image
//! ```
//! use texel_image::pixel_buffer::PixelBuffer;
//! use texel_image::temp_buffer::TempBufferPool;
//!
//! let mut pool = TempBufferPool::new();
//! let mut image = PixelBuffer::with_dimensions(64, 64, 3).unwrap();
//! image.fill([255, 128, 0, 255]).unwrap();
//! image.scale(32, 32, true, &mut pool).unwrap();
//! assert_eq!(image.dimensions(), (32, 32));
//! ```
//!
//! # Features
//! - `log`: Forward warnings and statistics to the `log` crate, enabled by default
//! - `serde-support`: Serialize buffer options
#![warn(
    clippy::correctness,
    clippy::perf,
    clippy::pedantic,
    clippy::inline_always,
    clippy::missing_errors_doc,
    clippy::panic
)]
#![allow(
    clippy::needless_return,
    clippy::similar_names,
    clippy::inline_always,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::too_many_arguments
)]

pub use texel_core;

pub mod errors;
pub mod impls;
pub mod pixel_buffer;
pub mod temp_buffer;
