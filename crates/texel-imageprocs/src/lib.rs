/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Pixel routines for `texel-image`
//!
//! Everything here works on plain interleaved `u8` slices with 1 to 4
//! channels and knows nothing about owning buffers, `texel-image` builds
//! its `PixelBuffer` operations on top of these.
//!
//! # Example
//! - Halve a 4x4 RGB image
//! ```
//! use texel_imageprocs::resize::{resize, ResizeMethod};
//! let input = vec![128_u8; 4 * 4 * 3];
//! let mut output = vec![0_u8; 2 * 2 * 3];
//! resize(&input, &mut output, ResizeMethod::Bilinear, 4, 4, 2, 2, 3);
//! assert!(output.iter().all(|x| *x == 128));
//! ```
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
    clippy::too_many_arguments,
    clippy::many_single_char_names
)]

pub mod composite;
pub mod copy;
pub mod flip;
pub mod mip;
pub mod power_of_two;
pub mod resize;
