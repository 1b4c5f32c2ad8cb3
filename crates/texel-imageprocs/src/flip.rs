/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Flip an image by reflecting rows around the horizontal axis
//!
//! ```text
//!old image     new image
//! ┌─────────┐   ┌──────────┐
//! │a b c d e│   │f g h i j │
//! │f g h i j│   │a b c d e │
//! └─────────┘   └──────────┘
//! ```

/// Swap rows top to bottom, in place
///
/// # Arguments
/// - data: Rows of `row_bytes` bytes each, trailing bytes that do not
///   make a full row are left alone
/// - row_bytes: Length of a row in bytes
/// - scratch: Temporary row storage, at least `row_bytes` long
///
/// # Panics
/// - `scratch` is shorter than `row_bytes`
pub fn vertical_flip(data: &mut [u8], row_bytes: usize, scratch: &mut [u8]) {
    if row_bytes == 0 {
        return;
    }
    assert!(scratch.len() >= row_bytes, "Scratch row too small");

    let scratch = &mut scratch[..row_bytes];
    let rows = data.len() / row_bytes;

    for top in 0..rows / 2 {
        let bottom = rows - 1 - top;

        let (head, tail) = data.split_at_mut(bottom * row_bytes);
        let top_row = &mut head[top * row_bytes..(top + 1) * row_bytes];
        let bottom_row = &mut tail[..row_bytes];

        scratch.copy_from_slice(top_row);
        top_row.copy_from_slice(bottom_row);
        bottom_row.copy_from_slice(scratch);
    }
}
