/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Channel count conversions between equally sized images

/// Copy RGB pixels into RGBA pixels, alpha becomes opaque
pub fn copy_unscaled_3onto4(src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(3).zip(dst.chunks_exact_mut(4)) {
        d[..3].copy_from_slice(s);
        d[3] = 255;
    }
}

/// Copy RGBA pixels into RGB pixels, dropping alpha
pub fn copy_unscaled_4onto3(src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(3)) {
        d.copy_from_slice(&s[..3]);
    }
}

/// Expand a single channel mask into RGBA pixels of one colour
///
/// Every output pixel gets `fill` as its colour and the mask value as
/// its alpha.
pub fn copy_alpha_mask(mask: &[u8], dst: &mut [u8], fill: [u8; 3]) {
    for (m, d) in mask.iter().zip(dst.chunks_exact_mut(4)) {
        d.copy_from_slice(&[fill[0], fill[1], fill[2], *m]);
    }
}
