/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Alpha compositing of RGBA pixels onto RGB pixels
//!
//! The destination has no alpha, it is treated as opaque. A source alpha
//! of 255 replaces the destination, 0 leaves it untouched and everything
//! in between blends with [`fast_fractional_mult`].
//!
//! Scaled compositing needs a 1-D resampler that is cheap to fuse with the
//! blend, [`copy_line_scaled`] and [`composite_row_scaled_4onto3`] are
//! area averaging resamplers working on one line at a time.

/// Compute `round(255 * (a/255) * (b/255))` with integers only
///
/// Jim Blinn's trick, exact for every pair of `u8`.
#[inline(always)]
#[allow(clippy::cast_possible_truncation)]
pub const fn fast_fractional_mult(a: u8, b: u8) -> u8 {
    let i = a as u32 * b as u32 + 128;
    ((i + (i >> 8)) >> 8) as u8
}

#[inline(always)]
fn blend_pixel(src: [u8; 3], alpha: u8, dst: &mut [u8]) {
    match alpha {
        0 => (),
        255 => dst.copy_from_slice(&src),
        _ => {
            let transparency = 255 - alpha;

            for (d, s) in dst.iter_mut().zip(src) {
                *d = fast_fractional_mult(*d, transparency)
                    .wrapping_add(fast_fractional_mult(s, alpha));
            }
        }
    }
}

/// Composite RGBA `src` over RGB `dst`, both holding the same number of pixels
///
/// # Panics
/// - `src` and `dst` do not hold the same number of pixels
pub fn composite_unscaled_4onto3(src: &[u8], dst: &mut [u8]) {
    assert_eq!(
        src.len() / 4,
        dst.len() / 3,
        "Source and destination pixel counts differ"
    );

    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(3)) {
        blend_pixel([s[0], s[1], s[2]], s[3], d);
    }
}

/// Source span covered by output pixel `x` when `ratio` input pixels
/// map to one output pixel
///
/// Recomputed per pixel instead of accumulated to avoid drift.
#[derive(Copy, Clone, Debug)]
struct Footprint {
    first:      usize,
    last:       usize,
    /// Coverage of the first input pixel
    left_frac:  f32,
    /// Coverage of the last input pixel
    right_frac: f32
}

impl Footprint {
    #[inline(always)]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn new(x: usize, ratio: f32) -> Footprint {
        let sample0 = x as f32 * ratio;
        let sample1 = (x + 1) as f32 * ratio;
        let first = sample0.floor();
        let last = sample1.floor();

        Footprint {
            first:      first as usize,
            last:       last as usize,
            left_frac:  1.0 - sample0 + first,
            right_frac: sample1 - last
        }
    }

    /// Average `channels` samples over this footprint
    ///
    /// `offset(i)` returns where input pixel `i` starts.
    #[inline(always)]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn average<const N: usize>(
        &self, input: &[u8], in_len: usize, channels: usize, norm: f32,
        offset: impl Fn(usize) -> usize
    ) -> [u8; N] {
        let mut acc = [0.0_f32; N];

        let left = offset(self.first);
        for (a, p) in acc.iter_mut().zip(&input[left..left + channels]) {
            *a = f32::from(*p) * self.left_frac;
        }
        for u in self.first + 1..self.last {
            let mid = offset(u);

            for (a, p) in acc.iter_mut().zip(&input[mid..mid + channels]) {
                *a += f32::from(*p);
            }
        }
        // the last footprint ends exactly on the end of the line
        if self.right_frac > 0.0 && self.last < in_len {
            let right = offset(self.last);

            for (a, p) in acc.iter_mut().zip(&input[right..right + channels]) {
                *a += f32::from(*p) * self.right_frac;
            }
        }

        let mut out = [0_u8; N];
        for (o, a) in out.iter_mut().zip(acc) {
            // float to int casts saturate
            *o = (a * norm + 0.5).floor() as u8;
        }
        out
    }
}

/// Resample one line of pixels by area averaging
///
/// Pixels are `channels` (1 to 4) bytes wide, input pixel `i` starts at
/// `i * in_step * channels` and output pixel `i` at `i * out_step * channels`,
/// a step larger than one walks a column of an image.
///
/// # Panics
/// - `channels` is not in `1..=4`
/// - a pixel index falls outside `input` or `output`
#[allow(clippy::cast_precision_loss)]
pub fn copy_line_scaled(
    input: &[u8], output: &mut [u8], in_len: usize, out_len: usize, in_step: usize,
    out_step: usize, channels: usize
) {
    assert!((1..=4).contains(&channels), "Unsupported channel count {channels}");

    if in_len == 0 || out_len == 0 {
        return;
    }

    let ratio = in_len as f32 / out_len as f32;
    let norm = 1.0 / ratio;
    let in_offset = |i: usize| i * in_step * channels;

    for x in 0..out_len {
        let footprint = Footprint::new(x, ratio);
        let out = x * out_step * channels;

        if footprint.first == footprint.last {
            // footprint is inside one input pixel
            let start = in_offset(footprint.first);
            output[out..out + channels].copy_from_slice(&input[start..start + channels]);
        } else {
            let pixel = footprint.average::<4>(input, in_len, channels, norm, in_offset);
            output[out..out + channels].copy_from_slice(&pixel[..channels]);
        }
    }
}

/// Resample one RGBA line to `out_len` pixels and composite it over an RGB line
///
/// Resampling and blending are done in one pass, the resampled line is
/// never stored.
///
/// # Panics
/// - `input` has less than `in_len` RGBA pixels or `output` less than
///   `out_len` RGB pixels
#[allow(clippy::cast_precision_loss)]
pub fn composite_row_scaled_4onto3(input: &[u8], output: &mut [u8], in_len: usize, out_len: usize) {
    assert!(input.len() >= in_len * 4, "Input row too short");
    assert!(output.len() >= out_len * 3, "Output row too short");

    if in_len == 0 || out_len == 0 {
        return;
    }

    let ratio = in_len as f32 / out_len as f32;
    let norm = 1.0 / ratio;

    for (x, out) in output.chunks_exact_mut(3).take(out_len).enumerate() {
        let footprint = Footprint::new(x, ratio);

        let [r, g, b, a] = if footprint.first == footprint.last {
            let start = footprint.first * 4;
            [
                input[start],
                input[start + 1],
                input[start + 2],
                input[start + 3]
            ]
        } else {
            footprint.average::<4>(input, in_len, 4, norm, |i| i * 4)
        };

        blend_pixel([r, g, b], a, out);
    }
}
