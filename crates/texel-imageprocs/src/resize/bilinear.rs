/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Bilinear path, both axes keep or increase their size
use crate::resize::geometry::ScaleGeometry;

/// Interpolate `dst` from `src` when neither axis shrinks.
///
/// Every destination pixel blends the 2x2 neighbourhood starting at its
/// source pixel. A zero weight on one axis degrades to a 1-D blend along
/// the other, zero weights on both axes copy the source pixel.
#[allow(clippy::too_many_arguments, clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub(crate) fn scale_up_up<const CH: usize>(
    src: &[u8], src_stride: usize, dst: &mut [u8], dst_width: usize, dst_height: usize,
    dst_stride: usize, x: &ScaleGeometry, y: &ScaleGeometry
) {
    for (out_y, out_row) in dst.chunks_mut(dst_stride).take(dst_height).enumerate() {
        let row = y.source(out_y) * src_stride;
        let yap = y.bilinear_weight(out_y);

        for (out_x, pixel) in out_row[..dst_width * CH]
            .chunks_exact_mut(CH)
            .enumerate()
        {
            let xap = x.bilinear_weight(out_x);
            let pos = row + x.source(out_x) * CH;

            match (xap > 0, yap > 0) {
                (true, true) => {
                    let below = pos + src_stride;

                    for (c, out) in pixel.iter_mut().enumerate() {
                        let top = i32::from(src[pos + c]) * (256 - xap)
                            + i32::from(src[pos + CH + c]) * xap;
                        let bottom = i32::from(src[below + CH + c]) * xap
                            + i32::from(src[below + c]) * (256 - xap);

                        let comp = ((bottom * yap) + (top * (256 - yap))) >> 16;
                        *out = (comp & 0xff) as u8;
                    }
                }
                (false, true) => {
                    let below = pos + src_stride;

                    for (c, out) in pixel.iter_mut().enumerate() {
                        let comp = (i32::from(src[pos + c]) * (256 - yap)
                            + i32::from(src[below + c]) * yap)
                            >> 8;
                        *out = (comp & 0xff) as u8;
                    }
                }
                (true, false) => {
                    for (c, out) in pixel.iter_mut().enumerate() {
                        let comp = (i32::from(src[pos + c]) * (256 - xap)
                            + i32::from(src[pos + CH + c]) * xap)
                            >> 8;
                        *out = (comp & 0xff) as u8;
                    }
                }
                (false, false) => {
                    pixel.copy_from_slice(&src[pos..pos + CH]);
                }
            }
        }
    }
}
