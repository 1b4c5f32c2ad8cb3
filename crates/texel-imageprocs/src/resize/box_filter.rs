/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Box filter paths, at least one axis shrinks
//!
//! A shrinking axis gives every destination pixel a run of source pixels.
//! The first one is weighted by the box weight, every following whole pixel
//! by the box span, and whatever is left of the `1 << 14` total goes to the
//! last pixel of the run.
//!
//! Runs are clamped to the last source row/column, a run can only go past
//! it by rounding of the span.
use crate::resize::geometry::{ScaleGeometry, BOX_TOTAL};

/// Call `tap(k, weight)` for every source pixel `k` (relative to the first)
/// of one box filter run.
#[inline(always)]
fn for_each_box_tap(ap: i32, span: i32, mut tap: impl FnMut(usize, i32)) {
    tap(0, ap);

    let mut remaining = BOX_TOTAL - ap;
    let mut k = 1;

    while remaining > span {
        tap(k, span);
        remaining -= span;
        k += 1;
    }
    if remaining > 0 {
        tap(k, remaining);
    }
}

/// Weighted sum of one box filter run
///
/// Pixel `k` of the run lives at `base + min(first + k, last) * step`.
#[inline(always)]
#[allow(clippy::too_many_arguments)]
fn box_sum<const CH: usize>(
    src: &[u8], base: usize, first: usize, last: usize, step: usize, ap: i32, span: i32
) -> [i32; CH] {
    let mut acc = [0_i32; CH];

    for_each_box_tap(ap, span, |k, weight| {
        let pos = base + (first + k).min(last) * step;

        for (a, p) in acc.iter_mut().zip(&src[pos..pos + CH]) {
            *a += i32::from(*p) * weight;
        }
    });
    acc
}

#[inline(always)]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
fn store<const CH: usize>(pixel: &mut [u8], comp: &[i32; CH], shift: u32) {
    for (out, c) in pixel.iter_mut().zip(comp) {
        *out = ((c >> shift) & 0xff) as u8;
    }
}

/// Shrink vertically, interpolate (or keep) horizontally
#[allow(clippy::too_many_arguments)]
pub(crate) fn scale_down_y<const CH: usize>(
    src: &[u8], src_height: usize, src_stride: usize, dst: &mut [u8], dst_width: usize,
    dst_height: usize, dst_stride: usize, x: &ScaleGeometry, y: &ScaleGeometry
) {
    let last_row = src_height - 1;

    for (out_y, out_row) in dst.chunks_mut(dst_stride).take(dst_height).enumerate() {
        let cy = y.box_span(out_y);
        let yap = y.box_weight(out_y);
        let first_row = y.source(out_y);

        for (out_x, pixel) in out_row[..dst_width * CH]
            .chunks_exact_mut(CH)
            .enumerate()
        {
            let column = x.source(out_x) * CH;
            let xap = x.bilinear_weight(out_x);

            let mut comp =
                box_sum::<CH>(src, column, first_row, last_row, src_stride, yap, cy);

            if xap > 0 {
                let next =
                    box_sum::<CH>(src, column + CH, first_row, last_row, src_stride, yap, cy);

                for (c, n) in comp.iter_mut().zip(next) {
                    *c = ((*c * (256 - xap)) + (n * xap)) >> 12;
                }
            } else {
                for c in &mut comp {
                    *c >>= 4;
                }
            }
            store::<CH>(pixel, &comp, 10);
        }
    }
}

/// Shrink horizontally, interpolate (or keep) vertically
#[allow(clippy::too_many_arguments)]
pub(crate) fn scale_down_x<const CH: usize>(
    src: &[u8], src_width: usize, src_stride: usize, dst: &mut [u8], dst_width: usize,
    dst_height: usize, dst_stride: usize, x: &ScaleGeometry, y: &ScaleGeometry
) {
    let last_column = src_width - 1;

    for (out_y, out_row) in dst.chunks_mut(dst_stride).take(dst_height).enumerate() {
        let row = y.source(out_y) * src_stride;
        let yap = y.bilinear_weight(out_y);

        for (out_x, pixel) in out_row[..dst_width * CH]
            .chunks_exact_mut(CH)
            .enumerate()
        {
            let cx = x.box_span(out_x);
            let xap = x.box_weight(out_x);
            let first_column = x.source(out_x);

            let mut comp = box_sum::<CH>(src, row, first_column, last_column, CH, xap, cx);

            if yap > 0 {
                let next = box_sum::<CH>(
                    src,
                    row + src_stride,
                    first_column,
                    last_column,
                    CH,
                    xap,
                    cx
                );

                for (c, n) in comp.iter_mut().zip(next) {
                    *c = ((*c * (256 - yap)) + (n * yap)) >> 12;
                }
            } else {
                for c in &mut comp {
                    *c >>= 4;
                }
            }
            store::<CH>(pixel, &comp, 10);
        }
    }
}

/// Shrink both axes, a box filter of box filters
///
/// Each horizontal run is reduced by 5 bits before the vertical weights are
/// applied so the product stays inside an `i32`, leaving 23 bits of scale
/// in the result.
#[allow(clippy::too_many_arguments)]
pub(crate) fn scale_down_down<const CH: usize>(
    src: &[u8], src_width: usize, src_height: usize, src_stride: usize, dst: &mut [u8],
    dst_width: usize, dst_height: usize, dst_stride: usize, x: &ScaleGeometry,
    y: &ScaleGeometry
) {
    let last_column = src_width - 1;
    let last_row = src_height - 1;

    for (out_y, out_row) in dst.chunks_mut(dst_stride).take(dst_height).enumerate() {
        let cy = y.box_span(out_y);
        let yap = y.box_weight(out_y);
        let first_row = y.source(out_y);

        for (out_x, pixel) in out_row[..dst_width * CH]
            .chunks_exact_mut(CH)
            .enumerate()
        {
            let cx = x.box_span(out_x);
            let xap = x.box_weight(out_x);
            let first_column = x.source(out_x);

            let mut comp = [0_i32; CH];

            for_each_box_tap(yap, cy, |k, weight| {
                let row = (first_row + k).min(last_row) * src_stride;
                let line = box_sum::<CH>(src, row, first_column, last_column, CH, xap, cx);

                for (c, l) in comp.iter_mut().zip(line) {
                    *c += (l >> 5) * weight;
                }
            });
            store::<CH>(pixel, &comp, 23);
        }
    }
}
