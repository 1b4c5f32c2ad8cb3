/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Fixed point image scaling
//!
//! Scaling is separable in its bookkeeping but not in its execution:
//! a [`ScaleGeometry`] is computed for each axis and one of four paths
//! is run depending on which axes shrink
//!
//! | x axis   | y axis   | path                                  |
//! |----------|----------|---------------------------------------|
//! | up/same  | up/same  | 2x2 bilinear                          |
//! | up/same  | down     | vertical box, horizontal bilinear     |
//! | down     | up/same  | horizontal box, vertical bilinear     |
//! | down     | down     | box of boxes                          |
//!
//! All arithmetic is integer, per channel, and specialised for 1, 3 and 4
//! interleaved channels.
use texel_core::log::warn;

pub use crate::resize::geometry::ScaleGeometry;

mod bilinear;
mod box_filter;
pub mod geometry;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ResizeMethod {
    /// Bilinear when enlarging, box filter when shrinking
    Bilinear
}

/// Resize a tightly packed interleaved image to new dimensions
///
/// # Arguments
/// - in_image: Interleaved pixels, `in_width*in_height*channels` bytes
/// - out_image: Where we will store the new resized pixels
/// - method: The resizing method to use
/// - channels: Number of interleaved channels, one of 1, 3 or 4
///
/// # Panics
/// - `in_width*in_height*channels` does not match `in_image.len()`.
/// - `out_width*out_height*channels` does not match `out_image.len()`.
#[allow(clippy::too_many_arguments)]
pub fn resize(
    in_image: &[u8], out_image: &mut [u8], method: ResizeMethod, in_width: usize,
    in_height: usize, out_width: usize, out_height: usize, channels: usize
) {
    assert_eq!(
        in_image.len(),
        in_width * in_height * channels,
        "Input dimensions do not match input length"
    );
    assert_eq!(
        out_image.len(),
        out_width * out_height * channels,
        "Output dimensions do not match output length"
    );

    match method {
        ResizeMethod::Bilinear => bilinear_scale(
            in_image,
            in_width,
            in_height,
            in_width * channels,
            out_image,
            out_width,
            out_height,
            out_width * channels,
            channels
        )
    }
}

/// Scale `src` into `dst`, both row-major interleaved with their own stride
///
/// Strides may be larger than `width*channels`, which allows scaling from
/// and into sub rectangles of larger images.
///
/// Empty source or destination rectangles are a no-op.
///
/// # Arguments
/// - src: Source pixels
/// - src_stride: Bytes between the start of two source rows
/// - dst: Destination pixels
/// - dst_stride: Bytes between the start of two destination rows
/// - channels: Interleaved channels of both images, one of 1, 3 or 4.
///   Any other count is a contract violation, it asserts in debug
///   builds and does nothing in release builds.
///
/// # Panics
/// - `src` or `dst` is too short for its dimensions and stride
#[allow(clippy::too_many_arguments, clippy::cast_possible_truncation)]
pub fn bilinear_scale(
    src: &[u8], src_width: usize, src_height: usize, src_stride: usize, dst: &mut [u8],
    dst_width: usize, dst_height: usize, dst_stride: usize, channels: usize
) {
    if !matches!(channels, 1 | 3 | 4) {
        warn!("Cannot scale an image with {channels} channels");
        debug_assert!(false, "Unsupported channel count {channels}");
        return;
    }
    if src_width == 0 || src_height == 0 || dst_width == 0 || dst_height == 0 {
        return;
    }
    assert!(
        src.len() >= (src_height - 1) * src_stride + src_width * channels,
        "Source buffer too small for its dimensions"
    );
    assert!(
        dst.len() >= (dst_height - 1) * dst_stride + dst_width * channels,
        "Destination buffer too small for its dimensions"
    );

    let x = ScaleGeometry::new(src_width as u32, dst_width as u32);
    let y = ScaleGeometry::new(src_height as u32, dst_height as u32);

    match channels {
        1 => scale_with::<1>(src, src_width, src_height, src_stride, dst, dst_stride, &x, &y),
        3 => scale_with::<3>(src, src_width, src_height, src_stride, dst, dst_stride, &x, &y),
        _ => scale_with::<4>(src, src_width, src_height, src_stride, dst, dst_stride, &x, &y)
    }
}

/// Which path to take, bit 0 is set when x does not shrink, bit 1 when y
/// does not shrink
pub fn xup_yup(x: &ScaleGeometry, y: &ScaleGeometry) -> u8 {
    u8::from(x.is_scaling_up()) | (u8::from(y.is_scaling_up()) << 1)
}

#[allow(clippy::too_many_arguments)]
fn scale_with<const CH: usize>(
    src: &[u8], src_width: usize, src_height: usize, src_stride: usize, dst: &mut [u8],
    dst_stride: usize, x: &ScaleGeometry, y: &ScaleGeometry
) {
    let dst_width = x.dst_size() as usize;
    let dst_height = y.dst_size() as usize;

    match xup_yup(x, y) {
        3 => bilinear::scale_up_up::<CH>(
            src, src_stride, dst, dst_width, dst_height, dst_stride, x, y
        ),
        1 => box_filter::scale_down_y::<CH>(
            src, src_height, src_stride, dst, dst_width, dst_height, dst_stride, x, y
        ),
        2 => box_filter::scale_down_x::<CH>(
            src, src_width, src_stride, dst, dst_width, dst_height, dst_stride, x, y
        ),
        _ => box_filter::scale_down_down::<CH>(
            src, src_width, src_height, src_stride, dst, dst_width, dst_height, dst_stride, x,
            y
        )
    }
}

#[cfg(test)]
mod tests {
    use nanorand::Rng;

    use crate::resize::{bilinear_scale, resize, xup_yup, ResizeMethod, ScaleGeometry};

    fn uniform(width: usize, height: usize, color: &[u8]) -> Vec<u8> {
        color
            .iter()
            .copied()
            .cycle()
            .take(width * height * color.len())
            .collect()
    }

    #[test]
    fn path_selection() {
        let up = ScaleGeometry::new(2, 4);
        let same = ScaleGeometry::new(4, 4);
        let down = ScaleGeometry::new(4, 2);

        assert_eq!(xup_yup(&up, &same), 3);
        assert_eq!(xup_yup(&up, &down), 1);
        assert_eq!(xup_yup(&down, &up), 2);
        assert_eq!(xup_yup(&down, &down), 0);
    }

    #[test]
    fn same_size_is_a_copy() {
        let mut rng = nanorand::WyRand::new_seed(42);

        for channels in [1, 3, 4] {
            let (w, h) = (13, 7);
            let mut src = vec![0_u8; w * h * channels];
            rng.fill(&mut src);

            let mut dst = vec![0_u8; w * h * channels];
            resize(&src, &mut dst, ResizeMethod::Bilinear, w, h, w, h, channels);

            assert_eq!(src, dst);
        }
    }

    #[test]
    fn uniform_color_survives_every_path() {
        let sizes = [(4, 4), (2, 2), (4, 2), (2, 4), (7, 3), (3, 7), (1, 1), (16, 5)];

        for channels in [1, 3, 4] {
            let color = &[10_u8, 20, 30, 40][..channels];

            for (sw, sh) in sizes {
                for (dw, dh) in sizes {
                    let src = uniform(sw, sh, color);
                    let mut dst = vec![0; dw * dh * channels];

                    resize(&src, &mut dst, ResizeMethod::Bilinear, sw, sh, dw, dh, channels);

                    assert_eq!(
                        dst,
                        uniform(dw, dh, color),
                        "{sw}x{sh} -> {dw}x{dh} with {channels} channels"
                    );
                }
            }
        }
    }

    #[test]
    fn rgb_four_to_two_keeps_color() {
        let src = uniform(4, 4, &[10, 20, 30]);
        let mut dst = vec![0; 2 * 2 * 3];

        resize(&src, &mut dst, ResizeMethod::Bilinear, 4, 4, 2, 2, 3);

        for pixel in dst.chunks_exact(3) {
            assert_eq!(pixel, &[10, 20, 30]);
        }
    }

    #[test]
    fn uniform_round_trip_up_then_down() {
        let src = uniform(2, 2, &[200, 100, 50, 255]);
        let mut big = vec![0; 4 * 4 * 4];
        let mut back = vec![0; 2 * 2 * 4];

        resize(&src, &mut big, ResizeMethod::Bilinear, 2, 2, 4, 4, 4);
        resize(&big, &mut back, ResizeMethod::Bilinear, 4, 4, 2, 2, 4);

        assert_eq!(src, back);
    }

    #[test]
    fn downscale_averages_pairs() {
        // two columns of 0 and 255 collapse to their mean
        let src = [0_u8, 255, 0, 255];
        let mut dst = [0_u8; 2];

        resize(&src, &mut dst, ResizeMethod::Bilinear, 4, 1, 2, 1, 1);

        for value in dst {
            assert!((126..=128).contains(&value), "got {value}");
        }
    }

    #[test]
    fn upscale_interpolates_between_pixels() {
        let src = [0_u8, 255];
        let mut dst = [0_u8; 4];

        resize(&src, &mut dst, ResizeMethod::Bilinear, 2, 1, 4, 1, 1);

        // weights are 0, 64, 192, 0
        assert_eq!(dst, [0, 63, 191, 255]);
    }

    #[test]
    fn up_up_blends_two_by_two() {
        #[rustfmt::skip]
        let src = [
            0, 100,
            200, 40,
        ];
        let mut dst = [0_u8; 16];

        resize(&src, &mut dst, ResizeMethod::Bilinear, 2, 2, 4, 4, 1);

        // both axes use weights 0, 64, 192, 0 from source pixels 0, 0, 0, 1
        #[rustfmt::skip]
        let expected = [
            0,   25,  75,  100,
            50,  58,  76,  85,
            150, 126, 78,  55,
            200, 160, 80,  40,
        ];
        assert_eq!(dst, expected);
    }

    #[test]
    fn down_y_up_x_weights_columns() {
        // two columns, four rows to four columns, two rows
        #[rustfmt::skip]
        let src = [
            0,   200,
            40,  120,
            80,  80,
            160, 0,
        ];
        let mut dst = [0_u8; 8];

        resize(&src, &mut dst, ResizeMethod::Bilinear, 2, 4, 4, 2, 1);

        #[rustfmt::skip]
        let expected = [
            19,  54, 125, 160,
            119, 99, 60,  40,
        ];
        assert_eq!(dst, expected);
    }

    #[test]
    fn down_x_up_y_weights_rows() {
        // transpose of the vertical case, the result is transposed too
        #[rustfmt::skip]
        let src = [
            0,   40,  80, 160,
            200, 120, 80, 0,
        ];
        let mut dst = [0_u8; 8];

        resize(&src, &mut dst, ResizeMethod::Bilinear, 4, 2, 2, 4, 1);

        #[rustfmt::skip]
        let expected = [
            19,  119,
            54,  99,
            125, 60,
            160, 40,
        ];
        assert_eq!(dst, expected);
    }

    #[test]
    fn down_down_gradient() {
        #[rustfmt::skip]
        let src = [
            0,   10,  20,  30,
            40,  50,  60,  70,
            80,  90,  100, 110,
            120, 130, 140, 150,
        ];
        let mut dst = [0_u8; 4];

        resize(&src, &mut dst, ResizeMethod::Bilinear, 4, 4, 2, 2, 1);

        // box means are 25, 45, 105, 125, truncation takes one off
        assert_eq!(dst, [24, 44, 104, 124]);
    }

    #[test]
    fn down_down_uneven_runs() {
        // 3 -> 2 gives runs weighted 2/3, 1/3 then 1/3, 2/3
        #[rustfmt::skip]
        let src = [
            0,   30,  60,
            90,  120, 150,
            180, 210, 240,
        ];
        let mut dst = [0_u8; 4];

        resize(&src, &mut dst, ResizeMethod::Bilinear, 3, 3, 2, 2, 1);

        assert_eq!(dst, [39, 79, 159, 200]);
    }

    #[test]
    fn channels_are_resampled_independently() {
        let mut rng = nanorand::WyRand::new_seed(7);
        let (sw, sh) = (6, 5);
        let mut src = vec![0_u8; sw * sh * 4];
        rng.fill(&mut src);

        for (dw, dh) in [(11, 9), (3, 9), (11, 2), (4, 3)] {
            let mut dst = vec![0_u8; dw * dh * 4];
            resize(&src, &mut dst, ResizeMethod::Bilinear, sw, sh, dw, dh, 4);

            for c in 0..4 {
                let plane: Vec<u8> = src.iter().skip(c).step_by(4).copied().collect();
                let mut plane_dst = vec![0_u8; dw * dh];

                resize(&plane, &mut plane_dst, ResizeMethod::Bilinear, sw, sh, dw, dh, 1);

                let channel: Vec<u8> = dst.iter().skip(c).step_by(4).copied().collect();
                assert_eq!(channel, plane_dst, "{sw}x{sh} -> {dw}x{dh} channel {c}");
            }
        }
    }

    #[test]
    fn strided_scale_leaves_padding_alone() {
        let (w, h, stride) = (3, 3, 16);
        let mut src = vec![0xAA_u8; stride * h];

        for row in src.chunks_exact_mut(stride) {
            row[..w * 4].fill(7);
        }
        let mut dst = vec![0xEE_u8; stride * 2];

        bilinear_scale(&src, w, h, stride, &mut dst, 2, 2, stride, 4);

        for row in dst.chunks_exact(stride) {
            assert!(row[..8].iter().all(|x| *x == 7));
            assert!(row[8..].iter().all(|x| *x == 0xEE));
        }
    }

    #[test]
    fn empty_destination_is_a_no_op() {
        let src = [1_u8; 12];
        let mut dst: [u8; 0] = [];

        bilinear_scale(&src, 2, 2, 6, &mut dst, 0, 0, 0, 3);
    }
}
