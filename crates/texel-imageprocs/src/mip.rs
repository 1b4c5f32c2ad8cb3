/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Mip level generation by 2x2 averaging

#[inline(always)]
#[allow(clippy::cast_possible_truncation)]
fn average_block<const CH: usize>(top: &[u8], bottom: &[u8], out: &mut [u8]) {
    for c in 0..CH {
        let sum = u32::from(top[c])
            + u32::from(top[c + CH])
            + u32::from(bottom[c])
            + u32::from(bottom[c + CH]);

        out[c] = (sum >> 2) as u8;
    }
}

fn generate_mip_inner<const CH: usize>(input: &[u8], output: &mut [u8], width: usize, height: usize) {
    let in_row = width * 2 * CH;
    let out_row = width * CH;

    for (rows, out) in input
        .chunks_exact(in_row * 2)
        .zip(output.chunks_exact_mut(out_row))
        .take(height)
    {
        let (top, bottom) = rows.split_at(in_row);

        for ((t, b), o) in top
            .chunks_exact(CH * 2)
            .zip(bottom.chunks_exact(CH * 2))
            .zip(out.chunks_exact_mut(CH))
        {
            average_block::<CH>(t, b, o);
        }
    }
}

/// Produce the next mip level of an image
///
/// Each output pixel is the truncated mean of a 2x2 input block.
///
/// # Arguments
/// - input: Image of `2*width` by `2*height` pixels
/// - output: Image of `width` by `height` pixels
/// - width: Output width
/// - height: Output height
/// - channels: Interleaved channels, 1 to 4
///
/// # Panics
/// - `channels` is not in `1..=4`
/// - Either buffer is too small for its dimensions
pub fn generate_mip(input: &[u8], output: &mut [u8], width: usize, height: usize, channels: usize) {
    assert!(
        input.len() >= width * height * 4 * channels,
        "Input too small for mip source"
    );
    assert!(
        output.len() >= width * height * channels,
        "Output too small for mip"
    );

    match channels {
        1 => generate_mip_inner::<1>(input, output, width, height),
        2 => generate_mip_inner::<2>(input, output, width, height),
        3 => generate_mip_inner::<3>(input, output, width, height),
        4 => generate_mip_inner::<4>(input, output, width, height),
        _ => panic!("Bad number of channels {channels} for mip generation")
    }
}
