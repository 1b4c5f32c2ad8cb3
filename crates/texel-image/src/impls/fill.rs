/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Constant colour fills
use texel_core::log::warn;

use crate::errors::ImageErrors;
use crate::pixel_buffer::PixelBuffer;

impl PixelBuffer {
    /// Fill every pixel of a 3 or 4 channel image with `color`
    ///
    /// 3 channel images ignore the alpha in `color`.
    ///
    /// # Errors
    /// - [`ImageErrors::BadBufferState`] for an invalid buffer
    /// - [`ImageErrors::UnsupportedChannels`] for other channel counts
    pub fn fill(&mut self, color: [u8; 4]) -> Result<(), ImageErrors> {
        let channels = self.channels;
        let pixels = self.pixels_mut("filling")?;

        match channels {
            4 => bytemuck::cast_slice_mut::<u8, [u8; 4]>(pixels).fill(color),
            3 => bytemuck::cast_slice_mut::<u8, [u8; 3]>(pixels).fill([color[0], color[1], color[2]]),
            _ => return Err(ImageErrors::UnsupportedChannels(channels, "fill"))
        }
        Ok(())
    }

    /// Set every pixel to the first `channels` of `r, g, b, a`
    ///
    /// 2 channel images store a native endian 16 bit value, `r | g << 8`
    /// on little endian hosts and `g | b << 8` on big endian ones.
    ///
    /// # Errors
    /// - [`ImageErrors::BadBufferState`] for an invalid buffer
    /// - [`ImageErrors::UnsupportedChannels`] for more than 4 channels
    pub fn clear(&mut self, r: u8, g: u8, b: u8, a: u8) -> Result<(), ImageErrors> {
        let channels = self.channels;
        let pixels = self.pixels_mut("clearing")?;

        match channels {
            1 => pixels.fill(r),
            2 => {
                let value = if cfg!(target_endian = "big") {
                    u16::from(g) | (u16::from(b) << 8)
                } else {
                    u16::from(r) | (u16::from(g) << 8)
                };
                bytemuck::cast_slice_mut::<u8, [u8; 2]>(pixels).fill(value.to_ne_bytes());
            }
            3 => bytemuck::cast_slice_mut::<u8, [u8; 3]>(pixels).fill([r, g, b]),
            4 => bytemuck::cast_slice_mut::<u8, [u8; 4]>(pixels).fill([r, g, b, a]),
            _ => {
                warn!("Invalid number of components: {}", channels);
                return Err(ImageErrors::UnsupportedChannels(channels, "clear"));
            }
        }
        Ok(())
    }
}
