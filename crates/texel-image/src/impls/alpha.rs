/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use texel_core::log::warn;
use texel_imageprocs::copy::copy_unscaled_4onto3;

use crate::pixel_buffer::PixelBuffer;
use crate::temp_buffer::try_alloc_zeroed;

impl PixelBuffer {
    /// Drop the alpha channel of a 4 channel image if every pixel is opaque
    ///
    /// Returns true if the image was converted to 3 channels, false if it
    /// was left untouched.
    pub fn optimize_away_alpha(&mut self) -> bool {
        if self.channels != 4 {
            return false;
        }
        let Ok(pixels) = self.pixels("alpha optimization") else {
            return false;
        };
        if bytemuck::cast_slice::<u8, [u8; 4]>(pixels)
            .iter()
            .any(|pixel| pixel[3] != 255)
        {
            return false;
        }

        let Ok(mut rgb) = try_alloc_zeroed(self.pixel_count() * 3) else {
            warn!("Out of memory, alpha channel kept");
            return false;
        };
        copy_unscaled_4onto3(pixels, &mut rgb);

        self.set_data_and_size(rgb, self.width, self.height, 3).is_ok()
    }
}
