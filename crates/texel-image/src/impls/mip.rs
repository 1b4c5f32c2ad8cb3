/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::borrow::Cow;

use texel_imageprocs::mip::generate_mip;

use crate::errors::ImageErrors;
use crate::pixel_buffer::PixelBuffer;

impl PixelBuffer {
    /// Create the next mip level, half the width and height of this image
    ///
    /// An odd trailing row or column is ignored.
    ///
    /// # Errors
    /// - [`ImageErrors::BadBufferState`] for an invalid buffer
    /// - [`ImageErrors::UnsupportedChannels`] for channel counts outside 1 to 4
    /// - [`ImageErrors::ZeroDimension`] if the image is 1 pixel wide or tall
    pub fn generate_mip(&self) -> Result<PixelBuffer, ImageErrors> {
        let pixels = self.pixels("mip generation")?;

        if !(1..=4).contains(&self.channels) {
            return Err(ImageErrors::UnsupportedChannels(self.channels, "mip generation"));
        }
        let (mip_width, mip_height) = (self.width / 2, self.height / 2);

        if mip_width == 0 || mip_height == 0 {
            return Err(ImageErrors::ZeroDimension("mip generation"));
        }

        let source = if self.width % 2 == 0 && self.height % 2 == 0 {
            Cow::Borrowed(pixels)
        } else {
            Cow::Owned(self.sub_image(0, 0, mip_width * 2, mip_height * 2)?)
        };

        let mut mip = PixelBuffer::new_with_options(self.options);
        let out = mip.allocate_with_dimensions(mip_width, mip_height, self.channels, None)?;

        generate_mip(
            &source,
            out,
            mip_width as usize,
            mip_height as usize,
            usize::from(self.channels)
        );
        Ok(mip)
    }
}
