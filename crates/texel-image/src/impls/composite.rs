/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Copying and compositing one buffer onto another
//!
//! Source and destination may differ in size, the source is resampled to
//! the destination's dimensions. Methods are called on the destination.
use texel_core::log::warn;
use texel_imageprocs::composite::{
    composite_row_scaled_4onto3, composite_unscaled_4onto3, copy_line_scaled
};
use texel_imageprocs::copy::{copy_alpha_mask, copy_unscaled_3onto4, copy_unscaled_4onto3};
use texel_imageprocs::resize::bilinear_scale;

use crate::errors::ImageErrors;
use crate::pixel_buffer::PixelBuffer;
use crate::temp_buffer::TempBufferPool;

impl PixelBuffer {
    fn check_same_dimensions(&self, src: &PixelBuffer) -> Result<(), ImageErrors> {
        if self.width != src.width {
            return Err(ImageErrors::DimensionsMisMatch(self.width as usize, src.width as usize));
        }
        if self.height != src.height {
            return Err(ImageErrors::DimensionsMisMatch(self.height as usize, src.height as usize));
        }
        Ok(())
    }

    fn check_channels(&self, expected: u8, operation: &'static str) -> Result<(), ImageErrors> {
        if self.channels != expected {
            return Err(ImageErrors::UnsupportedChannels(self.channels, operation));
        }
        Ok(())
    }

    /// Composite `src` over this 3 channel image
    ///
    /// A 3 channel source is opaque and simply copied, a 4 channel source
    /// is alpha blended. `pool` provides scratch memory when sizes differ.
    ///
    /// # Errors
    /// - [`ImageErrors::BadBufferState`] if either buffer is invalid
    /// - [`ImageErrors::UnsupportedChannels`] if this image is not 3
    ///   channels or `src` is not 3 or 4
    pub fn composite(&mut self, src: &PixelBuffer, pool: &mut TempBufferPool) -> Result<(), ImageErrors> {
        src.ensure_valid("compositing")?;
        self.ensure_valid("compositing")?;
        self.check_channels(3, "composite")?;

        let same_size = self.dimensions() == src.dimensions();

        match (src.channels, same_size) {
            (3, true) => self.copy_unscaled(src),
            (3, false) => self.copy_scaled(src),
            (4, true) => self.composite_unscaled_4onto3(src),
            (4, false) => self.composite_scaled_4onto3(src, pool),
            (channels, _) => Err(ImageErrors::UnsupportedChannels(channels, "composite"))
        }
    }

    /// Blend an equally sized 4 channel `src` over this 3 channel image
    ///
    /// # Errors
    /// - [`ImageErrors::BadBufferState`] if either buffer is invalid
    /// - [`ImageErrors::UnsupportedChannels`] for the wrong channel counts
    /// - [`ImageErrors::DimensionsMisMatch`] if sizes differ
    pub fn composite_unscaled_4onto3(&mut self, src: &PixelBuffer) -> Result<(), ImageErrors> {
        src.check_channels(4, "composite_unscaled_4onto3")?;
        self.check_channels(3, "composite_unscaled_4onto3")?;
        self.check_same_dimensions(src)?;

        composite_unscaled_4onto3(src.pixels("compositing")?, self.pixels_mut("compositing")?);
        Ok(())
    }

    /// Resample a 4 channel `src` to this image's size while blending it
    /// over this 3 channel image
    ///
    /// Columns are resampled vertically into a scratch buffer from `pool`,
    /// each row is then resampled horizontally and blended in one pass.
    ///
    /// # Errors
    /// - [`ImageErrors::BadBufferState`] if either buffer is invalid
    /// - [`ImageErrors::UnsupportedChannels`] for the wrong channel counts
    /// - [`ImageErrors::AllocationFailure`] if scratch memory cannot be obtained
    pub fn composite_scaled_4onto3(
        &mut self, src: &PixelBuffer, pool: &mut TempBufferPool
    ) -> Result<(), ImageErrors> {
        src.check_channels(4, "composite_scaled_4onto3")?;
        self.check_channels(3, "composite_scaled_4onto3")?;

        let (src_w, src_h) = (src.width as usize, src.height as usize);
        let (dst_w, dst_h) = (self.width as usize, self.height as usize);

        let src_data = src.pixels("compositing")?;
        let dst_data = self.pixels_mut("compositing")?;

        let mut temp = pool.get(src_w * dst_h * 4).inspect_err(|_| {
            warn!("Out of memory. Scaling aborted");
        })?;

        // vertical: scale, no blending
        for col in 0..src_w {
            copy_line_scaled(
                &src_data[col * 4..],
                &mut temp[col * 4..],
                src_h,
                dst_h,
                src_w,
                src_w,
                4
            );
        }
        // horizontal: scale and blend
        if src_w > 0 && dst_w > 0 {
            for (temp_row, dst_row) in temp
                .chunks_exact(src_w * 4)
                .zip(dst_data.chunks_exact_mut(dst_w * 3))
            {
                composite_row_scaled_4onto3(temp_row, dst_row, src_w, dst_w);
            }
        }
        temp.release();

        Ok(())
    }

    /// Copy `src` into this image, resampling and converting between 3
    /// and 4 channels as needed
    ///
    /// # Errors
    /// - [`ImageErrors::BadBufferState`] if either buffer is invalid
    /// - [`ImageErrors::UnsupportedChannels`] if a channel count is not 3 or 4
    pub fn copy(&mut self, src: &PixelBuffer) -> Result<(), ImageErrors> {
        src.ensure_valid("copy")?;
        self.ensure_valid("copy")?;

        for channels in [src.channels, self.channels] {
            if !matches!(channels, 3 | 4) {
                return Err(ImageErrors::UnsupportedChannels(channels, "copy"));
            }
        }

        let same_size = self.dimensions() == src.dimensions();

        match (src.channels == self.channels, src.channels, same_size) {
            (true, _, true) => self.copy_unscaled(src),
            (true, _, false) => self.copy_scaled(src),
            (false, 3, true) => self.copy_unscaled_3onto4(src),
            (false, 3, false) => self.copy_scaled_3onto4(src),
            (false, _, true) => self.copy_unscaled_4onto3(src),
            (false, _, false) => self.copy_scaled_4onto3(src)
        }
    }

    /// Copy an equally sized `src` with the same channel count
    ///
    /// # Errors
    /// - [`ImageErrors::BadBufferState`] if either buffer is invalid
    /// - [`ImageErrors::UnsupportedChannels`] if channel counts differ
    /// - [`ImageErrors::DimensionsMisMatch`] if sizes differ
    pub fn copy_unscaled(&mut self, src: &PixelBuffer) -> Result<(), ImageErrors> {
        self.check_channels(src.channels, "copy_unscaled")?;
        self.check_same_dimensions(src)?;

        self.pixels_mut("copy")?.copy_from_slice(src.pixels("copy")?);
        Ok(())
    }

    /// Resample `src` with the same channel count into this image
    ///
    /// # Errors
    /// - [`ImageErrors::BadBufferState`] if either buffer is invalid
    /// - [`ImageErrors::UnsupportedChannels`] if channel counts differ or
    ///   are not 1, 3 or 4
    pub fn copy_scaled(&mut self, src: &PixelBuffer) -> Result<(), ImageErrors> {
        self.check_channels(src.channels, "copy_scaled")?;

        if !matches!(src.channels, 1 | 3 | 4) {
            return Err(ImageErrors::UnsupportedChannels(src.channels, "copy_scaled"));
        }
        if self.dimensions() == src.dimensions() {
            return self.copy_unscaled(src);
        }

        let channels = usize::from(self.channels);
        let (src_w, src_h) = (src.width as usize, src.height as usize);
        let (dst_w, dst_h) = (self.width as usize, self.height as usize);

        bilinear_scale(
            src.pixels("copy")?,
            src_w,
            src_h,
            src_w * channels,
            self.pixels_mut("copy")?,
            dst_w,
            dst_h,
            dst_w * channels,
            channels
        );
        Ok(())
    }

    /// Copy an equally sized 3 channel `src` into this 4 channel image,
    /// alpha becomes opaque
    ///
    /// # Errors
    /// - [`ImageErrors::BadBufferState`] if either buffer is invalid
    /// - [`ImageErrors::UnsupportedChannels`] for the wrong channel counts
    /// - [`ImageErrors::DimensionsMisMatch`] if sizes differ
    pub fn copy_unscaled_3onto4(&mut self, src: &PixelBuffer) -> Result<(), ImageErrors> {
        src.check_channels(3, "copy_unscaled_3onto4")?;
        self.check_channels(4, "copy_unscaled_3onto4")?;
        self.check_same_dimensions(src)?;

        copy_unscaled_3onto4(src.pixels("copy")?, self.pixels_mut("copy")?);
        Ok(())
    }

    /// Copy an equally sized 4 channel `src` into this 3 channel image,
    /// alpha is dropped
    ///
    /// # Errors
    /// - [`ImageErrors::BadBufferState`] if either buffer is invalid
    /// - [`ImageErrors::UnsupportedChannels`] for the wrong channel counts
    /// - [`ImageErrors::DimensionsMisMatch`] if sizes differ
    pub fn copy_unscaled_4onto3(&mut self, src: &PixelBuffer) -> Result<(), ImageErrors> {
        src.check_channels(4, "copy_unscaled_4onto3")?;
        self.check_channels(3, "copy_unscaled_4onto3")?;
        self.check_same_dimensions(src)?;

        copy_unscaled_4onto3(src.pixels("copy")?, self.pixels_mut("copy")?);
        Ok(())
    }

    /// Resample a 3 channel `src` into this 4 channel image
    ///
    /// # Errors
    /// See [`copy_unscaled_3onto4`](Self::copy_unscaled_3onto4)
    pub fn copy_scaled_3onto4(&mut self, src: &PixelBuffer) -> Result<(), ImageErrors> {
        self.check_channels(4, "copy_scaled_3onto4")?;

        let mut temp = PixelBuffer::new_with_options(src.options);
        temp.allocate_with_dimensions(src.width, src.height, 4, None)?;
        temp.copy_unscaled_3onto4(src)?;

        self.copy_scaled(&temp)
    }

    /// Resample a 4 channel `src` into this 3 channel image
    ///
    /// # Errors
    /// See [`copy_unscaled_4onto3`](Self::copy_unscaled_4onto3)
    pub fn copy_scaled_4onto3(&mut self, src: &PixelBuffer) -> Result<(), ImageErrors> {
        self.check_channels(3, "copy_scaled_4onto3")?;

        let mut temp = PixelBuffer::new_with_options(src.options);
        temp.allocate_with_dimensions(src.width, src.height, 3, None)?;
        temp.copy_unscaled_4onto3(src)?;

        self.copy_scaled(&temp)
    }

    /// Build this 4 channel image from a single channel mask, every pixel
    /// gets `fill` as colour and the mask value as alpha
    ///
    /// # Errors
    /// - [`ImageErrors::BadBufferState`] if either buffer is invalid
    /// - [`ImageErrors::UnsupportedChannels`] for the wrong channel counts
    /// - [`ImageErrors::DimensionsMisMatch`] if sizes differ
    pub fn copy_unscaled_alpha_mask(&mut self, src: &PixelBuffer, fill: [u8; 3]) -> Result<(), ImageErrors> {
        src.check_channels(1, "copy_unscaled_alpha_mask")?;
        self.check_channels(4, "copy_unscaled_alpha_mask")?;
        self.check_same_dimensions(src)?;

        copy_alpha_mask(src.pixels("alpha mask copy")?, self.pixels_mut("alpha mask copy")?, fill);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use nanorand::Rng;

    use crate::errors::ImageErrors;
    use crate::pixel_buffer::PixelBuffer;
    use crate::temp_buffer::TempBufferPool;

    fn random_buffer(width: u32, height: u32, channels: u8, seed: u64) -> PixelBuffer {
        let mut rng = nanorand::WyRand::new_seed(seed);
        let mut data = vec![0_u8; (width * height) as usize * usize::from(channels)];
        rng.fill(&mut data);

        PixelBuffer::from_vec(data, width, height, channels).unwrap()
    }

    fn with_alpha(buffer: &mut PixelBuffer, alpha: u8) {
        for pixel in buffer.data_mut().unwrap().chunks_exact_mut(4) {
            pixel[3] = alpha;
        }
    }

    #[test]
    fn opaque_composite_copies_rgb() {
        let mut src = random_buffer(8, 8, 4, 1);
        with_alpha(&mut src, 255);
        let mut dst = random_buffer(8, 8, 3, 2);
        let mut pool = TempBufferPool::dynamic();

        dst.composite(&src, &mut pool).unwrap();

        for (s, d) in src.data().unwrap().chunks_exact(4).zip(dst.data().unwrap().chunks_exact(3)) {
            assert_eq!(&s[..3], d);
        }
    }

    #[test]
    fn transparent_composite_changes_nothing() {
        let mut src = random_buffer(8, 8, 4, 3);
        with_alpha(&mut src, 0);
        let mut dst = random_buffer(8, 8, 3, 4);
        let before = dst.try_clone().unwrap();
        let mut pool = TempBufferPool::dynamic();

        dst.composite(&src, &mut pool).unwrap();

        assert_eq!(dst.data(), before.data());
    }

    #[test]
    fn scaled_composite_of_uniform_opaque_source() {
        let mut src = PixelBuffer::with_dimensions(6, 4, 4).unwrap();
        src.fill([40, 80, 120, 255]).unwrap();
        let mut dst = random_buffer(3, 2, 3, 5);
        let mut pool = TempBufferPool::with_capacity(1024);

        dst.composite(&src, &mut pool).unwrap();

        assert!(dst.data().unwrap().chunks_exact(3).all(|p| p == [40, 80, 120]));
        assert_eq!(pool.stats().static_use_count, 1);
        assert_eq!(pool.stats().max_request_size, 6 * 2 * 4);
    }

    #[test]
    fn scaled_composite_of_transparent_source() {
        let mut src = random_buffer(5, 7, 4, 6);
        with_alpha(&mut src, 0);
        let mut dst = random_buffer(10, 3, 3, 7);
        let before = dst.try_clone().unwrap();
        let mut pool = TempBufferPool::dynamic();

        dst.composite(&src, &mut pool).unwrap();

        assert_eq!(dst.data(), before.data());
    }

    #[test]
    fn composite_needs_rgb_destination() {
        let src = random_buffer(2, 2, 4, 8);
        let mut dst = random_buffer(2, 2, 4, 9);
        let mut pool = TempBufferPool::dynamic();

        assert!(matches!(
            dst.composite(&src, &mut pool),
            Err(ImageErrors::UnsupportedChannels(4, _))
        ));
    }

    #[test]
    fn copy_converts_channels() {
        let src = random_buffer(4, 4, 3, 10);
        let mut rgba = PixelBuffer::with_dimensions(4, 4, 4).unwrap();

        rgba.copy(&src).unwrap();

        for (s, d) in src.data().unwrap().chunks_exact(3).zip(rgba.data().unwrap().chunks_exact(4)) {
            assert_eq!(s, &d[..3]);
            assert_eq!(d[3], 255);
        }

        let mut rgb = PixelBuffer::with_dimensions(4, 4, 3).unwrap();
        rgb.copy(&rgba).unwrap();
        assert_eq!(rgb.data(), src.data());
    }

    #[test]
    fn scaled_copies_preserve_uniform_color() {
        let mut src = PixelBuffer::with_dimensions(8, 6, 3).unwrap();
        src.fill([7, 77, 177, 0]).unwrap();

        let mut same = PixelBuffer::with_dimensions(3, 5, 3).unwrap();
        same.copy(&src).unwrap();
        assert!(same.data().unwrap().chunks_exact(3).all(|p| p == [7, 77, 177]));

        let mut rgba = PixelBuffer::with_dimensions(16, 2, 4).unwrap();
        rgba.copy(&src).unwrap();
        assert!(rgba.data().unwrap().chunks_exact(4).all(|p| p == [7, 77, 177, 255]));

        let mut rgb = PixelBuffer::with_dimensions(5, 5, 3).unwrap();
        rgb.copy(&rgba).unwrap();
        assert!(rgb.data().unwrap().chunks_exact(3).all(|p| p == [7, 77, 177]));
    }

    #[test]
    fn unscaled_copy_rejects_size_mismatch() {
        let src = random_buffer(4, 4, 3, 11);
        let mut dst = PixelBuffer::with_dimensions(4, 2, 3).unwrap();

        assert!(matches!(
            dst.copy_unscaled(&src),
            Err(ImageErrors::DimensionsMisMatch(2, 4))
        ));
    }

    #[test]
    fn alpha_mask_builds_rgba() {
        let mask = PixelBuffer::from_data(&[0, 100, 200, 255], 2, 2, 1).unwrap();
        let mut dst = PixelBuffer::with_dimensions(2, 2, 4).unwrap();

        dst.copy_unscaled_alpha_mask(&mask, [1, 2, 3]).unwrap();

        assert_eq!(
            dst.data().unwrap(),
            &[1, 2, 3, 0, 1, 2, 3, 100, 1, 2, 3, 200, 1, 2, 3, 255]
        );
    }
}
