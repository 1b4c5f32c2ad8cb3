/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Resizing a pixel buffer
//!
//! Scaling resamples the image with [`bilinear_scale`], the non scaling
//! variant keeps pixels where they are and crops or pads with black.
use texel_core::log::warn;
use texel_imageprocs::power_of_two::{biased_dimension, contract_dimension, expand_dimension};
use texel_imageprocs::resize::bilinear_scale;

use crate::errors::ImageErrors;
use crate::pixel_buffer::PixelBuffer;
use crate::temp_buffer::{try_alloc_zeroed, TempBufferPool};

impl PixelBuffer {
    fn check_scalable(&self, operation: &'static str) -> Result<(), ImageErrors> {
        self.ensure_valid(operation)?;

        if !matches!(self.channels, 1 | 3 | 4) {
            warn!("Invalid number of components: {}. Aborted.", self.channels);
            return Err(ImageErrors::UnsupportedChannels(self.channels, operation));
        }
        Ok(())
    }

    /// Change the image dimensions to `new_width` by `new_height`
    ///
    /// With `scale_data` the image is resampled, otherwise the top left of
    /// the old image is kept and new pixels are black. Same dimensions are
    /// a no-op.
    ///
    /// # Errors
    /// - [`ImageErrors::BadBufferState`] for an invalid buffer
    /// - [`ImageErrors::UnsupportedChannels`] for 2 or more than 4 channels
    /// - [`ImageErrors::ZeroDimension`] if a new dimension is zero
    /// - [`ImageErrors::AllocationFailure`] if memory cannot be obtained
    pub fn scale(
        &mut self, new_width: u32, new_height: u32, scale_data: bool, pool: &mut TempBufferPool
    ) -> Result<(), ImageErrors> {
        self.check_scalable("scaling")?;

        let (old_width, old_height) = self.dimensions();
        if (old_width, old_height) == (new_width, new_height) {
            return Ok(());
        }
        if new_width == 0 || new_height == 0 {
            warn!(
                "Non-positive data size: width = {} - height = {}; aborting",
                new_width, new_height
            );
            return Err(ImageErrors::ZeroDimension("scaling"));
        }

        let channels = usize::from(self.channels);
        let (old_w, old_h) = (old_width as usize, old_height as usize);
        let (new_w, new_h) = (new_width as usize, new_height as usize);

        if scale_data {
            let new_size = self.allocation_size(new_width, new_height, self.channels)?;
            let mut new_data = try_alloc_zeroed(new_size).inspect_err(|_| {
                warn!("Out of memory while rescaling to {}x{}", new_width, new_height);
            })?;
            bilinear_scale(
                self.pixels("scaling")?,
                old_w,
                old_h,
                old_w * channels,
                &mut new_data,
                new_w,
                new_h,
                new_w * channels,
                channels
            );
            return self.set_data_and_size(new_data, new_width, new_height, self.channels);
        }

        let old_size = old_w * old_h * channels;
        let mut saved = pool.get(old_size)?;
        saved.copy_from_slice(self.pixels("cropping")?);

        let new_buffer =
            self.allocate_with_dimensions(new_width, new_height, self.channels, None)?;

        let old_row = old_w * channels;
        let new_row = new_w * channels;
        let kept = old_w.min(new_w) * channels;

        for (row, out) in new_buffer.chunks_exact_mut(new_row).enumerate() {
            if row < old_h {
                out[..kept].copy_from_slice(&saved[row * old_row..row * old_row + kept]);
                out[kept..].fill(0);
            } else {
                out.fill(0);
            }
        }
        saved.release();

        Ok(())
    }

    /// Return a resampled copy of this image
    ///
    /// Returns `None`, logging why, for invalid buffers, unsupported channel
    /// counts, zero dimensions or allocation failures.
    pub fn scaled(&self, new_width: u32, new_height: u32) -> Option<PixelBuffer> {
        if self.check_scalable("scaled copy").is_err() {
            return None;
        }
        if self.dimensions() == (new_width, new_height) {
            return self.try_clone().ok();
        }
        if new_width == 0 || new_height == 0 {
            warn!("Cannot scale to {}x{}", new_width, new_height);
            return None;
        }

        let channels = usize::from(self.channels);
        let src = self.pixels("scaled copy").ok()?;

        let mut result = PixelBuffer::new_with_options(self.options);
        let dst = result
            .allocate_with_dimensions(new_width, new_height, self.channels, None)
            .ok()?;

        bilinear_scale(
            src,
            self.width as usize,
            self.height as usize,
            self.width as usize * channels,
            dst,
            new_width as usize,
            new_height as usize,
            new_width as usize * channels,
            channels
        );
        Some(result)
    }

    /// Grow each dimension to the next power of two, at most `max_dim`
    ///
    /// # Errors
    /// See [`scale`](Self::scale)
    pub fn expand_to_power_of_two(
        &mut self, max_dim: u32, scale_data: bool, pool: &mut TempBufferPool
    ) -> Result<(), ImageErrors> {
        let new_width = expand_dimension(self.width, max_dim);
        let new_height = expand_dimension(self.height, max_dim);

        self.scale(new_width, new_height, scale_data, pool)
    }

    /// Shrink each dimension to the previous power of two, at most `max_dim`
    ///
    /// # Errors
    /// See [`scale`](Self::scale)
    pub fn contract_to_power_of_two(
        &mut self, max_dim: u32, scale_data: bool, pool: &mut TempBufferPool
    ) -> Result<(), ImageErrors> {
        let new_width = contract_dimension(self.width, max_dim);
        let new_height = contract_dimension(self.height, max_dim);

        self.scale(new_width, new_height, scale_data, pool)
    }

    /// Resample to the nearest power of two per dimension, favouring the
    /// smaller one
    ///
    /// # Errors
    /// See [`scale`](Self::scale)
    pub fn biased_scale_to_power_of_two(
        &mut self, max_dim: u32, pool: &mut TempBufferPool
    ) -> Result<(), ImageErrors> {
        let new_width = biased_dimension(self.width, max_dim);
        let new_height = biased_dimension(self.height, max_dim);

        self.scale(new_width, new_height, true, pool)
    }
}
