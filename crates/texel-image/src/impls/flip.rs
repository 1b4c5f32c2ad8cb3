/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use texel_core::log::warn;
use texel_imageprocs::flip::vertical_flip;

use crate::errors::ImageErrors;
use crate::pixel_buffer::PixelBuffer;
use crate::temp_buffer::TempBufferPool;

impl PixelBuffer {
    /// Reverse the order of the rows, in place
    ///
    /// One row of scratch memory is taken from `pool`.
    ///
    /// # Errors
    /// - [`ImageErrors::BadBufferState`] for an invalid buffer
    /// - [`ImageErrors::AllocationFailure`] if the scratch row cannot be obtained
    pub fn vertical_flip(&mut self, pool: &mut TempBufferPool) -> Result<(), ImageErrors> {
        let row_bytes = self.width as usize * usize::from(self.channels);
        let pixels = self.pixels_mut("flipping")?;

        let mut scratch = pool.get(row_bytes).inspect_err(|_| {
            warn!("Out of memory. Flipping aborted");
        })?;
        vertical_flip(pixels, row_bytes, &mut scratch);
        scratch.release();

        Ok(())
    }
}
