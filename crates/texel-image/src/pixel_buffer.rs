/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! An owned raster image
//!
//! A [`PixelBuffer`] is a row major, channel interleaved, 8 bit per channel
//! image. Rows are tightly packed, the byte for channel `c` of pixel
//! `(x, y)` lives at `(y * width + x) * channels + c`.
//!
//! Allocation failures do not abort, they mark the buffer invalid and
//! return an error, every later operation on an invalid buffer is refused
//! until a successful allocation.
//!
//! Operations beyond allocation and raw access live in [`crate::impls`].
use std::fmt::{Debug, Formatter};

use texel_core::log::{info, warn};
use texel_core::options::BufferOptions;

use crate::errors::ImageErrors;
use crate::temp_buffer::try_alloc_zeroed;

/// Bytes needed by a `width x height` image of `channels` channels,
/// `None` if that does not fit in a `usize`
pub(crate) fn checked_size(width: u32, height: u32, channels: u8) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(usize::from(channels))
}

/// An owned interleaved `u8` image
pub struct PixelBuffer {
    pub(crate) width:          u32,
    pub(crate) height:         u32,
    pub(crate) channels:       u8,
    pub(crate) data:           Vec<u8>,
    pub(crate) bad_allocation: bool,
    pub(crate) options:        BufferOptions
}

impl PixelBuffer {
    /// Create an empty buffer with default limits
    pub fn new() -> PixelBuffer {
        PixelBuffer::new_with_options(BufferOptions::default())
    }

    /// Create an empty buffer with custom limits
    pub fn new_with_options(options: BufferOptions) -> PixelBuffer {
        PixelBuffer {
            width: 0,
            height: 0,
            channels: 0,
            data: Vec::new(),
            bad_allocation: false,
            options
        }
    }

    /// Create a zero filled buffer of the given dimensions
    ///
    /// # Errors
    /// See [`allocate`](Self::allocate)
    pub fn with_dimensions(width: u32, height: u32, channels: u8) -> Result<PixelBuffer, ImageErrors> {
        let mut buffer = PixelBuffer::new();
        buffer.allocate_with_dimensions(width, height, channels, None)?;

        Ok(buffer)
    }

    /// Create a buffer holding a copy of `data`
    ///
    /// `data` must hold at least `width * height * channels` bytes,
    /// extra bytes are ignored.
    ///
    /// # Errors
    /// - [`ImageErrors::DimensionsMisMatch`] if `data` is too short
    /// - Allocation errors, see [`allocate`](Self::allocate)
    pub fn from_data(data: &[u8], width: u32, height: u32, channels: u8) -> Result<PixelBuffer, ImageErrors> {
        let mut buffer = PixelBuffer::new();
        buffer.set_size(width, height, channels);

        let expected = buffer
            .expected_size()
            .ok_or(ImageErrors::AllocationFailure(usize::MAX))?;
        if data.len() < expected {
            return Err(ImageErrors::DimensionsMisMatch(expected, data.len()));
        }
        buffer.allocate(None)?.copy_from_slice(&data[..expected]);

        Ok(buffer)
    }

    /// Create a buffer owning `data` without copying
    ///
    /// # Errors
    /// See [`set_data_and_size`](Self::set_data_and_size)
    pub fn from_vec(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Result<PixelBuffer, ImageErrors> {
        let mut buffer = PixelBuffer::new();
        buffer.set_data_and_size(data, width, height, channels)?;

        Ok(buffer)
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of interleaved channels per pixel
    pub const fn components(&self) -> u8 {
        self.channels
    }

    /// Get image dimensions as a tuple of (width,height)
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Size of the backing buffer in bytes
    pub fn data_size(&self) -> usize {
        self.data.len()
    }

    pub const fn options(&self) -> &BufferOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: BufferOptions) {
        self.options = options;
    }

    /// Return true if the buffer holds data from a successful allocation
    pub fn is_valid(&self) -> bool {
        !self.bad_allocation && !self.data.is_empty()
    }

    /// Return true if the last allocation failed or no data is held
    pub fn is_buffer_invalid(&self) -> bool {
        !self.is_valid()
    }

    pub(crate) const fn pixel_count(&self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Bytes needed for the current dimensions, `None` on overflow
    pub(crate) fn expected_size(&self) -> Option<usize> {
        checked_size(self.width, self.height, self.channels)
    }

    /// Bytes for a `width x height x channels` image, checked against
    /// overflow and this buffer's allocation cap
    pub(crate) fn allocation_size(
        &self, width: u32, height: u32, channels: u8
    ) -> Result<usize, ImageErrors> {
        let size = checked_size(width, height, channels)
            .ok_or(ImageErrors::AllocationFailure(usize::MAX))?;

        if size > self.options.get_max_alloc_size() && !self.options.get_size_override() {
            warn!("Bad size: {}", size);
            return Err(ImageErrors::AllocationFailure(size));
        }
        Ok(size)
    }

    pub(crate) fn set_size(&mut self, width: u32, height: u32, channels: u8) {
        self.width = width;
        self.height = height;
        self.channels = channels;
    }

    fn mark_bad(&mut self) {
        self.bad_allocation = true;
        self.data = Vec::new();
    }

    /// Error out on an invalid buffer
    pub(crate) fn ensure_valid(&self, operation: &'static str) -> Result<(), ImageErrors> {
        if self.is_buffer_invalid() {
            warn!("Invalid image buffer, {} aborted", operation);
            return Err(ImageErrors::BadBufferState(operation));
        }
        Ok(())
    }

    /// The `width * height * channels` pixel bytes of a valid buffer
    pub(crate) fn pixels(&self, operation: &'static str) -> Result<&[u8], ImageErrors> {
        self.ensure_valid(operation)?;

        let expected = self.expected_size().unwrap_or(usize::MAX);
        let found = self.data.len();

        self.data.get(..expected).ok_or_else(|| {
            warn!("Image data too short for {}: {} < {}", operation, found, expected);
            ImageErrors::DimensionsMisMatch(expected, found)
        })
    }

    pub(crate) fn pixels_mut(&mut self, operation: &'static str) -> Result<&mut [u8], ImageErrors> {
        self.ensure_valid(operation)?;

        let expected = self.expected_size().unwrap_or(usize::MAX);
        let found = self.data.len();

        self.data.get_mut(..expected).ok_or_else(|| {
            warn!("Image data too short for {}: {} < {}", operation, found, expected);
            ImageErrors::DimensionsMisMatch(expected, found)
        })
    }

    /// Borrow the pixel data
    ///
    /// Returns `None` and logs a warning if the buffer is not valid
    pub fn data(&self) -> Option<&[u8]> {
        if self.is_buffer_invalid() {
            warn!("Bad memory allocation for the image buffer");
            return None;
        }
        Some(&self.data)
    }

    /// Mutably borrow the pixel data
    ///
    /// Returns `None` and logs a warning if the buffer is not valid
    pub fn data_mut(&mut self) -> Option<&mut [u8]> {
        if self.is_buffer_invalid() {
            warn!("Bad memory allocation for the image buffer");
            return None;
        }
        Some(&mut self.data)
    }

    /// Allocate the backing buffer
    ///
    /// `None` allocates `width * height * channels` bytes. The current
    /// buffer is kept when it already has the requested size, otherwise
    /// it is replaced by a zeroed one.
    ///
    /// # Errors
    /// [`ImageErrors::AllocationFailure`] if the size is zero, overflows,
    /// is above the allocation cap without a size override, or cannot be
    /// obtained. The buffer is marked invalid in that case.
    pub fn allocate(&mut self, size: Option<usize>) -> Result<&mut [u8], ImageErrors> {
        self.bad_allocation = false;

        let size = match size.or_else(|| self.expected_size()) {
            Some(size) => size,
            None => {
                warn!(
                    "Bad dimensions: {}x{}x{}",
                    self.width, self.height, self.channels
                );
                self.mark_bad();
                return Err(ImageErrors::AllocationFailure(usize::MAX));
            }
        };
        if size == 0
            || (size > self.options.get_max_alloc_size() && !self.options.get_size_override())
        {
            warn!("Bad size: {}", size);
            self.mark_bad();
            return Err(ImageErrors::AllocationFailure(size));
        }

        if self.data.len() != size {
            match try_alloc_zeroed(size) {
                Ok(data) => self.data = data,
                Err(err) => {
                    warn!("Could not allocate image data for requested size: {}", size);
                    self.set_size(0, 0, self.channels);
                    self.mark_bad();
                    return Err(err);
                }
            }
        }

        Ok(&mut self.data)
    }

    /// Set dimensions then [`allocate`](Self::allocate)
    ///
    /// # Errors
    /// See [`allocate`](Self::allocate)
    pub fn allocate_with_dimensions(
        &mut self, width: u32, height: u32, channels: u8, size: Option<usize>
    ) -> Result<&mut [u8], ImageErrors> {
        self.set_size(width, height, channels);
        self.allocate(size)
    }

    /// Replace the backing buffer with one of `size` bytes, keeping the
    /// common prefix of the old contents
    ///
    /// `None` uses `width * height * channels` bytes.
    ///
    /// # Errors
    /// [`ImageErrors::AllocationFailure`] if the size is zero, overflows or
    /// cannot be obtained, the buffer is marked invalid in that case.
    pub fn reallocate(&mut self, size: Option<usize>) -> Result<&mut [u8], ImageErrors> {
        let Some(size) = size.or_else(|| self.expected_size()) else {
            warn!(
                "Bad dimensions: {}x{}x{}",
                self.width, self.height, self.channels
            );
            self.mark_bad();
            return Err(ImageErrors::AllocationFailure(usize::MAX));
        };

        if !self.bad_allocation && !self.data.is_empty() && self.data.len() == size {
            return Ok(&mut self.data);
        }
        if size == 0 {
            warn!("Bad size: {}", size);
            self.mark_bad();
            return Err(ImageErrors::AllocationFailure(0));
        }

        let mut new_data = match try_alloc_zeroed(size) {
            Ok(data) => data,
            Err(err) => {
                warn!("Could not reallocate image data for requested size: {}", size);
                self.bad_allocation = true;
                return Err(err);
            }
        };
        let common = self.data.len().min(size);
        new_data[..common].copy_from_slice(&self.data[..common]);

        self.data = new_data;
        self.bad_allocation = false;

        Ok(&mut self.data)
    }

    /// Take ownership of `data` as the new pixel storage
    ///
    /// # Errors
    /// - [`ImageErrors::DimensionsMisMatch`] if `data` is shorter than
    ///   `width * height * channels`
    /// - [`ImageErrors::AllocationFailure`] if that size overflows
    ///
    /// The buffer is left untouched on error.
    pub fn set_data_and_size(
        &mut self, data: Vec<u8>, width: u32, height: u32, channels: u8
    ) -> Result<(), ImageErrors> {
        let expected = checked_size(width, height, channels)
            .ok_or(ImageErrors::AllocationFailure(usize::MAX))?;

        if data.len() < expected {
            return Err(ImageErrors::DimensionsMisMatch(expected, data.len()));
        }
        self.set_size(width, height, channels);
        self.data = data;
        self.bad_allocation = false;

        Ok(())
    }

    /// Detach the pixel storage and reset the buffer to empty
    pub fn release(&mut self) -> Vec<u8> {
        self.set_size(0, 0, 0);
        self.bad_allocation = false;

        std::mem::take(&mut self.data)
    }

    /// Make the buffer hold an image of the given geometry
    ///
    /// Contents are discarded unless the geometry already matches.
    ///
    /// # Errors
    /// See [`allocate`](Self::allocate)
    pub fn resize(&mut self, width: u32, height: u32, channels: u8) -> Result<(), ImageErrors> {
        if self.width == width
            && self.height == height
            && self.channels == channels
            && self.is_valid()
        {
            return Ok(());
        }
        self.data = Vec::new();
        self.allocate_with_dimensions(width, height, channels, None)?;

        Ok(())
    }

    /// Check dimensions, channel count and data size against the limits
    /// in this buffer's options
    ///
    /// Always passes when the options carry a size override.
    ///
    /// # Errors
    /// [`ImageErrors::BoundsViolation`] describing the buffer
    pub fn sanity_check(&self) -> Result<(), ImageErrors> {
        let options = &self.options;

        if options.get_size_override() {
            return Ok(());
        }
        if self.width > options.get_max_dimension()
            || self.height > options.get_max_dimension()
            || self.pixel_count() > options.get_max_area()
            || self.data.len() > options.get_max_data_size()
            || self.channels > options.get_max_components()
        {
            let msg = format!(
                "Failed sanity check - width: {} - height: {} - datasize: {} - components: {}",
                self.width,
                self.height,
                self.data.len(),
                self.channels
            );
            warn!("{}", msg);
            return Err(ImageErrors::BoundsViolation(msg));
        }
        Ok(())
    }

    /// Log the buffer geometry at info level
    pub fn dump(&self) {
        info!(
            "PixelBuffer components {} data size {} width {} height {} valid {}",
            self.channels,
            self.data.len(),
            self.width,
            self.height,
            self.is_valid()
        );
    }

    fn check_rect(&self, x: u32, y: u32, width: u32, height: u32) -> Result<(), ImageErrors> {
        let fits_x = x.checked_add(width).is_some_and(|end| end <= self.width);
        let fits_y = y.checked_add(height).is_some_and(|end| end <= self.height);

        if !fits_x || !fits_y {
            return Err(ImageErrors::BoundsViolation(format!(
                "Rectangle {width}x{height} at ({x},{y}) outside {}x{} image",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Copy a rectangle out of the image into a tightly packed buffer
    ///
    /// # Errors
    /// - [`ImageErrors::BadBufferState`] for an invalid buffer
    /// - [`ImageErrors::BoundsViolation`] if the rectangle does not fit
    pub fn sub_image(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Vec<u8>, ImageErrors> {
        self.check_rect(x, y, width, height)?;
        let data = self.pixels("sub image retrieval")?;

        let channels = usize::from(self.channels);
        let row_bytes = width as usize * channels;
        let stride = self.width as usize * channels;
        let x_offset = x as usize * channels;

        let mut out = try_alloc_zeroed(row_bytes * height as usize)?;

        if row_bytes == 0 {
            return Ok(out);
        }
        for (row, out_row) in out.chunks_exact_mut(row_bytes).enumerate() {
            let start = (y as usize + row) * stride + x_offset;
            out_row.copy_from_slice(&data[start..start + row_bytes]);
        }
        Ok(out)
    }

    /// Copy `data` into a rectangle of the image
    ///
    /// # Arguments
    /// - x,y: Top left corner of the destination rectangle
    /// - width,height: Size of the rectangle
    /// - data: Source rows
    /// - stride: Distance between source rows in bytes, 0 for tightly packed rows
    /// - reverse_y: Read source rows bottom to top
    ///
    /// # Errors
    /// - [`ImageErrors::BadBufferState`] for an invalid buffer
    /// - [`ImageErrors::BoundsViolation`] if the rectangle does not fit or
    ///   `data` is too short
    pub fn set_sub_image(
        &mut self, x: u32, y: u32, width: u32, height: u32, data: &[u8], stride: usize,
        reverse_y: bool
    ) -> Result<(), ImageErrors> {
        self.check_rect(x, y, width, height)?;

        let channels = usize::from(self.channels);
        let row_bytes = width as usize * channels;
        let src_stride = if stride == 0 { row_bytes } else { stride };

        if height == 0 || row_bytes == 0 {
            return Ok(());
        }
        let needed = (height as usize - 1) * src_stride + row_bytes;
        if src_stride < row_bytes || data.len() < needed {
            return Err(ImageErrors::BoundsViolation(format!(
                "Source of {} bytes with stride {src_stride} too small for a {width}x{height} rectangle",
                data.len()
            )));
        }

        let dst_stride = self.width as usize * channels;
        let x_offset = x as usize * channels;
        let pixels = self.pixels_mut("sub image update")?;

        for i in 0..height as usize {
            let row = if reverse_y { height as usize - 1 - i } else { i };
            let from = row * src_stride;
            let to = (y as usize + i) * dst_stride + x_offset;

            pixels[to..to + row_bytes].copy_from_slice(&data[from..from + row_bytes]);
        }
        Ok(())
    }

    /// Make an independent copy of this buffer
    ///
    /// # Errors
    /// - [`ImageErrors::BadBufferState`] for an invalid buffer
    /// - [`ImageErrors::AllocationFailure`] if memory cannot be obtained
    pub fn try_clone(&self) -> Result<PixelBuffer, ImageErrors> {
        self.ensure_valid("duplication")?;

        let mut data = try_alloc_zeroed(self.data.len())?;
        data.copy_from_slice(&self.data);

        Ok(PixelBuffer {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data,
            bad_allocation: false,
            options: self.options
        })
    }
}

impl Default for PixelBuffer {
    fn default() -> Self {
        PixelBuffer::new()
    }
}

impl Debug for PixelBuffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .field("data_size", &self.data.len())
            .field("valid", &self.is_valid())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use texel_core::options::BufferOptions;

    use crate::errors::ImageErrors;
    use crate::pixel_buffer::PixelBuffer;

    #[test]
    fn new_buffer_is_empty_and_invalid() {
        let buffer = PixelBuffer::new();

        assert_eq!(buffer.dimensions(), (0, 0));
        assert_eq!(buffer.data_size(), 0);
        assert!(buffer.is_buffer_invalid());
    }

    #[test]
    fn allocate_uses_dimensions() {
        let buffer = PixelBuffer::with_dimensions(8, 4, 3).unwrap();

        assert_eq!(buffer.data_size(), 8 * 4 * 3);
        assert!(buffer.is_valid());
        assert!(buffer.data().unwrap().iter().all(|x| *x == 0));
    }

    #[test]
    fn zero_size_marks_invalid() {
        let mut buffer = PixelBuffer::with_dimensions(2, 2, 1).unwrap();

        assert!(matches!(
            buffer.allocate(Some(0)),
            Err(ImageErrors::AllocationFailure(0))
        ));
        assert!(buffer.is_buffer_invalid());
        assert!(buffer.data().is_none());

        // a good allocation recovers
        buffer.allocate(None).unwrap();
        assert!(buffer.is_valid());
    }

    #[test]
    fn over_cap_needs_override() {
        let options = BufferOptions::default().set_max_alloc_size(64);
        let mut buffer = PixelBuffer::new_with_options(options);

        assert!(buffer.allocate(Some(65)).is_err());

        buffer.set_options(options.set_size_override(true));
        assert_eq!(buffer.allocate(Some(65)).unwrap().len(), 65);
    }

    #[test]
    fn computed_size_respects_cap() {
        let options = BufferOptions::default().set_max_alloc_size(64);
        let mut buffer = PixelBuffer::new_with_options(options);

        assert!(matches!(
            buffer.allocate_with_dimensions(8, 8, 4, None),
            Err(ImageErrors::AllocationFailure(256))
        ));
        assert!(buffer.is_buffer_invalid());
        assert!(buffer.data().is_none());

        assert_eq!(buffer.allocate_with_dimensions(4, 4, 4, None).unwrap().len(), 64);

        buffer.set_options(options.set_size_override(true));
        assert_eq!(buffer.allocate_with_dimensions(8, 8, 4, None).unwrap().len(), 256);
    }

    #[test]
    fn huge_dimensions_do_not_panic() {
        #[cfg(target_pointer_width = "64")]
        let (width, height, channels) = (u32::MAX, u32::MAX, 255);
        #[cfg(not(target_pointer_width = "64"))]
        let (width, height, channels) = (u32::MAX, 2, 1);

        assert!(matches!(
            PixelBuffer::with_dimensions(width, height, channels),
            Err(ImageErrors::AllocationFailure(usize::MAX))
        ));

        let mut buffer = PixelBuffer::new();
        assert!(matches!(
            buffer.allocate_with_dimensions(width, height, channels, None),
            Err(ImageErrors::AllocationFailure(usize::MAX))
        ));
        assert!(buffer.is_buffer_invalid());
        assert!(buffer.reallocate(None).is_err());
        assert!(matches!(
            buffer.set_data_and_size(vec![0; 4], width, height, channels),
            Err(ImageErrors::AllocationFailure(usize::MAX))
        ));
        assert!(PixelBuffer::from_data(&[0; 4], width, height, channels).is_err());
    }

    #[test]
    fn unallocated_buffer_has_no_data() {
        let mut buffer = PixelBuffer::new();

        assert!(buffer.data().is_none());
        assert!(buffer.data_mut().is_none());
    }

    #[test]
    fn allocate_same_size_keeps_contents() {
        let mut buffer = PixelBuffer::with_dimensions(2, 2, 1).unwrap();
        buffer.data_mut().unwrap().copy_from_slice(&[1, 2, 3, 4]);

        buffer.allocate(None).unwrap();

        assert_eq!(buffer.data().unwrap(), &[1, 2, 3, 4]);
    }

    #[test]
    fn reallocate_preserves_common_prefix() {
        let mut buffer = PixelBuffer::from_data(&[1, 2, 3, 4, 5, 6], 2, 1, 3).unwrap();

        assert_eq!(buffer.reallocate(Some(4)).unwrap(), &[1, 2, 3, 4]);
        assert_eq!(buffer.reallocate(Some(6)).unwrap(), &[1, 2, 3, 4, 0, 0]);
    }

    #[test]
    fn release_detaches_storage() {
        let mut buffer = PixelBuffer::from_data(&[9; 12], 2, 2, 3).unwrap();

        let data = buffer.release();

        assert_eq!(data, vec![9; 12]);
        assert_eq!(buffer.dimensions(), (0, 0));
        assert_eq!(buffer.components(), 0);
        assert!(buffer.is_buffer_invalid());
    }

    #[test]
    fn set_data_and_size_checks_length() {
        let mut buffer = PixelBuffer::new();

        assert!(buffer.set_data_and_size(vec![0; 5], 2, 1, 3).is_err());
        buffer.set_data_and_size(vec![7; 6], 2, 1, 3).unwrap();
        assert_eq!(buffer.data_size(), 6);
        assert!(buffer.is_valid());
    }

    #[test]
    fn resize_discards_on_change() {
        let mut buffer = PixelBuffer::from_data(&[5; 4], 2, 2, 1).unwrap();

        buffer.resize(2, 2, 1).unwrap();
        assert_eq!(buffer.data().unwrap(), &[5; 4]);

        buffer.resize(3, 2, 4).unwrap();
        assert_eq!(buffer.data_size(), 24);
        assert!(buffer.data().unwrap().iter().all(|x| *x == 0));
    }

    #[test]
    fn sanity_check_limits() {
        let buffer = PixelBuffer::with_dimensions(16, 16, 4).unwrap();
        assert!(buffer.sanity_check().is_ok());

        let mut big = PixelBuffer::new_with_options(BufferOptions::default().set_max_dimension(8));
        big.allocate_with_dimensions(16, 1, 1, None).unwrap();
        assert!(matches!(
            big.sanity_check(),
            Err(ImageErrors::BoundsViolation(_))
        ));

        big.set_options(BufferOptions::new_unrestricted());
        assert!(big.sanity_check().is_ok());
    }

    #[test]
    fn sub_image_round_trip() {
        #[rustfmt::skip]
        let pixels = [
            0, 1, 2, 3,
            4, 5, 6, 7,
            8, 9, 10, 11,
        ];
        let mut buffer = PixelBuffer::from_data(&pixels, 4, 3, 1).unwrap();

        let sub = buffer.sub_image(1, 1, 2, 2).unwrap();
        assert_eq!(sub, vec![5, 6, 9, 10]);

        buffer.set_sub_image(0, 0, 2, 2, &sub, 0, false).unwrap();
        assert_eq!(&buffer.data().unwrap()[..6], &[5, 6, 2, 3, 9, 10]);
    }

    #[test]
    fn set_sub_image_reverse_and_stride() {
        let mut buffer = PixelBuffer::with_dimensions(2, 2, 1).unwrap();
        // rows of 2 bytes padded to 3
        let source = [1, 2, 0xFF, 3, 4];

        buffer.set_sub_image(0, 0, 2, 2, &source, 3, true).unwrap();

        assert_eq!(buffer.data().unwrap(), &[3, 4, 1, 2]);
    }

    #[test]
    fn sub_image_out_of_range_is_an_error() {
        let mut buffer = PixelBuffer::with_dimensions(4, 4, 3).unwrap();

        assert!(matches!(
            buffer.sub_image(3, 0, 2, 1),
            Err(ImageErrors::BoundsViolation(_))
        ));
        assert!(matches!(
            buffer.set_sub_image(0, 3, 1, 2, &[0; 6], 0, false),
            Err(ImageErrors::BoundsViolation(_))
        ));
        // too little source data
        assert!(matches!(
            buffer.set_sub_image(0, 0, 2, 2, &[0; 6], 0, false),
            Err(ImageErrors::BoundsViolation(_))
        ));
    }

    #[test]
    fn try_clone_is_independent() {
        let buffer = PixelBuffer::from_data(&[1, 2, 3], 1, 1, 3).unwrap();
        let mut copy = buffer.try_clone().unwrap();

        copy.data_mut().unwrap()[0] = 100;

        assert_eq!(buffer.data().unwrap(), &[1, 2, 3]);
        assert_eq!(copy.data().unwrap(), &[100, 2, 3]);
        assert!(PixelBuffer::new().try_clone().is_err());
    }
}
