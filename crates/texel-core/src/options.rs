/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Options respected by pixel buffers
use crate::constants::{
    MAX_ALLOC_SIZE, MAX_IMAGE_AREA, MAX_IMAGE_COMPONENTS, MAX_IMAGE_DATA_SIZE, MAX_IMAGE_SIZE,
    TEMP_BUFFER_SIZE
};

/// Buffer options
///
/// Limits on dimensions and allocation sizes, plus the size of the
/// shared scratch buffer handed out by temp buffer pools.
///
/// Options are built by chaining `set_` methods on the default value
///
/// # Example
/// ```
/// use texel_core::options::BufferOptions;
///
/// let options = BufferOptions::default()
///     .set_max_dimension(1024)
///     .set_size_override(false);
/// assert_eq!(options.get_max_dimension(), 1024);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BufferOptions {
    /// Maximum width or height of an image
    ///
    /// - Default value: 2048
    max_dimension:    u32,
    /// Maximum number of pixels, `width*height`
    ///
    /// - Default value: 2048*2048
    max_area:         usize,
    /// Maximum number of interleaved components
    ///
    /// - Default value: 8
    max_components:   u8,
    /// Maximum size of decoded data
    ///
    /// - Default value: 2048*2048*8
    max_data_size:    usize,
    /// Maximum size accepted by a single allocation
    ///
    /// - Default value: 4096*4096*16
    max_alloc_size:   usize,
    /// When set, the limits above are not enforced
    ///
    /// - Default value: false
    size_override:    bool,
    /// Capacity of the shared scratch buffer
    ///
    /// - Default value: 5 MiB
    temp_buffer_size: usize
}

impl Default for BufferOptions {
    fn default() -> Self {
        BufferOptions {
            max_dimension:    MAX_IMAGE_SIZE,
            max_area:         MAX_IMAGE_AREA,
            max_components:   MAX_IMAGE_COMPONENTS,
            max_data_size:    MAX_IMAGE_DATA_SIZE,
            max_alloc_size:   MAX_ALLOC_SIZE,
            size_override:    false,
            temp_buffer_size: TEMP_BUFFER_SIZE
        }
    }
}

impl BufferOptions {
    /// Options that do not enforce any size limit
    ///
    /// Use for tools that legitimately handle images larger than
    /// what the renderer accepts.
    #[must_use]
    pub fn new_unrestricted() -> BufferOptions {
        BufferOptions::default().set_size_override(true)
    }

    /// Get the maximum width or height
    pub const fn get_max_dimension(&self) -> u32 {
        self.max_dimension
    }
    /// Get the maximum number of pixels
    pub const fn get_max_area(&self) -> usize {
        self.max_area
    }
    /// Get the maximum number of components
    pub const fn get_max_components(&self) -> u8 {
        self.max_components
    }
    /// Get the maximum decoded data size
    pub const fn get_max_data_size(&self) -> usize {
        self.max_data_size
    }
    /// Get the maximum size of a single allocation
    pub const fn get_max_alloc_size(&self) -> usize {
        self.max_alloc_size
    }
    /// Return true if limits are not enforced
    pub const fn get_size_override(&self) -> bool {
        self.size_override
    }
    /// Get the capacity of the shared scratch buffer
    pub const fn get_temp_buffer_size(&self) -> usize {
        self.temp_buffer_size
    }

    /// Set the maximum width or height of an image
    ///
    /// # Arguments
    ///
    /// * `dimension`: The maximum width and height allowed
    #[must_use]
    pub const fn set_max_dimension(mut self, dimension: u32) -> Self {
        self.max_dimension = dimension;
        self
    }
    /// Set the maximum number of pixels an image may have
    #[must_use]
    pub const fn set_max_area(mut self, area: usize) -> Self {
        self.max_area = area;
        self
    }
    /// Set the maximum number of interleaved components
    #[must_use]
    pub const fn set_max_components(mut self, components: u8) -> Self {
        self.max_components = components;
        self
    }
    /// Set the maximum decoded data size
    #[must_use]
    pub const fn set_max_data_size(mut self, size: usize) -> Self {
        self.max_data_size = size;
        self
    }
    /// Set the maximum size accepted by a single allocation
    #[must_use]
    pub const fn set_max_alloc_size(mut self, size: usize) -> Self {
        self.max_alloc_size = size;
        self
    }
    /// Set whether limits should be ignored
    ///
    /// This is the escape hatch for callers handling oversized images,
    /// allocations above [`get_max_alloc_size`](Self::get_max_alloc_size)
    /// and dimensions above [`get_max_dimension`](Self::get_max_dimension)
    /// are then accepted.
    #[must_use]
    pub const fn set_size_override(mut self, yes: bool) -> Self {
        self.size_override = yes;
        self
    }
    /// Set the capacity of the shared scratch buffer
    ///
    /// A value of zero makes every scratch request a fresh heap allocation
    #[must_use]
    pub const fn set_temp_buffer_size(mut self, size: usize) -> Self {
        self.temp_buffer_size = size;
        self
    }
}
