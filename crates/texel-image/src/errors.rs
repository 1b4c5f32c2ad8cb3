/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible when working with pixel buffers
use std::fmt::{Debug, Display, Formatter};

/// All errors a [`PixelBuffer`](crate::pixel_buffer::PixelBuffer) or
/// [`TempBufferPool`](crate::temp_buffer::TempBufferPool) operation can return
pub enum ImageErrors {
    /// A buffer of this many bytes could not be obtained, or the size
    /// is zero or above the allocation cap
    AllocationFailure(usize),
    /// Dimensions, area, size or channel limits were exceeded, or a
    /// rectangle does not fit inside the buffer
    BoundsViolation(String),
    /// The buffer holds no data or its last allocation failed
    BadBufferState(&'static str),
    /// The operation does not accept this many channels
    UnsupportedChannels(u8, &'static str),
    /// Two sizes that should be equal are not, `(expected, found)`
    DimensionsMisMatch(usize, usize),
    /// A width or height of zero was given
    ZeroDimension(&'static str)
}

impl Debug for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AllocationFailure(size) => {
                writeln!(f, "Could not allocate image data for requested size {size}")
            }
            Self::BoundsViolation(reason) => writeln!(f, "Bounds violation: {reason}"),
            Self::BadBufferState(operation) => {
                writeln!(f, "Invalid image buffer, {operation} aborted")
            }
            Self::UnsupportedChannels(channels, operation) => {
                writeln!(
                    f,
                    "Unsupported number of channels {channels} for the operation {operation}"
                )
            }
            Self::DimensionsMisMatch(expected, found) => {
                writeln!(
                    f,
                    "Dimensions mismatch, expected {expected} but found {found}"
                )
            }
            Self::ZeroDimension(param) => writeln!(f, "Zero found where not expected in {param}")
        }
    }
}

impl Display for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for ImageErrors {}

