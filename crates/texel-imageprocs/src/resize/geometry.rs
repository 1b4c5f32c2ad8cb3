/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Per axis sampling tables
//!
//! For every destination pixel along one axis we precompute which source
//! pixel it starts from and how much that pixel contributes.
//!
//! All positions are in 16.16 fixed point.
//!
//! # Weight encoding
//! - Scaling up (or keeping the size): the weight is the 8 bit fractional
//!   distance to the next source pixel, `0` meaning no interpolation is needed.
//! - Scaling down: the low 16 bits hold the 14 bit weight of the first source
//!   pixel and the high 16 bits hold the box span, the weight given to every
//!   following whole source pixel.
//!
//! ```text
//!  31            16 15             0
//! ┌────────────────┬────────────────┐
//! │      span      │  first weight  │   (scaling down)
//! └────────────────┴────────────────┘
//! ```

/// Sum of all box filter weights for one destination pixel
pub(crate) const BOX_TOTAL: i32 = 1 << 14;

/// Sampling table for one axis
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScaleGeometry {
    src_size:     u32,
    dst_size:     u32,
    scaling_up:   bool,
    source_index: Vec<i32>,
    weight:       Vec<i32>
}

impl ScaleGeometry {
    /// Build the sampling table for an axis going from `src_size` pixels
    /// to `dst_size` pixels
    ///
    /// # Panics
    /// - `dst_size` or `src_size` is zero
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(src_size: u32, dst_size: u32) -> ScaleGeometry {
        assert!(dst_size > 0, "Cannot scale an axis to zero pixels");
        assert!(src_size > 0, "Cannot scale an axis with zero pixels");

        let scaling_up = dst_size >= src_size;

        let src = i64::from(src_size);
        let dst = i64::from(dst_size);
        let increment = (src << 16) / dst;
        let start = if scaling_up {
            0x8000 * src / dst - 0x8000
        } else {
            0
        };

        let mut source_index = vec![0; dst_size as usize + 1];
        let mut val = start;

        for index in source_index.iter_mut().take(dst_size as usize) {
            *index = (val >> 16).max(0) as i32;
            val += increment;
        }

        let mut weight = vec![0; dst_size as usize];

        if scaling_up {
            let mut val = start;

            for w in &mut weight {
                // negative positions wrap to huge unsigned values and
                // clamp just like positions past the last pixel
                let pos = (val >> 16) as u32;

                if pos >= src_size - 1 {
                    *w = 0;
                } else {
                    *w = ((val >> 8) & 0xff) as i32;
                }
                val += increment;
            }
        } else {
            let span = ((dst << 14) / src + 1) as i32;
            // span goes to the upper half of the packed weight
            debug_assert!(span <= BOX_TOTAL + 1);

            let mut val: i64 = 0;

            for w in &mut weight {
                let ap = ((0x100 - ((val >> 8) & 0xff) as i32) * span) >> 8;
                *w = ap | (span << 16);
                val += increment;
            }
        }

        ScaleGeometry {
            src_size,
            dst_size,
            scaling_up,
            source_index,
            weight
        }
    }

    pub const fn src_size(&self) -> u32 {
        self.src_size
    }

    pub const fn dst_size(&self) -> u32 {
        self.dst_size
    }

    /// Return true if this axis keeps or increases its size
    pub const fn is_scaling_up(&self) -> bool {
        self.scaling_up
    }

    /// Source pixel for each destination pixel
    ///
    /// The table has `dst_size + 1` entries, the trailing entry is padding
    /// and always zero.
    pub fn source_indices(&self) -> &[i32] {
        &self.source_index
    }

    /// Raw packed weights, see the module docs for the encoding
    pub fn weights(&self) -> &[i32] {
        &self.weight
    }

    /// Source pixel the destination pixel `i` starts from
    #[inline(always)]
    #[allow(clippy::cast_sign_loss)]
    pub fn source(&self, i: usize) -> usize {
        self.source_index[i] as usize
    }

    /// Bilinear weight (0..=255) of destination pixel `i` when scaling up
    #[inline(always)]
    pub fn bilinear_weight(&self, i: usize) -> i32 {
        self.weight[i]
    }

    /// Weight of the first source pixel of destination pixel `i` when
    /// scaling down
    #[inline(always)]
    pub fn box_weight(&self, i: usize) -> i32 {
        self.weight[i] & 0xffff
    }

    /// Weight of every following whole source pixel of destination pixel `i`
    /// when scaling down
    #[inline(always)]
    pub fn box_span(&self, i: usize) -> i32 {
        self.weight[i] >> 16
    }
}

#[cfg(test)]
mod tests {
    use crate::resize::geometry::{ScaleGeometry, BOX_TOTAL};

    #[test]
    fn source_index_within_source() {
        for src in 1..64 {
            for dst in 1..64 {
                let geometry = ScaleGeometry::new(src, dst);
                let indices = geometry.source_indices();

                assert_eq!(indices.len(), dst as usize + 1);

                for index in &indices[..dst as usize] {
                    assert!(
                        (0..src as i32).contains(index),
                        "index {index} out of range for {src}->{dst}"
                    );
                }
            }
        }
    }

    #[test]
    fn same_size_has_no_interpolation() {
        let geometry = ScaleGeometry::new(17, 17);

        assert!(geometry.is_scaling_up());
        assert!(geometry.weights().iter().all(|x| *x == 0));

        for i in 0..17 {
            assert_eq!(geometry.source(i), i);
        }
    }

    #[test]
    fn upscale_weights_are_fractions() {
        let geometry = ScaleGeometry::new(2, 4);

        // val starts at 0x8000*2/4 - 0x8000 = -0x4000 and moves by 0x8000
        assert_eq!(geometry.source_indices(), &[0, 0, 0, 1, 0]);
        // the first pixel sits left of the first source pixel, the last one
        // past the last source pixel, both clamp
        assert_eq!(geometry.weights(), &[0, 64, 192, 0]);
    }

    #[test]
    fn downscale_weights_are_packed() {
        let geometry = ScaleGeometry::new(4, 2);

        assert!(!geometry.is_scaling_up());
        assert_eq!(&geometry.source_indices()[..2], &[0, 2]);

        for i in 0..2 {
            let span = geometry.box_span(i);
            assert_eq!(span, (2 << 14) / 4 + 1);
            assert_eq!(geometry.box_weight(i), span);
            assert!(geometry.box_weight(i) <= BOX_TOTAL);
        }
    }

    #[test]
    fn downscale_span_fits_in_sixteen_bits() {
        let geometry = ScaleGeometry::new(2048, 2047);

        for i in 0..2047 {
            assert!(geometry.box_span(i) <= BOX_TOTAL + 1);
            assert!(geometry.box_span(i) > 0);
        }
    }

    #[test]
    #[should_panic]
    fn zero_destination_panics() {
        let _ = ScaleGeometry::new(10, 0);
    }
}
