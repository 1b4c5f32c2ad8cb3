/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Power of two sizing for texture uploads
//!
//! These only compute dimensions, scaling is done by the caller.
use texel_core::constants::MIN_IMAGE_SIZE;

/// Ratio above which [`biased_dimension`] rounds up
///
/// Unbiased rounding would be 1.5, this favours the smaller size.
pub const BIAS_THRESHOLD: f32 = 1.75;

/// Smallest power of two not below `dimension`, bounded to
/// `[MIN_IMAGE_SIZE, max_dim]`
///
/// `max_dim` is expected to be a power of two.
#[must_use]
pub fn expand_dimension(dimension: u32, max_dim: u32) -> u32 {
    let mut new_dim = MIN_IMAGE_SIZE;

    while new_dim < dimension && new_dim < max_dim {
        new_dim <<= 1;
    }
    new_dim
}

/// Largest power of two not above `dimension`, bounded to
/// `[MIN_IMAGE_SIZE, max_dim]`
#[must_use]
pub fn contract_dimension(dimension: u32, max_dim: u32) -> u32 {
    let mut new_dim = max_dim;

    while new_dim > dimension && new_dim > MIN_IMAGE_SIZE {
        new_dim >>= 1;
    }
    new_dim
}

/// Power of two closest to `dimension`, rounding down unless `dimension`
/// exceeds the lower candidate by more than [`BIAS_THRESHOLD`]
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn biased_dimension(dimension: u32, max_dim: u32) -> u32 {
    let mut larger = max_dim;
    let mut smaller = max_dim;

    while smaller > dimension && smaller > MIN_IMAGE_SIZE {
        larger = smaller;
        smaller >>= 1;
    }

    if smaller > 0 && dimension as f32 / smaller as f32 > BIAS_THRESHOLD {
        larger
    } else {
        smaller
    }
}

#[cfg(test)]
mod tests {
    use crate::power_of_two::{biased_dimension, contract_dimension, expand_dimension};

    #[test]
    fn expand_rounds_up() {
        assert_eq!(expand_dimension(1, 2048), 4);
        assert_eq!(expand_dimension(4, 2048), 4);
        assert_eq!(expand_dimension(5, 2048), 8);
        assert_eq!(expand_dimension(300, 2048), 512);
        assert_eq!(expand_dimension(4000, 2048), 2048);
    }

    #[test]
    fn contract_rounds_down() {
        assert_eq!(contract_dimension(1, 2048), 4);
        assert_eq!(contract_dimension(300, 2048), 256);
        assert_eq!(contract_dimension(512, 2048), 512);
        assert_eq!(contract_dimension(4000, 2048), 2048);
    }

    #[test]
    fn biased_prefers_smaller() {
        // 300/256 is below the threshold
        assert_eq!(biased_dimension(300, 2048), 256);
        // 480/256 is above it
        assert_eq!(biased_dimension(480, 2048), 512);
        assert_eq!(biased_dimension(256, 2048), 256);
        assert_eq!(biased_dimension(2, 2048), 4);
        assert_eq!(biased_dimension(4000, 2048), 2048);
    }

    #[test]
    fn results_stay_in_range() {
        for dimension in 1..3000 {
            for result in [
                expand_dimension(dimension, 1024),
                contract_dimension(dimension, 1024),
                biased_dimension(dimension, 1024)
            ] {
                assert!(result.is_power_of_two());
                assert!((4..=1024).contains(&result), "{dimension} gave {result}");
            }
        }
    }
}
