/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! No-op logging macros used when the `log` feature is disabled
//!
//! They mirror the names exported by the `log` crate so call sites
//! can always write `use texel_core::log::warn;`

// Exported macros always land in the crate root, re-export them
// under this module to keep the `log` paths working.
pub use crate::{__info as info, __warn as warn};

#[doc(hidden)]
#[macro_export]
macro_rules! __warn {
    ($($arg:tt)+) => {{
        let _ = format_args!($($arg)+);
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __info {
    ($($arg:tt)+) => {{
        let _ = format_args!($($arg)+);
    }};
}
