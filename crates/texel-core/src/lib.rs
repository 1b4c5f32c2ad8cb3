/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by all texel crates
//!
//! It currently contains
//!
//! - Hard limits on image geometry and allocation sizes
//! - Buffer options, the configurable counterpart of those limits
//! - A logging shim that either forwards to the `log` crate or compiles away
//!
//! # Features
//!  - `log`: Forward the logging macros to the [`log`](https://docs.rs/log) facade.
//!
//!  - `serde`: Enables serializing of the buffer options
//!
#![macro_use]

pub mod constants;
#[cfg(not(feature = "log"))]
pub mod log;
pub mod options;
pub mod serde;

#[cfg(feature = "log")]
pub use ::log;
