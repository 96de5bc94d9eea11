//! Hardware-independent core library for picolog-rs
//!
//! This crate contains all platform-agnostic logic for the picolog
//! sensor-logger device: the fixed-capacity sample store with its
//! mean-distance retention policy, the serial line framer, the SELECT
//! query compiler and executor, and the per-cycle command dispatcher.
//!
//! It is `no_std` with `extern crate alloc` so it compiles on both
//! embedded targets (RP2040) and desktop hosts (for the simulator and
//! tests). Peripherals are reached only through the traits in [`hal`];
//! the hardware layer and the simulator each supply their own
//! implementations.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod config;
pub mod device;
pub mod error;
pub mod framer;
pub mod hal;
pub mod metrics;
pub mod query;
pub mod storage;
