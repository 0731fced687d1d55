// src/lib.rs

//! A fairly minimal driver for ultrasonic range-finder modules.
//!
//! Currently this supports the HC-SR04; the protocol layer should adapt to
//! similar trigger/echo modules without much work. "Minimal" also means no
//! interrupts: [`Pinger::ping`] runs the whole measurement as synchronous
//! busy-wait polling, which keeps the driver portable to anything that can
//! provide two embedded-hal pins and a [`PingTimer`]. Filtering and
//! aggregation of readings are left to other components.

#![no_std]

pub mod error;
pub mod hal_traits;
pub mod pinger;
pub mod timing;

// Re-export key types for convenience
pub use error::{Error, Status};
pub use hal_traits::PingTimer;
pub use pinger::{Pinger, TriggerMode};
