// src/hal_traits.rs

/// Abstraction for the clock/delay operations the ranging protocol needs.
///
/// The HC-SR04 protocol is timed at two resolutions: trigger throttling is
/// checked on a millisecond clock, while the trigger pulse and the echo pulse
/// width are measured on a microsecond clock. Both clocks must be monotonic
/// and count from an arbitrary epoch; only differences between samples are
/// ever used.
///
/// Note: the delay half of this trait could be replaced by directly requiring
/// `embedded_hal::delay::DelayNs`, but embedded-hal has no trait for reading
/// a monotonic clock, so the driver would still need a crate-local trait for
/// `now_ms`/`now_us`. Keeping all three together keeps the generic bounds
/// down to one extra parameter.
pub trait PingTimer {
    /// Current value of the monotonic millisecond clock.
    fn now_ms(&mut self) -> u64;

    /// Current value of the monotonic microsecond clock.
    fn now_us(&mut self) -> u64;

    /// Busy-wait for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);
}

// The trigger and echo lines are deliberately *not* wrapped in crate-local
// traits: `embedded_hal::digital::OutputPin` and `InputPin` already express
// exactly the capability set the driver needs (write-level, read-level), and
// direction configuration is encoded in the pin's type by the HAL.
