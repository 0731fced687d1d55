// src/error.rs

/// Outcome code of the most recent [`ping()`](crate::Pinger::ping) attempt.
///
/// Every call to `ping()` stores exactly one of these; none of them is ever
/// escalated beyond the stored code and the call's return value, and the
/// driver never retries internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// No error: the last ping produced a valid echo within range.
    Ok,
    /// No error, but the trigger mode is [`NonBlocking`] and the minimum
    /// trigger period had not yet elapsed, so no pulse was emitted;
    /// [`range()`] still returns the previous error-free reading.
    ///
    /// [`NonBlocking`]: crate::TriggerMode::NonBlocking
    /// [`range()`]: crate::Pinger::range
    Substitute,
    /// The echo line was already high when `ping()` was called (and
    /// wait-until-quiet is off). No pulse was emitted.
    NotReady,
    /// No obstacle detected within the maximum range: either no echo started
    /// within the timeout, or the echo pulse was wider than the round-trip
    /// time of the maximum range.
    OutOfRange,
    /// The echo line stayed high for the whole overriding timeout while
    /// waiting for it to go quiet. Something is broken at the hardware level.
    HardFailure,
    /// Sentinel: no ping has succeeded yet, so there is no valid range.
    Invalid,
}

impl Status {
    /// Whether a range value is available after this outcome (the boolean
    /// `ping()` reports): true for [`Ok`](Status::Ok) and
    /// [`Substitute`](Status::Substitute).
    pub fn range_is_valid(self) -> bool {
        matches!(self, Status::Ok | Status::Substitute)
    }
}

/// A fault reported by one of the underlying embedded-hal pins.
///
/// These are distinct from [`Status`]: a `Status` describes what the sensor
/// module did, while an `Error` means the HAL could not even drive or read a
/// line. On memory-mapped GPIO both pin error types are usually
/// `core::convert::Infallible` and this enum is uninhabited.
#[derive(Debug, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<TE, EE>
where
    TE: core::fmt::Debug,
    EE: core::fmt::Debug,
{
    /// Failed to drive the trigger line.
    #[error("trigger pin error: {0:?}")]
    Trigger(TE),

    /// Failed to read the echo line.
    #[error("echo pin error: {0:?}")]
    Echo(EE),
}
