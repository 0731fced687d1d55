// src/timing.rs

// Timing constants for the HC-SR04 module. Values with a datasheet basis are
// noted; the rest are empirical defaults that `Pinger`'s setters can override
// per instance.

/// Overriding timeout ceiling in microseconds, shared by every instance.
///
/// No user-configured value can produce a longer wait than this, and it also
/// bounds the wait-until-quiet check. One second is far beyond any echo the
/// module can produce (its maximum range is ~4 m, i.e. ~24 ms round trip), so
/// hitting this ceiling always indicates a stuck line rather than a distant
/// obstacle.
pub const MAX_TIMEOUT_US: u64 = 1_000_000;

/// Width of the trigger pulse in microseconds.
///
/// The datasheet asks for at least 10 us for the module to register the
/// trigger; 11 gives a little margin on HALs whose delay rounds down.
pub const TRIGGER_PULSE_US: u32 = 11;

/// Default maximum sensing range in millimeters (the module's rated 4 m).
pub const DEFAULT_MAX_RANGE_MM: u16 = 4000;

/// Default minimum period between trigger pulses, in milliseconds.
///
/// The datasheet suggests a measurement cycle of at least 60 ms to prevent
/// the previous ping's echo from bleeding into the next measurement.
pub const DEFAULT_MIN_TRIGGER_PERIOD_MS: u64 = 60;

/// Default worst-case delay from the trigger edge to the module actually
/// emitting its ultrasonic burst, in microseconds. Empirical.
pub const DEFAULT_MAX_SENSOR_DELAY_US: u64 = 250;

/// Default speed of sound in meters per second (dry air, sea level, ~15 C).
pub const DEFAULT_SPEED_OF_SOUND_M_S: u32 = 340;

/// Delay inserted between samples of the millisecond clock while a
/// blocking-mode ping waits out the retrigger interval.
///
/// The interval is checked at millisecond resolution, so sampling more often
/// than this buys nothing.
pub const POLL_YIELD_US: u32 = 100;
