// src/pinger.rs

use crate::error::{Error, Status};
use crate::hal_traits::PingTimer;
use crate::timing;
use embedded_hal::digital::{InputPin, OutputPin};

/// What [`ping()`](Pinger::ping) should do when called again before the
/// minimum trigger period (see [`set_min_trigger_period`]) has elapsed.
///
/// [`set_min_trigger_period`]: Pinger::set_min_trigger_period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TriggerMode {
    /// Always trigger; the calling code is responsible for pacing pings
    /// sensibly.
    #[default]
    Always,
    /// Trigger only if the minimum trigger period has elapsed. If it has
    /// not, return immediately with [`Status::Substitute`]; a subsequent
    /// [`range()`](Pinger::range) returns the previous reading.
    NonBlocking,
    /// Trigger only once the minimum trigger period has elapsed, waiting it
    /// out first if necessary. [`range()`](Pinger::range) then returns a new
    /// value.
    Blocking,
}

/// Driver for one HC-SR04 ultrasonic range-finder module.
///
/// The module is wired through two digital lines: an output that triggers an
/// ultrasonic burst and an input whose high-pulse width encodes the round
/// trip time of the echo. One instance owns both pins plus a [`PingTimer`]
/// and drives the whole measurement protocol synchronously from
/// [`ping()`](Self::ping); there are no interrupts and no internal retries.
///
/// An instance is not meant to be shared: all of the last-measurement state
/// (`range`, `last_status`, `last_ping_time`) is updated unsynchronized, so
/// use it from at most one caller at a time.
#[derive(Debug)]
pub struct Pinger<TP, EP, T> {
    trigger: TP,
    echo: EP,
    timer: T,
    // last ping results
    last_range_mm: u16,
    last_status: Status,
    last_ping_time_ms: u64,
    // control parameters - a) not module-specific
    speed_of_sound: u32,
    trigger_mode: TriggerMode,
    wait_until_quiet: bool,
    // control parameters - b) module-specific defaults set in new()
    max_range_mm: u16,
    // round-trip time equivalent of max_range_mm, kept in sync by the setters
    max_range_us: u64,
    min_trigger_period_ms: u64,
    max_sensor_delay_us: u64,
}

impl<TP, EP, T> Pinger<TP, EP, T>
where
    TP: OutputPin,
    EP: InputPin,
    T: PingTimer,
{
    /// Binds the driver to its trigger and echo pins and applies the HC-SR04
    /// defaults (4000 mm max range, 60 ms minimum trigger period, 250 us
    /// sensor delay, 340 m/s speed of sound, [`TriggerMode::Always`]).
    ///
    /// The trigger line is driven low here; the last-ping timestamp is
    /// seeded one full trigger period in the past so the first `ping()` is
    /// never throttled.
    pub fn new(mut trigger: TP, echo: EP, mut timer: T) -> Result<Self, Error<TP::Error, EP::Error>> {
        trigger.set_low().map_err(Error::Trigger)?;
        let last_ping_time_ms = timer
            .now_ms()
            .saturating_sub(timing::DEFAULT_MIN_TRIGGER_PERIOD_MS);

        let mut pinger = Pinger {
            trigger,
            echo,
            timer,
            last_range_mm: 0,
            last_status: Status::Invalid,
            last_ping_time_ms,
            speed_of_sound: timing::DEFAULT_SPEED_OF_SOUND_M_S,
            trigger_mode: TriggerMode::Always,
            wait_until_quiet: false,
            max_range_mm: 0,
            max_range_us: 0,
            min_trigger_period_ms: timing::DEFAULT_MIN_TRIGGER_PERIOD_MS,
            max_sensor_delay_us: timing::DEFAULT_MAX_SENSOR_DELAY_US,
        };
        pinger.set_max_range(timing::DEFAULT_MAX_RANGE_MM);
        Ok(pinger)
    }

    /// Emits an ultrasonic pulse and waits for the echo.
    ///
    /// Behaviour is controlled by [`set_trigger_mode`], [`set_max_range`] and
    /// [`set_wait_until_quiet`]. Returns `Ok(true)` if [`range()`] is valid
    /// afterwards (including the [`Status::Substitute`] case, where it still
    /// holds the previous reading) and `Ok(false)` if not, in which case
    /// [`last_status()`] says why. `Err` is only produced by pin faults from
    /// the HAL, never by the sensor protocol itself.
    ///
    /// Every wait in here is a busy spin on the calling thread; in
    /// [`TriggerMode::Blocking`] that can mean most of a trigger period
    /// before the pulse even goes out.
    ///
    /// Known limitation: once an echo pulse has started, the wait for its
    /// falling edge is unbounded. A line that stays high there means the
    /// module itself is broken, and no timeout value would make the reading
    /// trustworthy.
    ///
    /// [`set_trigger_mode`]: Self::set_trigger_mode
    /// [`set_max_range`]: Self::set_max_range
    /// [`set_wait_until_quiet`]: Self::set_wait_until_quiet
    /// [`range()`]: Self::range
    /// [`last_status()`]: Self::last_status
    pub fn ping(&mut self) -> Result<bool, Error<TP::Error, EP::Error>> {
        // Unless the trigger mode is Always, check when the last ping was.
        match self.trigger_mode {
            TriggerMode::Blocking => {
                while self.timer.now_ms() - self.last_ping_time_ms < self.min_trigger_period_ms {
                    // interval has millisecond resolution, no point sampling harder
                    self.timer.delay_us(timing::POLL_YIELD_US);
                }
            }
            TriggerMode::NonBlocking => {
                if self.timer.now_ms() - self.last_ping_time_ms < self.min_trigger_period_ms {
                    self.last_status = Status::Substitute;
                    return Ok(true);
                }
            }
            TriggerMode::Always => {}
        }

        // The echo line must be low before triggering.
        if self.wait_until_quiet {
            let start = self.timer.now_us();
            while self.echo.is_high().map_err(Error::Echo)? {
                if self.timer.now_us() - start > timing::MAX_TIMEOUT_US {
                    self.last_status = Status::HardFailure;
                    return Ok(false);
                }
            }
        } else if self.echo.is_high().map_err(Error::Echo)? {
            self.last_status = Status::NotReady;
            return Ok(false);
        }

        // Throttling reference point, and the timestamp last_ping_time()
        // reports.
        self.last_ping_time_ms = self.timer.now_ms();

        // Tell the module to emit a burst. The datasheet wants the trigger
        // held high for at least 10 us.
        self.trigger.set_high().map_err(Error::Trigger)?;
        self.timer.delay_us(timing::TRIGGER_PULSE_US);
        self.trigger.set_low().map_err(Error::Trigger)?;

        // If no echo pulse has started by this deadline, the obstacle is out
        // of range or absent.
        let wait_us = (self.max_sensor_delay_us + self.max_range_us).min(timing::MAX_TIMEOUT_US);
        let deadline = self.timer.now_us() + wait_us;
        while self.echo.is_low().map_err(Error::Echo)? {
            if self.timer.now_us() > deadline {
                self.last_status = Status::OutOfRange;
                return Ok(false);
            }
        }

        // Echo started (give or take a poll); measure its width. See the
        // note above about the stuck-high case.
        let echo_start = self.timer.now_us();
        while self.echo.is_high().map_err(Error::Echo)? {}
        let echo_us = self.timer.now_us() - echo_start;

        // max_sensor_delay_us is an estimate, so an over-range echo may have
        // slipped past the deadline above.
        if echo_us > self.max_range_us {
            self.last_status = Status::OutOfRange;
            return Ok(false);
        }

        // us * (m/s) / 2000 = mm, halved for the round trip.
        self.last_range_mm = (echo_us * u64::from(self.speed_of_sound) / 2000) as u16;
        self.last_status = Status::Ok;
        Ok(true)
    }

    /// Range of the last detected object in millimeters.
    ///
    /// Only changes when a `ping()` returns `Ok(true)` with
    /// [`Status::Ok`]; until the first such ping it is not a real reading
    /// (check [`last_status()`](Self::last_status) for [`Status::Invalid`]).
    pub fn range(&self) -> u16 {
        self.last_range_mm
    }

    /// Outcome code of the most recent `ping()` call.
    pub fn last_status(&self) -> Status {
        self.last_status
    }

    /// Millisecond-clock timestamp taken just before the rising edge of the
    /// last trigger pulse.
    ///
    /// Not updated by pings that never emit a pulse
    /// ([`Status::Substitute`], [`Status::NotReady`],
    /// [`Status::HardFailure`]). This is the trigger time, not the time the
    /// sound bounced off the obstacle.
    pub fn last_ping_time(&self) -> u64 {
        self.last_ping_time_ms
    }

    /// Sets the maximum range in millimeters that should be sensed.
    ///
    /// If no echo starts within the equivalent round-trip time, or the echo
    /// pulse is longer than it, `ping()` reports [`Status::OutOfRange`].
    /// The round-trip equivalent is recomputed here from the current speed
    /// of sound.
    pub fn set_max_range(&mut self, max_range_mm: u16) {
        self.max_range_mm = max_range_mm;
        self.max_range_us = u64::from(max_range_mm) * 2000 / u64::from(self.speed_of_sound);
    }

    /// Sets the speed of sound, in meters per second, used to convert echo
    /// time to millimeters. Also recomputes the round-trip equivalent of the
    /// current maximum range so the two stay consistent.
    pub fn set_speed_of_sound(&mut self, speed_of_sound_m_s: u32) {
        self.speed_of_sound = speed_of_sound_m_s;
        self.max_range_us = u64::from(self.max_range_mm) * 2000 / u64::from(self.speed_of_sound);
    }

    /// Chooses how `ping()` behaves when called within the minimum trigger
    /// period of the previous pulse. Default is [`TriggerMode::Always`].
    pub fn set_trigger_mode(&mut self, trigger_mode: TriggerMode) {
        self.trigger_mode = trigger_mode;
    }

    /// Sets the minimum allowed period between trigger pulses, in
    /// milliseconds. See also [`set_trigger_mode`](Self::set_trigger_mode).
    pub fn set_min_trigger_period(&mut self, min_trigger_period_ms: u64) {
        self.min_trigger_period_ms = min_trigger_period_ms;
    }

    /// Chooses what to do when `ping()` finds the echo line already high:
    /// `false` (the default) reports [`Status::NotReady`] immediately,
    /// `true` waits for the line to go low first, up to the overriding
    /// timeout ceiling ([`Status::HardFailure`] beyond it).
    pub fn set_wait_until_quiet(&mut self, wait_until_quiet: bool) {
        self.wait_until_quiet = wait_until_quiet;
    }
}
