//! Validated timer period.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IntervalError {
    #[error("timer interval must be non-zero")]
    Zero,
    #[error("timer interval of {secs}s does not fit the platform timer")]
    TooLarge { secs: u64 },
}

/// A non-zero period for a repeating timer.
///
/// A zero `itimerspec` disarms a timerfd instead of arming it, so zero is
/// unrepresentable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval(Duration);

impl Interval {
    /// Upper bound on the seconds part; keeps `tv_sec` inside a 32-bit `time_t`.
    pub const MAX_SECS: u64 = i32::MAX as u64;

    /// Cadence of the popcount task.
    pub const FAST_TICK: Interval = Interval(Duration::from_millis(10));
    /// Cadence of the leading-zeros task.
    pub const SLOW_TICK: Interval = Interval(Duration::from_millis(100));

    pub fn new(period: Duration) -> Result<Self, IntervalError> {
        if period.is_zero() {
            return Err(IntervalError::Zero);
        }
        if period.as_secs() > Self::MAX_SECS {
            return Err(IntervalError::TooLarge {
                secs: period.as_secs(),
            });
        }
        Ok(Self(period))
    }

    pub fn from_millis(ms: u64) -> Result<Self, IntervalError> {
        Self::new(Duration::from_millis(ms))
    }

    #[must_use]
    pub const fn as_duration(self) -> Duration {
        self.0
    }

    /// Whole seconds of the period.
    #[must_use]
    pub const fn secs(self) -> u64 {
        self.0.as_secs()
    }

    /// Sub-second remainder in nanoseconds, always below 1_000_000_000.
    #[must_use]
    pub const fn subsec_nanos(self) -> u32 {
        self.0.subsec_nanos()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0.as_millis())
    }
}

impl TryFrom<Duration> for Interval {
    type Error = IntervalError;

    fn try_from(value: Duration) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
