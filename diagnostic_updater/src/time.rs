use serde_derive::{Deserialize, Serialize};
use std::cmp;
use std::convert::TryFrom;
use std::ops;
use std::time;

const BILLION: i64 = 1_000_000_000;

/// Point in time, as seconds and nanoseconds since the UNIX epoch.
#[derive(Copy, Clone, Default, Serialize, Deserialize, Debug, Eq)]
pub struct Time {
    pub sec: u32,
    pub nsec: u32,
}

impl Time {
    #[inline]
    pub fn new() -> Time {
        Self::default()
    }

    /// Saturates to the epoch for negative inputs and to the latest
    /// representable time for inputs past it.
    pub fn from_nanos(t: i64) -> Time {
        if t <= 0 {
            return Time::default();
        }
        match u32::try_from(t / BILLION) {
            Ok(sec) => Time {
                sec,
                nsec: (t % BILLION) as u32,
            },
            Err(_) => Time {
                sec: u32::MAX,
                nsec: (BILLION - 1) as u32,
            },
        }
    }

    #[inline]
    pub fn from_seconds(t: f64) -> Time {
        Self::from_nanos((t * BILLION as f64).round() as i64)
    }

    #[inline]
    pub fn nanos(self) -> i64 {
        i64::from(self.sec) * BILLION + i64::from(self.nsec)
    }

    #[inline]
    pub fn seconds(self) -> f64 {
        f64::from(self.sec) + f64::from(self.nsec) / BILLION as f64
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.nanos() == 0
    }
}

impl cmp::PartialEq for Time {
    fn eq(&self, other: &Self) -> bool {
        self.nanos() == other.nanos()
    }
}

impl cmp::PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl cmp::Ord for Time {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.nanos().cmp(&other.nanos())
    }
}

/// Signed span between two [`Time`] values.
#[derive(Copy, Clone, Default, Serialize, Deserialize, Debug, Eq)]
pub struct Duration {
    pub sec: i32,
    pub nsec: i32,
}

impl Duration {
    pub const MAX: Duration = Duration {
        sec: i32::MAX,
        nsec: (BILLION - 1) as i32,
    };
    pub const MIN: Duration = Duration {
        sec: i32::MIN,
        nsec: -(BILLION - 1) as i32,
    };

    #[inline]
    pub fn new() -> Duration {
        Self::default()
    }

    /// Returns `None` when the span does not fit in `i32` seconds.
    pub fn try_from_nanos(t: i64) -> Option<Duration> {
        let sec = i32::try_from(t / BILLION).ok()?;
        Some(Duration {
            sec,
            nsec: (t % BILLION) as i32,
        })
    }

    /// Saturates at [`Duration::MIN`] and [`Duration::MAX`].
    pub fn from_nanos(t: i64) -> Duration {
        Self::try_from_nanos(t).unwrap_or(if t < 0 { Self::MIN } else { Self::MAX })
    }

    /// Returns `None` for non-finite inputs and spans that do not fit.
    pub fn try_from_secs_f64(t: f64) -> Option<Duration> {
        let nanos = (t * BILLION as f64).round();
        if !nanos.is_finite() || nanos.abs() >= i64::MAX as f64 {
            return None;
        }
        Self::try_from_nanos(nanos as i64)
    }

    #[inline]
    pub fn from_seconds(sec: i32) -> Duration {
        Duration { sec, nsec: 0 }
    }

    #[inline]
    pub fn from_secs_f64(t: f64) -> Duration {
        Self::from_nanos((t * BILLION as f64).round() as i64)
    }

    #[inline]
    pub fn nanos(self) -> i64 {
        i64::from(self.sec) * BILLION + i64::from(self.nsec)
    }

    #[inline]
    pub fn seconds(self) -> f64 {
        f64::from(self.sec) + f64::from(self.nsec) / BILLION as f64
    }
}

impl cmp::PartialEq for Duration {
    fn eq(&self, other: &Self) -> bool {
        self.nanos() == other.nanos()
    }
}

impl cmp::PartialOrd for Duration {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl cmp::Ord for Duration {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.nanos().cmp(&other.nanos())
    }
}

impl ops::Add<Duration> for Time {
    type Output = Time;
    fn add(self, rhs: Duration) -> Self::Output {
        Time::from_nanos(self.nanos() + rhs.nanos())
    }
}

impl ops::Sub<Time> for Time {
    type Output = Duration;
    fn sub(self, rhs: Time) -> Self::Output {
        Duration::from_nanos(self.nanos() - rhs.nanos())
    }
}

impl From<time::Duration> for Duration {
    fn from(std_duration: time::Duration) -> Self {
        match i32::try_from(std_duration.as_secs()) {
            Ok(sec) => Duration {
                sec,
                nsec: std_duration.subsec_nanos() as i32,
            },
            Err(_) => Duration::MAX,
        }
    }
}

impl From<Duration> for time::Duration {
    fn from(duration: Duration) -> Self {
        if duration.nanos() <= 0 {
            return time::Duration::default();
        }
        time::Duration::from_nanos(duration.nanos() as u64)
    }
}
