use crate::time::{Duration, Time};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::sleep;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of timestamps for frequency windows, delays and aggregate headers.
pub trait Clock: Send + Sync {
    fn now(&self) -> Time;

    fn sleep(&self, d: Duration);

    #[inline]
    fn wait_until(&self, t: Time) {
        self.sleep(t - self.now());
    }
}

#[derive(Clone, Debug, Default)]
pub struct RealClock {}

impl Clock for RealClock {
    #[inline]
    fn now(&self) -> Time {
        // A system clock set before 1970 reads as the epoch.
        let time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Time {
            sec: time.as_secs() as u32,
            nsec: time.subsec_nanos(),
        }
    }

    #[inline]
    fn sleep(&self, d: Duration) {
        if d <= Duration::default() {
            return;
        }
        sleep(d.into());
    }
}

/// Clock that only moves when told to.
///
/// Sleeping advances the clock instead of blocking, which keeps loops driven by
/// a [`Rate`] deterministic in tests and replays.
#[derive(Debug, Default)]
pub struct SimulatedClock {
    current: Mutex<Time>,
}

impl SimulatedClock {
    pub fn new(start: Time) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    pub fn set(&self, time: Time) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = time;
    }

    pub fn advance(&self, d: Duration) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        *current = *current + d;
    }

    #[inline]
    pub fn advance_secs(&self, seconds: f64) {
        self.advance(Duration::from_secs_f64(seconds))
    }
}

impl Clock for SimulatedClock {
    #[inline]
    fn now(&self) -> Time {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    fn sleep(&self, d: Duration) {
        if d > Duration::default() {
            self.advance(d);
        }
    }
}

/// Keeps a loop on a fixed cadence.
pub struct Rate {
    clock: Arc<dyn Clock>,
    next: Time,
    delay: Duration,
}

impl Rate {
    pub fn new(clock: Arc<dyn Clock>, rate: f64) -> Rate {
        let start = clock.now();
        Rate {
            clock,
            next: start,
            delay: Duration::from_secs_f64(1.0 / rate),
        }
    }

    pub fn sleep(&mut self) {
        self.next = self.next + self.delay;
        self.clock.wait_until(self.next);
    }
}
