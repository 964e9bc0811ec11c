use crate::{
    Clock, Duration, Error, Level, RealClock, Result, Status, Task, TaskError, TaskResult, Time,
    FAILED_TO_LOCK,
};
use std::sync::{Arc, Mutex, PoisonError};

/// The structure for building a timestamp status task.
///
/// Use `TimestampStatus::builder()` to create an instance of this structure.
pub struct TimestampStatusBuilder<'a> {
    min_delay: Duration,
    max_delay: Duration,
    name: &'a str,
    clock: Option<Arc<dyn Clock>>,
}

impl<'a> TimestampStatusBuilder<'a> {
    #[inline]
    fn new() -> Self {
        Self {
            min_delay: Duration::from_seconds(-1),
            max_delay: Duration::from_seconds(5),
            name: "Timestamp Status",
            clock: None,
        }
    }

    /// Smallest accepted delay between a stamp and the clock.
    ///
    /// Defaults to `-1` second. Negative delays are stamps from the future.
    #[inline]
    pub fn min_delay(&mut self, value: Duration) -> &mut Self {
        self.min_delay = value;
        self
    }

    /// Defaults to `5` seconds.
    #[inline]
    pub fn max_delay(&mut self, value: Duration) -> &mut Self {
        self.max_delay = value;
        self
    }

    /// Defaults to "Timestamp Status".
    #[inline]
    pub fn name(&mut self, name: &'a str) -> &mut Self {
        self.name = name;
        self
    }

    /// Defaults to the system clock.
    #[inline]
    pub fn clock(&mut self, clock: Arc<dyn Clock>) -> &mut Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(&self) -> Result<TimestampStatus> {
        let clock = self
            .clock
            .clone()
            .unwrap_or_else(|| Arc::new(RealClock::default()));
        TimestampStatus::new(self.min_delay, self.max_delay, self.name.into(), clock)
    }
}

/// Diagnostic task checking how old event stamps are when they arrive.
///
/// Delays seen since the previous run are compared against the accepted
/// range. Violations only affect the summary of the run that sees them, while
/// the per-kind tallies keep growing for the lifetime of the task.
pub struct TimestampStatus {
    min_delay: Duration,
    max_delay: Duration,
    name: String,
    clock: Arc<dyn Clock>,
    tracker: Mutex<Tracker>,
}

#[derive(Default)]
struct Tracker {
    /// Earliest and latest delay since the last run.
    delays: Option<(Duration, Duration)>,
    zero_seen: bool,
    early_runs: usize,
    late_runs: usize,
    zero_runs: usize,
}

impl TimestampStatus {
    #[inline]
    pub fn builder<'a>() -> TimestampStatusBuilder<'a> {
        TimestampStatusBuilder::new()
    }

    pub fn new(
        min_delay: Duration,
        max_delay: Duration,
        name: String,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        if min_delay > max_delay {
            return Err(Error::invalid_config(
                "max_delay",
                format!(
                    "expected at least min_delay ({}s), got {}s",
                    min_delay.seconds(),
                    max_delay.seconds()
                ),
            ));
        }
        Ok(Self {
            min_delay,
            max_delay,
            name,
            clock,
            tracker: Mutex::new(Tracker::default()),
        })
    }

    /// Records an event carrying `stamp`. A zero stamp counts as unset.
    pub fn tick(&self, stamp: Time) {
        let now = self.clock.now();
        let mut tracker = self.tracker.lock().unwrap_or_else(PoisonError::into_inner);
        if stamp.is_zero() {
            tracker.zero_seen = true;
            return;
        }
        let delay = now - stamp;
        tracker.delays = Some(match tracker.delays {
            Some((earliest, latest)) => (earliest.min(delay), latest.max(delay)),
            None => (delay, delay),
        });
    }
}

impl Task for TimestampStatus {
    #[inline]
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, status: &mut Status) -> TaskResult {
        let mut tracker = self
            .tracker
            .lock()
            .map_err(|_| TaskError::new(FAILED_TO_LOCK))?;
        let delays = tracker.delays.take();
        let zero_seen = std::mem::replace(&mut tracker.zero_seen, false);

        if delays.is_none() && !zero_seen {
            status.set_summary(Level::Warn, "No data since last update.");
        } else {
            status.set_summary(Level::Ok, "Timestamps are reasonable.");
        }
        if let Some((earliest, latest)) = delays {
            if earliest < self.min_delay {
                status.set_summary(Level::Error, "Timestamps too far in future seen.");
                tracker.early_runs += 1;
            }
            if latest > self.max_delay {
                status.set_summary(Level::Error, "Timestamps too far in past seen.");
                tracker.late_runs += 1;
            }
        }
        if zero_seen {
            status.set_summary(Level::Error, "Zero timestamp seen.");
            tracker.zero_runs += 1;
        }

        let (earliest, latest) = delays.unwrap_or_default();
        status.add("Earliest delay (s)", earliest.seconds());
        status.add("Latest delay (s)", latest.seconds());
        status.add("Minimum acceptable delay (s)", self.min_delay.seconds());
        status.add("Maximum acceptable delay (s)", self.max_delay.seconds());
        status.add("Updates with late stamps", tracker.late_runs);
        status.add("Updates with early stamps", tracker.early_runs);
        status.add("Updates with zero stamps", tracker.zero_runs);
        Ok(())
    }
}
