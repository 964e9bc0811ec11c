use crate::{
    Clock, Error, Level, RealClock, Result, Status, Task, TaskError, TaskResult, Time,
    FAILED_TO_LOCK,
};
use serde_derive::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// Bounds and window of a frequency check.
///
/// A rate inside `[min_frequency, max_frequency]` is OK. A rate outside of it,
/// but inside `[min_frequency / tolerance, max_frequency * tolerance]`, is a
/// warning. Anything further out is an error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencyStatusParam {
    pub min_frequency: f64,
    pub max_frequency: f64,
    pub tolerance: f64,
    pub window_size: usize,
}

impl Default for FrequencyStatusParam {
    #[inline]
    fn default() -> Self {
        Self {
            min_frequency: 0.0,
            max_frequency: std::f64::INFINITY,
            tolerance: 1.1,
            window_size: 5,
        }
    }
}

impl FrequencyStatusParam {
    pub fn validate(&self) -> Result<()> {
        if !self.min_frequency.is_finite() || self.min_frequency < 0.0 {
            return Err(Error::invalid_config(
                "min_frequency",
                format!("expected a finite, non-negative rate, got {}", self.min_frequency),
            ));
        }
        if self.max_frequency.is_nan() || self.max_frequency < self.min_frequency {
            return Err(Error::invalid_config(
                "max_frequency",
                format!(
                    "expected a rate of at least min_frequency ({}), got {}",
                    self.min_frequency, self.max_frequency
                ),
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance < 1.0 {
            return Err(Error::invalid_config(
                "tolerance",
                format!("expected a finite factor of at least 1, got {}", self.tolerance),
            ));
        }
        if self.window_size <= 1 {
            return Err(Error::invalid_config(
                "window_size",
                format!("expected at least 2 samples, got {}", self.window_size),
            ));
        }
        Ok(())
    }
}

/// The structure for building a frequency status task.
///
/// Use `FrequencyStatus::builder()` to create an instance of this structure.
pub struct FrequencyStatusBuilder<'a> {
    param: FrequencyStatusParam,
    name: &'a str,
    clock: Option<Arc<dyn Clock>>,
}

impl<'a> FrequencyStatusBuilder<'a> {
    #[inline]
    fn new() -> Self {
        Self {
            param: FrequencyStatusParam::default(),
            name: "Frequency Status",
            clock: None,
        }
    }

    /// Defaults to `0`, which disables the lower bound.
    #[inline]
    pub fn min_frequency(&mut self, value: f64) -> &mut Self {
        self.param.min_frequency = value;
        self
    }

    /// Defaults to infinity, which disables the upper bound.
    #[inline]
    pub fn max_frequency(&mut self, value: f64) -> &mut Self {
        self.param.max_frequency = value;
        self
    }

    /// Defaults to `1.1`.
    #[inline]
    pub fn tolerance(&mut self, value: f64) -> &mut Self {
        self.param.tolerance = value;
        self
    }

    /// Number of most recent events the rate is computed over. Defaults to `5`.
    #[inline]
    pub fn window_size(&mut self, value: usize) -> &mut Self {
        self.param.window_size = value;
        self
    }

    /// Replaces all four bounds at once.
    #[inline]
    pub fn param(&mut self, param: FrequencyStatusParam) -> &mut Self {
        self.param = param;
        self
    }

    /// Defaults to "Frequency Status".
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

    #[inline]
    pub fn build(&self) -> Result<FrequencyStatus> {
        let clock = self
            .clock
            .clone()
            .unwrap_or_else(|| Arc::new(RealClock::default()));
        FrequencyStatus::new(self.param.clone(), self.name.into(), clock)
    }
}

/// Diagnostic task monitoring the rate of a periodic event.
///
/// Call [`tick`](FrequencyStatus::tick) once per event. The rate is estimated
/// over the last `window_size` events.
pub struct FrequencyStatus {
    param: FrequencyStatusParam,
    min_tolerated_frequency: f64,
    max_tolerated_frequency: f64,
    name: String,
    clock: Arc<dyn Clock>,
    tracker: Mutex<Tracker>,
}

struct Tracker {
    count: usize,
    last_run_count: usize,
    history: VecDeque<Time>,
}

impl FrequencyStatus {
    #[inline]
    pub fn builder<'a>() -> FrequencyStatusBuilder<'a> {
        FrequencyStatusBuilder::new()
    }

    pub fn new(param: FrequencyStatusParam, name: String, clock: Arc<dyn Clock>) -> Result<Self> {
        param.validate()?;

        let tracker = Mutex::new(Tracker {
            count: 0,
            last_run_count: 0,
            history: VecDeque::with_capacity(param.window_size),
        });

        Ok(Self {
            min_tolerated_frequency: param.min_frequency / param.tolerance,
            max_tolerated_frequency: param.max_frequency * param.tolerance,
            param,
            name,
            clock,
            tracker,
        })
    }

    #[inline]
    pub fn param(&self) -> &FrequencyStatusParam {
        &self.param
    }

    /// Signals an event at the current clock time.
    #[inline]
    pub fn tick(&self) {
        self.tick_at(self.clock.now())
    }

    /// Signals an event that happened at `timestamp`.
    pub fn tick_at(&self, timestamp: Time) {
        let mut tracker = self.tracker.lock().unwrap_or_else(PoisonError::into_inner);
        if tracker.history.len() >= self.param.window_size {
            tracker.history.pop_front();
        }
        tracker.history.push_back(timestamp);
        tracker.count += 1;
    }

    /// Forgets the recorded window. The event count since startup is kept.
    pub fn clear(&self) {
        let mut tracker = self.tracker.lock().unwrap_or_else(PoisonError::into_inner);
        tracker.history.clear();
        tracker.last_run_count = tracker.count;
    }

    fn frequency_to_summary(&self, frequency: f64) -> (Level, &'static str) {
        match frequency {
            v if v < self.min_tolerated_frequency => (Level::Error, "Frequency too low."),
            v if v > self.max_tolerated_frequency => (Level::Error, "Frequency too high."),
            v if v < self.param.min_frequency => (Level::Warn, "Frequency slightly too low."),
            v if v > self.param.max_frequency => (Level::Warn, "Frequency slightly too high."),
            _ => (Level::Ok, "Desired frequency met"),
        }
    }

    #[allow(clippy::float_cmp)]
    fn add_frequency_info(&self, status: &mut Status) {
        if self.param.max_frequency == self.param.min_frequency {
            status.add("Target frequency (Hz)", self.param.min_frequency)
        }
        if self.param.min_frequency > 0.0 {
            status.add(
                "Minimum acceptable frequency (Hz)",
                self.min_tolerated_frequency,
            )
        }
        if self.param.max_frequency.is_finite() {
            status.add(
                "Maximum acceptable frequency (Hz)",
                self.max_tolerated_frequency,
            )
        }
    }
}

impl Task for FrequencyStatus {
    #[inline]
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, status: &mut Status) -> TaskResult {
        let mut tracker = self
            .tracker
            .lock()
            .map_err(|_| TaskError::new(FAILED_TO_LOCK))?;

        let events = tracker.count;
        let events_since_update = events - tracker.last_run_count;
        tracker.last_run_count = events;

        let window = match (tracker.history.iter().min(), tracker.history.iter().max()) {
            (Some(&oldest), Some(&newest)) if tracker.history.len() >= 2 => {
                Some((tracker.history.len(), (newest - oldest).seconds()))
            }
            _ => None,
        };

        drop(tracker);

        let frequency = match window {
            Some((samples, duration)) => {
                let frequency = (samples - 1) as f64 / duration;
                let (level, message) = self.frequency_to_summary(frequency);
                status.set_summary(level, message);
                status.add("Events in window", samples);
                status.add("Duration of window (s)", duration);
                frequency
            }
            None => {
                status.set_summary(Level::Warn, "Not enough data since startup");
                0.0
            }
        };

        status.add("Events since startup", events);
        status.add("Events since last update", events_since_update);
        status.add("Actual frequency (Hz)", frequency);

        self.add_frequency_info(status);
        Ok(())
    }
}
