use crate::{
    CompositeTask, FrequencyStatus, Result, Status, Task, TaskResult, Time, TimestampStatus,
    Updater,
};
use std::sync::Arc;

/// Health of a single event source, such as a published topic.
///
/// Bundles a [`FrequencyStatus`], an optional [`TimestampStatus`] and any
/// extra tasks into one composite status. Call [`tick`](Self::tick) (or
/// [`tick_stamped`](Self::tick_stamped) for stamped events) once per event.
pub struct TopicDiagnostic {
    frequency: Arc<FrequencyStatus>,
    timestamp: Option<Arc<TimestampStatus>>,
    composite: CompositeTask,
}

impl TopicDiagnostic {
    /// Creates a diagnostic for events without a stamp.
    pub fn new(name: &str, frequency: FrequencyStatus) -> Self {
        let frequency = Arc::new(frequency);
        let mut composite = CompositeTask::new(name);
        composite.add_shared(frequency.clone());
        Self {
            frequency,
            timestamp: None,
            composite,
        }
    }

    /// Creates a diagnostic for stamped events, also checking stamp delays.
    pub fn with_timestamp(
        name: &str,
        frequency: FrequencyStatus,
        timestamp: TimestampStatus,
    ) -> Self {
        let mut topic = Self::new(name, frequency);
        let timestamp = Arc::new(timestamp);
        topic.composite.add_shared(timestamp.clone());
        topic.timestamp = Some(timestamp);
        topic
    }

    /// Adds another task whose result is merged into this diagnostic.
    pub fn add_task(&mut self, task: impl Task + 'static) {
        self.composite.add_task(task)
    }

    /// Registers with `updater` and returns a handle for ticking.
    pub fn register(self, updater: &Updater) -> Result<Arc<Self>> {
        let topic = Arc::new(self);
        updater.add_task(topic.clone())?;
        Ok(topic)
    }

    #[inline]
    pub fn frequency(&self) -> &FrequencyStatus {
        &self.frequency
    }

    /// Signals an event at the current clock time.
    #[inline]
    pub fn tick(&self) {
        self.frequency.tick()
    }

    /// Signals an event carrying `stamp`.
    ///
    /// The stamp is only checked when a timestamp status was configured.
    pub fn tick_stamped(&self, stamp: Time) {
        self.frequency.tick();
        if let Some(timestamp) = &self.timestamp {
            timestamp.tick(stamp);
        }
    }

    #[inline]
    pub fn clear(&self) {
        self.frequency.clear()
    }
}

impl Task for TopicDiagnostic {
    #[inline]
    fn name(&self) -> &str {
        self.composite.name()
    }

    #[inline]
    fn run(&self, status: &mut Status) -> TaskResult {
        self.composite.run(status)
    }
}
