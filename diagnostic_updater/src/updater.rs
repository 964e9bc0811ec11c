use crate::msg::{DiagnosticArray, DiagnosticStatus, Header};
use crate::task::run_isolated;
use crate::{
    Clock, DiagnosticSink, Duration, Error, FunctionTask, IntoTaskResult, Level, RealClock,
    Result, Status, Task, Time,
};
use log::{debug, warn};
use serde_derive::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

static DEFAULT_NAME: &str = "diagnostic_updater";

/// Settings of an [`Updater`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdaterConfig {
    /// Identifier of the monitored hardware, copied into every status.
    pub hardware_id: String,
    /// Minimum time between two publications by [`Updater::update`], in seconds.
    pub period: f64,
    /// Prefixed to every status name as `"node_name: task name"` when set.
    pub node_name: Option<String>,
    /// Logs every status that is not OK.
    pub verbose: bool,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            hardware_id: String::new(),
            period: 1.0,
            node_name: None,
            verbose: false,
        }
    }
}

impl UpdaterConfig {
    pub fn validate(&self) -> Result<()> {
        match Duration::try_from_secs_f64(self.period) {
            Some(_) if self.period >= 0.0 => Ok(()),
            _ => Err(Error::invalid_config(
                "period",
                format!(
                    "expected a non-negative number of seconds below {}, got {}",
                    i32::MAX,
                    self.period
                ),
            )),
        }
    }
}

/// Registry of diagnostic tasks that periodically publishes their statuses.
///
/// Task names are unique: adding a task whose name is already registered is
/// rejected with [`Error::DuplicateTask`]. Tasks run in the order they were
/// added, and a failing or panicking task is reported as an error status
/// without affecting the others.
pub struct Updater {
    sink: Box<dyn DiagnosticSink>,
    clock: Arc<dyn Clock>,
    tasks: Mutex<Vec<Arc<dyn Task>>>,
    hardware_id: Mutex<String>,
    node_name: Option<String>,
    period: Duration,
    verbose: AtomicBool,
    next_time: Mutex<Time>,
    seq: AtomicU32,
    warned_missing_hardware_id: AtomicBool,
}

impl Updater {
    #[inline]
    pub fn new(sink: impl DiagnosticSink + 'static) -> Self {
        Self::build(Box::new(sink), UpdaterConfig::default(), Arc::new(RealClock::default()))
    }

    pub fn with_config(sink: impl DiagnosticSink + 'static, config: UpdaterConfig) -> Result<Self> {
        Self::with_clock(sink, config, Arc::new(RealClock::default()))
    }

    pub fn with_clock(
        sink: impl DiagnosticSink + 'static,
        config: UpdaterConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(Box::new(sink), config, clock))
    }

    fn build(sink: Box<dyn DiagnosticSink>, config: UpdaterConfig, clock: Arc<dyn Clock>) -> Self {
        let period = Duration::from_secs_f64(config.period);
        let next_time = clock.now() + period;
        Self {
            sink,
            clock,
            tasks: Mutex::new(vec![]),
            hardware_id: Mutex::new(config.hardware_id),
            node_name: config.node_name,
            period,
            verbose: AtomicBool::new(config.verbose),
            next_time: Mutex::new(next_time),
            seq: AtomicU32::new(0),
            warned_missing_hardware_id: AtomicBool::new(false),
        }
    }

    pub fn set_hardware_id(&self, hardware_id: impl Into<String>) {
        *lock(&self.hardware_id) = hardware_id.into();
    }

    pub fn hardware_id(&self) -> String {
        lock(&self.hardware_id).clone()
    }

    pub fn set_verbose(&self, verbose: bool) {
        self.verbose.store(verbose, Ordering::Relaxed);
    }

    pub fn add_task(&self, task: impl Task + 'static) -> Result<()> {
        let mut tasks = lock(&self.tasks);
        if tasks.iter().any(|existing| existing.name() == task.name()) {
            return Err(Error::DuplicateTask(task.name().into()));
        }
        debug!("Registered diagnostic task '{}'", task.name());
        tasks.push(Arc::new(task));
        Ok(())
    }

    /// Registers a function or closure as a task named `name`.
    pub fn add_function<F, R>(&self, name: &str, function: F) -> Result<()>
    where
        F: Fn(&mut Status) -> R + Send + Sync + 'static,
        R: IntoTaskResult + 'static,
    {
        self.add_task(FunctionTask::new(name, function))
    }

    /// Removes the task called `name`, returning whether one was registered.
    pub fn remove_by_name(&self, name: &str) -> bool {
        let mut tasks = lock(&self.tasks);
        match tasks.iter().position(|task| task.name() == name) {
            Some(index) => {
                tasks.remove(index);
                debug!("Removed diagnostic task '{}'", name);
                true
            }
            None => false,
        }
    }

    pub fn task_names(&self) -> Vec<String> {
        lock(&self.tasks)
            .iter()
            .map(|task| task.name().to_string())
            .collect()
    }

    /// Publishes the statuses of all tasks once the configured period has
    /// passed since the last publication (or since construction).
    #[inline]
    pub fn update(&self) -> Result<()> {
        self.update_with_extra(&[])
    }

    pub fn update_with_extra(&self, extra_tasks: &[&dyn Task]) -> Result<()> {
        if self.clock.now() < *lock(&self.next_time) {
            return Ok(());
        }
        self.force_update_with_extra(extra_tasks)
    }

    /// Publishes the statuses of all tasks right away.
    #[inline]
    pub fn force_update(&self) -> Result<()> {
        self.force_update_with_extra(&[])
    }

    pub fn force_update_with_extra(&self, extra_tasks: &[&dyn Task]) -> Result<()> {
        *lock(&self.next_time) = self.clock.now() + self.period;
        let status = self.perform_checks(extra_tasks);
        if self.verbose.load(Ordering::Relaxed) {
            for status in status.iter().filter(|s| s.level != DiagnosticStatus::OK) {
                warn!(
                    "Non-zero diagnostic status. Name: '{}', status {}: '{}'",
                    status.name, status.level, status.message
                );
            }
        }
        self.publish(status)
    }

    /// Runs every registered task, followed by `extra_tasks`, and collects
    /// one status per task.
    pub fn perform_checks(&self, extra_tasks: &[&dyn Task]) -> Vec<DiagnosticStatus> {
        // Tasks run outside the registry lock, so they are free to use the updater.
        let tasks = lock(&self.tasks).clone();
        let hardware_id = self.hardware_id();
        Iterator::chain(
            tasks.iter().map(|task| task.as_ref() as &dyn Task),
            extra_tasks.iter().copied(),
        )
        .map(|task| self.perform_passed_check(task, &hardware_id))
        .collect()
    }

    fn perform_passed_check(&self, task: &dyn Task, hardware_id: &str) -> DiagnosticStatus {
        let mut status = Status {
            name: self.status_name(task.name()),
            hardware_id: hardware_id.into(),
            level: Level::Error,
            message: "No message was set".into(),
            values: vec![],
        };
        run_isolated(task, &mut status);
        if status.message.is_empty() {
            status.set_summary(Level::Error, "No message was set");
        }
        status.into()
    }

    /// Publishes a single status with the given summary, outside of the
    /// regular cycle. Useful for one-off announcements.
    pub fn broadcast(&self, level: Level, message: &str) -> Result<()> {
        let status = Status {
            name: self.node_name.as_deref().unwrap_or(DEFAULT_NAME).into(),
            hardware_id: self.hardware_id(),
            level,
            message: message.into(),
            values: vec![],
        };
        self.publish(vec![status.into()])
    }

    fn status_name(&self, task_name: &str) -> String {
        match &self.node_name {
            Some(node_name) => format!("{}: {}", node_name, task_name),
            None => task_name.into(),
        }
    }

    fn publish(&self, status: Vec<DiagnosticStatus>) -> Result<()> {
        if status.iter().any(|s| s.hardware_id.is_empty())
            && !self.warned_missing_hardware_id.swap(true, Ordering::Relaxed)
        {
            warn!("Hardware ID is not set, diagnostics will be published without one");
        }
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let message = DiagnosticArray {
            header: Header {
                seq,
                stamp: self.clock.now(),
                frame_id: String::new(),
            },
            status,
        };
        self.sink.publish(message)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Registry state is never left half-updated, so a poisoned lock is still usable.
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
