//! Diagnostic tasks, status aggregation and periodic publishing.
//!
//! Producers implement [`Task`] (or are wrapped with [`FunctionExt::into_task`]),
//! get registered with an [`Updater`], and every [`Updater::update`] rolls their
//! results into a single [`msg::DiagnosticArray`] handed to a [`DiagnosticSink`].

pub use clock::{Clock, Rate, RealClock, SimulatedClock};
pub use composite_task::{CompositeTask, CompositeTaskRunner};
pub use error::{Error, Result, TaskError, TaskResult};
pub use function_task::{FunctionExt, FunctionTask, IntoTaskResult};
pub use msg::KeyValue;
pub use sink::{ChannelSink, DiagnosticSink, LogSink};
pub use status::Status;
pub use task::Task;
pub use tasks::{
    FrequencyStatus, FrequencyStatusParam, Heartbeat, TimestampStatus, TopicDiagnostic,
};
pub use time::{Duration, Time};
pub use updater::{Updater, UpdaterConfig};

mod clock;
mod composite_task;
mod error;
mod function_task;
mod macros;
pub mod msg;
mod sink;
mod status;
mod task;
pub mod tasks;
mod time;
mod updater;

use serde_derive::{Deserialize, Serialize};

/// Severity of a diagnostic status, ordered from healthy to stale.
#[repr(i8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    Ok = msg::DiagnosticStatus::OK,
    Warn = msg::DiagnosticStatus::WARN,
    Error = msg::DiagnosticStatus::ERROR,
    Stale = msg::DiagnosticStatus::STALE,
}

impl Level {
    /// Returns the more severe of the two levels.
    #[inline]
    pub fn worst(self, other: Level) -> Level {
        std::cmp::max(self, other)
    }
}

impl Default for Level {
    #[inline]
    fn default() -> Self {
        Level::Ok
    }
}

pub(crate) static FAILED_TO_LOCK: &str = "Failed to acquire lock";
