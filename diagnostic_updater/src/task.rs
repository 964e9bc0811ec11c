use crate::{Level, Status, TaskResult};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// A named producer of diagnostic statuses.
///
/// Tasks are run synchronously on every update cycle, so `run` should be
/// cheap and must not block. A task that never returns stalls the cycle.
pub trait Task: Send + Sync {
    fn name(&self) -> &str;

    fn run(&self, status: &mut Status) -> TaskResult;
}

impl<T: Task + ?Sized> Task for Arc<T> {
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn run(&self, status: &mut Status) -> TaskResult {
        (**self).run(status)
    }
}

impl<T: Task + ?Sized> Task for Box<T> {
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn run(&self, status: &mut Status) -> TaskResult {
        (**self).run(status)
    }
}

/// Runs `task` so that neither an error nor a panic escapes.
///
/// Failures are turned into an error summary naming the task.
pub(crate) fn run_isolated(task: &dyn Task, status: &mut Status) {
    match panic::catch_unwind(AssertUnwindSafe(|| task.run(status))) {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            log::debug!("Diagnostic task '{}' failed: {}", task.name(), err);
            status.set_summary(
                Level::Error,
                format!("Task '{}' failed: {}", task.name(), err),
            );
        }
        Err(_) => {
            log::error!("Diagnostic task '{}' panicked", task.name());
            status.set_summary(Level::Error, format!("Task '{}' panicked", task.name()));
        }
    }
}
