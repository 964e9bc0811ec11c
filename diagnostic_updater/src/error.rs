/// Enumeration of all errors that can be returned.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A configuration value was rejected at construction time.
    #[error("invalid value for `{parameter}`, {reason}")]
    InvalidConfig {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Reason for the failure.
        reason: String,
    },
    /// A task with the same name is already registered with the updater.
    #[error("could not add duplicate task `{0}`")]
    DuplicateTask(String),
    /// The diagnostic sink refused the aggregate.
    #[error("failed to publish diagnostics: {0}")]
    Publish(String),
}

impl Error {
    pub(crate) fn invalid_config(parameter: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidConfig {
            parameter,
            reason: reason.into(),
        }
    }
}

/// Convenience type for shorter return value syntax of this crate's errors.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure signalled by a diagnostic task while producing its status.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TaskError(pub String);

impl TaskError {
    #[inline]
    pub fn new(message: impl std::string::ToString) -> Self {
        TaskError(message.to_string())
    }
}

/// Return value of [`Task::run`](crate::Task::run).
pub type TaskResult = std::result::Result<(), TaskError>;
