use crate::msg::{DiagnosticArray, DiagnosticStatus};
use crate::{Error, Result};
use crossbeam::channel::{self, Receiver, Sender};
use log::{error, info, warn};

/// Destination of aggregate broadcasts, usually a middleware publisher.
pub trait DiagnosticSink: Send + Sync {
    fn publish(&self, array: DiagnosticArray) -> Result<()>;
}

impl<F> DiagnosticSink for F
where
    F: Fn(DiagnosticArray) -> Result<()> + Send + Sync,
{
    #[inline]
    fn publish(&self, array: DiagnosticArray) -> Result<()> {
        self(array)
    }
}

/// Writes every status of an aggregate to the log, at a level matching its severity.
#[derive(Clone, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn publish(&self, array: DiagnosticArray) -> Result<()> {
        for status in &array.status {
            let values = status
                .values
                .iter()
                .map(|item| format!("{}={}", item.key, item.value))
                .collect::<Vec<_>>()
                .join(", ");
            match status.level {
                DiagnosticStatus::OK => info!(
                    "[{}] {} ({}): {} {{{}}}",
                    array.header.seq, status.name, status.hardware_id, status.message, values
                ),
                DiagnosticStatus::WARN => warn!(
                    "[{}] {} ({}): {} {{{}}}",
                    array.header.seq, status.name, status.hardware_id, status.message, values
                ),
                _ => error!(
                    "[{}] {} ({}): {} {{{}}}",
                    array.header.seq, status.name, status.hardware_id, status.message, values
                ),
            }
        }
        Ok(())
    }
}

/// Forwards aggregates over a channel to another part of the process.
#[derive(Clone)]
pub struct ChannelSink {
    sender: Sender<DiagnosticArray>,
}

impl ChannelSink {
    /// Creates an unbounded sink together with the receiving end.
    pub fn unbounded() -> (Self, Receiver<DiagnosticArray>) {
        let (sender, receiver) = channel::unbounded();
        (Self { sender }, receiver)
    }

    /// Creates a sink that holds at most `capacity` undelivered aggregates.
    ///
    /// Publishing into a full channel fails instead of blocking the update cycle.
    pub fn bounded(capacity: usize) -> (Self, Receiver<DiagnosticArray>) {
        let (sender, receiver) = channel::bounded(capacity);
        (Self { sender }, receiver)
    }
}

impl DiagnosticSink for ChannelSink {
    fn publish(&self, array: DiagnosticArray) -> Result<()> {
        self.sender
            .try_send(array)
            .map_err(|err| Error::Publish(err.to_string()))
    }
}
