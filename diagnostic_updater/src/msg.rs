//! Plain records handed to a [`DiagnosticSink`](crate::DiagnosticSink).
//!
//! The layout follows the `diagnostic_msgs` and `std_msgs` definitions, so a
//! host transport can map them one to one onto its own wire types.

use crate::time::Time;
use serde_derive::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub seq: u32,
    pub stamp: Time,
    pub frame_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticStatus {
    pub level: i8,
    pub name: String,
    pub message: String,
    pub hardware_id: String,
    pub values: Vec<KeyValue>,
}

impl DiagnosticStatus {
    pub const OK: i8 = 0;
    pub const WARN: i8 = 1;
    pub const ERROR: i8 = 2;
    pub const STALE: i8 = 3;
}

/// One aggregate broadcast: every status produced in a single update cycle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticArray {
    pub header: Header,
    pub status: Vec<DiagnosticStatus>,
}

impl DiagnosticArray {
    /// Highest level found among the contained statuses, `OK` when empty.
    pub fn worst_level(&self) -> i8 {
        self.status
            .iter()
            .map(|status| status.level)
            .max()
            .unwrap_or(DiagnosticStatus::OK)
    }
}
