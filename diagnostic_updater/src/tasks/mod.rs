pub use self::frequency_status::{FrequencyStatus, FrequencyStatusParam};
pub use self::heartbeat::Heartbeat;
pub use self::timestamp_status::TimestampStatus;
pub use self::topic_diagnostic::TopicDiagnostic;

pub mod frequency_status;
pub mod heartbeat;
pub mod timestamp_status;
pub mod topic_diagnostic;
