use crate::msg::{DiagnosticStatus, KeyValue};
use crate::Level;

/// Result of a single diagnostic task: a summary plus free-form key/value items.
#[derive(Clone, Debug, PartialEq)]
pub struct Status {
    pub level: Level,
    pub name: String,
    pub message: String,
    pub hardware_id: String,
    pub values: Vec<KeyValue>,
}

impl Default for Status {
    #[inline]
    fn default() -> Self {
        Self::new(Level::Ok, "")
    }
}

impl Status {
    #[inline]
    pub fn new(level: Level, message: &str) -> Self {
        let message = message.to_string();
        Self {
            level,
            name: "".to_string(),
            message,
            hardware_id: "".to_string(),
            values: vec![],
        }
    }

    /// Overwrites the summary. The last call wins.
    pub fn set_summary(&mut self, level: Level, message: impl std::string::ToString) {
        self.level = level;
        self.message = message.to_string();
    }

    #[inline]
    pub fn copy_summary(&mut self, other: &Status) {
        self.set_summary(other.level, other.message.clone())
    }

    #[inline]
    pub fn clear_summary(&mut self) {
        self.set_summary(Level::Ok, "")
    }

    /// Raises the level to `level` if it is more severe. Never lowers it.
    #[inline]
    pub fn merge_severity(&mut self, level: Level) {
        self.level = self.level.worst(level);
    }

    fn merge_messages(&mut self, message: &str) {
        if message.is_empty() {
            return;
        }

        self.message = if self.message.is_empty() {
            message.into()
        } else {
            format!("{}; {}", self.message, message)
        };
    }

    /// Combines another summary into this one.
    ///
    /// Messages of OK summaries are only kept while everything merged so far
    /// is OK; as soon as an issue shows up, only issue messages are listed.
    pub fn merge_summary(&mut self, level: Level, message: &str) {
        match (self.level, level) {
            (Level::Ok, Level::Ok) => self.merge_messages(message),
            (Level::Ok, _) => self.message = message.into(),
            (_, Level::Ok) => {}
            _ => self.merge_messages(message),
        }
        self.merge_severity(level);
    }

    #[inline]
    pub fn merge_summary_with(&mut self, other: &Status) {
        self.merge_summary(other.level, &other.message)
    }

    pub fn clear_values(&mut self) {
        self.values.clear();
    }

    /// Appends an item. Keys are not required to be unique.
    pub fn add(&mut self, key: impl std::string::ToString, value: impl std::string::ToString) {
        let key = key.to_string();
        let value = value.to_string();
        self.values.push(KeyValue { key, value });
    }

    /// Value of the first item with the given key.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|item| item.key == key)
            .map(|item| item.value.as_str())
    }
}

impl From<Status> for DiagnosticStatus {
    fn from(status: Status) -> Self {
        DiagnosticStatus {
            level: status.level as i8,
            name: status.name,
            message: status.message,
            hardware_id: status.hardware_id,
            values: status.values,
        }
    }
}
