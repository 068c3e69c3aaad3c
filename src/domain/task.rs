use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const SECS_PER_HOUR: u64 = 3600;
const SECS_PER_MINUTE: u64 = 60;
/// Largest whole-second span chrono can hold
const MAX_DURATION_SECS: u64 = (i64::MAX / 1000) as u64;

/// Validation failures for the add/edit task form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskInputError {
    #[error("task description is empty")]
    EmptyDescription,
    #[error("{field} must be a non-negative whole number, got {value:?}")]
    InvalidComponent { field: &'static str, value: String },
    #[error("estimated time is too large")]
    Overflow,
    #[error("no task at index {0}")]
    NoSuchTask(usize),
}

/// Failure to read a stored "<h>h <m>m <s>s" string back
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed task time {0:?}")]
pub struct TimeParseError(pub String);

/// Estimated duration of a task, normalized to whole seconds.
///
/// Renders as `"{h}h {m}m {s}s"`; `FromStr` is the exact inverse of that
/// rendering and the two must change together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskTime {
    total_seconds: u64,
}

impl TaskTime {
    pub fn from_seconds(total_seconds: u64) -> Self {
        Self { total_seconds }
    }

    /// Compose from raw components; 90 minutes normalizes to 1h 30m 0s
    pub fn from_components(hours: u64, minutes: u64, seconds: u64) -> Option<Self> {
        let total = hours
            .checked_mul(SECS_PER_HOUR)?
            .checked_add(minutes.checked_mul(SECS_PER_MINUTE)?)?
            .checked_add(seconds)?;
        Some(Self::from_seconds(total))
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    pub fn hours(&self) -> u64 {
        self.total_seconds / SECS_PER_HOUR
    }

    pub fn minutes(&self) -> u64 {
        (self.total_seconds % SECS_PER_HOUR) / SECS_PER_MINUTE
    }

    pub fn seconds(&self) -> u64 {
        self.total_seconds % SECS_PER_MINUTE
    }

    pub fn as_duration(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.total_seconds.min(MAX_DURATION_SECS) as i64)
    }
}

impl fmt::Display for TaskTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m {}s", self.hours(), self.minutes(), self.seconds())
    }
}

impl FromStr for TaskTime {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TimeParseError(s.to_string());
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let [h, m, sec] = tokens.as_slice() else {
            return Err(err());
        };

        let component = |token: &str, unit: char| -> Result<u64, TimeParseError> {
            token
                .strip_suffix(unit)
                .and_then(|digits| digits.parse::<u64>().ok())
                .ok_or_else(err)
        };

        Self::from_components(component(*h, 'h')?, component(*m, 'm')?, component(*sec, 's')?)
            .ok_or_else(err)
    }
}

impl Serialize for TaskTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TaskTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A task on the list. Identity is its position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub description: String,
    pub time: TaskTime,
}

impl Task {
    pub fn new(description: impl Into<String>, time: TaskTime) -> Self {
        Self {
            description: description.into(),
            time,
        }
    }
}

/// Uncommitted contents of the add/edit task form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub description: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl TaskDraft {
    pub fn new(
        description: impl Into<String>,
        hours: impl Into<String>,
        minutes: impl Into<String>,
        seconds: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            hours: hours.into(),
            minutes: minutes.into(),
            seconds: seconds.into(),
        }
    }

    /// Populate a draft from an existing task
    pub fn from_task(task: &Task) -> Self {
        Self {
            description: task.description.clone(),
            hours: task.time.hours().to_string(),
            minutes: task.time.minutes().to_string(),
            seconds: task.time.seconds().to_string(),
        }
    }

    /// Validate the draft and build the task it describes
    pub fn to_task(&self) -> Result<Task, TaskInputError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(TaskInputError::EmptyDescription);
        }

        let hours = parse_component("hours", &self.hours)?;
        let minutes = parse_component("minutes", &self.minutes)?;
        let seconds = parse_component("seconds", &self.seconds)?;
        let time =
            TaskTime::from_components(hours, minutes, seconds).ok_or(TaskInputError::Overflow)?;

        Ok(Task::new(description, time))
    }
}

fn parse_component(field: &'static str, value: &str) -> Result<u64, TaskInputError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| TaskInputError::InvalidComponent {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_normalizes_through_total_seconds() {
        let time = TaskTime::from_components(0, 90, 0).unwrap();
        assert_eq!(time.to_string(), "1h 30m 0s");

        let time = TaskTime::from_components(1, 59, 61).unwrap();
        assert_eq!(time.to_string(), "2h 0m 1s");
    }

    #[test]
    fn test_parse_formatted_time() {
        let time: TaskTime = "2h 15m 7s".parse().unwrap();
        assert_eq!((time.hours(), time.minutes(), time.seconds()), (2, 15, 7));
        assert_eq!(time.total_seconds(), 2 * 3600 + 15 * 60 + 7);
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        assert!("1h 30m".parse::<TaskTime>().is_err());
        assert!("1h 30m 0s 4".parse::<TaskTime>().is_err());
        assert!("1 30 0".parse::<TaskTime>().is_err());
        assert!("1m 30h 0s".parse::<TaskTime>().is_err());
        assert!("-1h 0m 0s".parse::<TaskTime>().is_err());
        assert!("".parse::<TaskTime>().is_err());
    }

    #[test]
    fn test_task_serializes_time_as_string() {
        let task = Task::new("Write report", TaskTime::from_components(0, 45, 0).unwrap());
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(json, r#"{"description":"Write report","time":"0h 45m 0s"}"#);

        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn test_deserialize_rejects_malformed_time() {
        let result: Result<Task, _> =
            serde_json::from_str(r#"{"description":"x","time":"soon"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_draft_to_task_trims_description() {
        let task = TaskDraft::new("  Read  ", "0", "90", "0").to_task().unwrap();
        assert_eq!(task.description, "Read");
        assert_eq!(task.time.to_string(), "1h 30m 0s");
    }

    #[test]
    fn test_draft_validation() {
        assert_eq!(
            TaskDraft::new("   ", "1", "2", "3").to_task(),
            Err(TaskInputError::EmptyDescription)
        );
        assert_eq!(
            TaskDraft::new("Read", "", "2", "3").to_task(),
            Err(TaskInputError::InvalidComponent {
                field: "hours",
                value: String::new()
            })
        );
        assert!(TaskDraft::new("Read", "1", "x", "3").to_task().is_err());
        assert!(TaskDraft::new("Read", "1", "2", "-3").to_task().is_err());
        assert_eq!(
            TaskDraft::new("Read", &u64::MAX.to_string(), "0", "0").to_task(),
            Err(TaskInputError::Overflow)
        );
    }

    #[test]
    fn test_draft_from_task_uses_normalized_components() {
        let task = TaskDraft::new("Read", "0", "90", "0").to_task().unwrap();
        let draft = TaskDraft::from_task(&task);
        assert_eq!(draft, TaskDraft::new("Read", "1", "30", "0"));
    }
}
