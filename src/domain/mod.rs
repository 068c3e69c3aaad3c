pub mod enums;
pub mod mode;
pub mod task;
pub mod timer;

pub use enums::{TaskField, UiMode};
pub use mode::{Mode, ModeConfig, ModeDurations};
pub use task::{Task, TaskDraft, TaskInputError, TaskTime};
pub use timer::{TimerEngine, TimerEvent, MAX_SCRUB_MINUTES};
