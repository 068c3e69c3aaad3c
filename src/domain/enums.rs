/// Which surface receives key input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    TimeUp,
    TaskForm,
    Settings,
}

/// Fields of the add/edit task dialog, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskField {
    #[default]
    Description,
    Hours,
    Minutes,
    Seconds,
}

impl TaskField {
    pub fn next(&self) -> Self {
        match self {
            Self::Description => Self::Hours,
            Self::Hours => Self::Minutes,
            Self::Minutes => Self::Seconds,
            Self::Seconds => Self::Description,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Description => "Task Title",
            Self::Hours => "Hours",
            Self::Minutes => "Minutes",
            Self::Seconds => "Seconds",
        }
    }

    /// Numeric fields accept digits only
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::Description)
    }

    pub fn all() -> &'static [TaskField] {
        &[Self::Description, Self::Hours, Self::Minutes, Self::Seconds]
    }
}
