/// Lifecycle status of a checklist item (and the derived status of a task)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemStatus {
    #[default]
    NotStarted,
    Started,
    Done,
}

impl ItemStatus {
    /// Integer code used in the database
    pub fn code(&self) -> i64 {
        match self {
            Self::NotStarted => 0,
            Self::Started => 1,
            Self::Done => 2,
        }
    }

    /// Parse a database status code
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::NotStarted),
            1 => Some(Self::Started),
            2 => Some(Self::Done),
            _ => None,
        }
    }

    /// Checkbox-style badge shown in lists
    pub fn badge(&self) -> &'static str {
        match self {
            Self::NotStarted => "[ ]",
            Self::Started => "[>]",
            Self::Done => "[x]",
        }
    }

    /// Upper-case tag used in reports
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::NotStarted => "NOT STARTED",
            Self::Started => "STARTED",
            Self::Done => "DONE",
        }
    }
}

/// Which list the UI is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Tasks,
    /// Items of the task with this id
    Items(i64),
}
