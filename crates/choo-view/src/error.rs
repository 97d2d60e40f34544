use thiserror::Error;

/// Local input problems, rejected before any remote call is issued.
///
/// Remote failures never show up here; the controller logs them and only
/// clears the busy signal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("No task is staged for editing")]
    NoEditCandidate,

    #[error("No task is staged for deletion")]
    NoDeleteCandidate,

    #[error("Invalid due date '{0}', expected YYYY-MM-DDTHH:mm")]
    InvalidDue(String),

    #[error("Due date '{0}' does not exist in the display time zone")]
    NonexistentLocalTime(String),
}

impl ControllerError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ControllerError::NoEditCandidate => "Select a task to edit first.",
            ControllerError::NoDeleteCandidate => "Select a task to delete first.",
            ControllerError::InvalidDue(_) => "Enter the due date as YYYY-MM-DDTHH:mm.",
            ControllerError::NonexistentLocalTime(_) => {
                "That time is skipped by a clock change. Pick another time."
            }
        }
    }
}
