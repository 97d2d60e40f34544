//! View-side state for the todo client: the task mirror, busy tracking,
//! display orderings and due-date formatting, tied together by
//! [`SyncController`].

pub mod busy;
pub mod controller;
pub mod date_format;
pub mod error;
pub mod ordering;
pub mod store;

pub use busy::BusyTracker;
pub use controller::{SyncController, SyncMessage};
pub use date_format::{DateFormatter, DisplayZone, DueBucket, EDITABLE_FORMAT};
pub use error::ControllerError;
pub use ordering::OVERDUE_MARKER;
pub use store::TaskStore;
