//! Task and user-profile types as served by the todo server.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Server-assigned task identifier. Never generated locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item.
///
/// `due` keeps the offset the server sent it with; comparisons are by instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "ID")]
    pub id: TaskId,
    #[serde(rename = "Task")]
    pub task: String,
    #[serde(rename = "Done", default)]
    pub done: bool,
    #[serde(rename = "Pin", default)]
    pub pin: bool,
    #[serde(rename = "Due")]
    pub due: DateTime<FixedOffset>,
}

impl Task {
    pub fn new(id: i64, task: impl Into<String>, due: DateTime<FixedOffset>) -> Self {
        Self {
            id: TaskId(id),
            task: task.into(),
            done: false,
            pin: false,
            due,
        }
    }
}

/// Profile of the signed-in user. Display data only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(rename = "oauthName")]
    pub name: String,
    #[serde(rename = "oauthPicture")]
    pub picture: String,
}

/// Body of `POST /done`.
#[derive(Debug, Clone, Serialize)]
pub struct DoneRequest {
    #[serde(rename = "ID")]
    pub id: TaskId,
    #[serde(rename = "Done")]
    pub done: bool,
}

/// Body of `POST /pin`.
#[derive(Debug, Clone, Serialize)]
pub struct PinRequest {
    #[serde(rename = "ID")]
    pub id: TaskId,
    #[serde(rename = "Pin")]
    pub pin: bool,
}

/// Body of `POST /edit`.
#[derive(Debug, Clone, Serialize)]
pub struct EditRequest {
    #[serde(rename = "ID")]
    pub id: TaskId,
    #[serde(rename = "Task")]
    pub task: String,
    #[serde(rename = "Due")]
    pub due: DateTime<FixedOffset>,
}

/// Body of `POST /delete`.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteRequest {
    #[serde(rename = "ID")]
    pub id: TaskId,
}
