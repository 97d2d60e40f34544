//! The remote todo contract the controller is written against.
//!
//! `TodoClient` implements it over HTTP; tests substitute in-memory fakes.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};

use crate::error::ApiResult;
use crate::task::{Task, TaskId, UserInfo};

/// One of the six remote operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FetchUserInfo,
    FetchTaskList,
    SubmitDone,
    SubmitPin,
    SubmitEdit,
    SubmitDelete,
}

impl Operation {
    /// Server path relative to the base URL.
    pub fn path(self) -> &'static str {
        match self {
            Operation::FetchUserInfo => "/user-info",
            Operation::FetchTaskList => "/list",
            Operation::SubmitDone => "/done",
            Operation::SubmitPin => "/pin",
            Operation::SubmitEdit => "/edit",
            Operation::SubmitDelete => "/delete",
        }
    }

    /// Reads are safe to retry, writes are not.
    pub fn is_read(self) -> bool {
        matches!(self, Operation::FetchUserInfo | Operation::FetchTaskList)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verb = if self.is_read() { "GET" } else { "POST" };
        write!(f, "{} {}", verb, self.path())
    }
}

/// Remote collaborator for the task list.
///
/// Every method resolves to success-with-payload or an [`ApiError`](crate::ApiError);
/// write acknowledgements carry no usable body.
#[async_trait]
pub trait TodoApi: Send + Sync {
    async fn fetch_user_info(&self) -> ApiResult<UserInfo>;

    async fn fetch_task_list(&self) -> ApiResult<Vec<Task>>;

    async fn submit_done(&self, id: TaskId, status: bool) -> ApiResult<()>;

    async fn submit_pin(&self, id: TaskId, status: bool) -> ApiResult<()>;

    async fn submit_edit(&self, id: TaskId, task: &str, due: DateTime<FixedOffset>)
        -> ApiResult<()>;

    async fn submit_delete(&self, id: TaskId) -> ApiResult<()>;
}
