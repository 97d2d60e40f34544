//! Remote todo service: data model, the `TodoApi` contract and its HTTP client.

pub mod api;
pub mod client;
pub mod error;
pub mod retry;
pub mod task;

pub use api::{Operation, TodoApi};
pub use client::TodoClient;
pub use error::{ApiError, ApiResult};
pub use retry::RetryConfig;
pub use task::{Task, TaskId, UserInfo};
