//! Orchestrates remote calls around the task mirror.
//!
//! Each operation bumps the busy counter, runs on the tokio runtime and
//! reports back as a [`SyncMessage`]. Messages are applied on the owner's side
//! in the order the operations finished, so the store has a single writer and
//! needs no locking.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use choo_services::{ApiResult, Operation, Task, TaskId, TodoApi, UserInfo};
use tokio::sync::mpsc;

use crate::busy::BusyTracker;
use crate::date_format::DateFormatter;
use crate::error::ControllerError;
use crate::ordering;
use crate::store::TaskStore;

/// Completion of one remote operation.
#[derive(Debug)]
pub enum SyncMessage {
    UserInfoFetched(ApiResult<UserInfo>),
    TaskListFetched(ApiResult<Vec<Task>>),
    DoneSubmitted {
        id: TaskId,
        status: bool,
        result: ApiResult<()>,
    },
    PinSubmitted {
        id: TaskId,
        status: bool,
        result: ApiResult<()>,
    },
    EditSubmitted {
        edited: Task,
        result: ApiResult<()>,
    },
    DeleteSubmitted {
        id: TaskId,
        result: ApiResult<()>,
    },
    /// The operation's task died before reporting (panic).
    Aborted(Operation),
}

impl SyncMessage {
    pub fn operation(&self) -> Operation {
        match self {
            SyncMessage::UserInfoFetched(_) => Operation::FetchUserInfo,
            SyncMessage::TaskListFetched(_) => Operation::FetchTaskList,
            SyncMessage::DoneSubmitted { .. } => Operation::SubmitDone,
            SyncMessage::PinSubmitted { .. } => Operation::SubmitPin,
            SyncMessage::EditSubmitted { .. } => Operation::SubmitEdit,
            SyncMessage::DeleteSubmitted { .. } => Operation::SubmitDelete,
            SyncMessage::Aborted(op) => *op,
        }
    }
}

pub struct SyncController {
    api: Arc<dyn TodoApi>,
    runtime: tokio::runtime::Handle,
    formatter: DateFormatter,
    store: TaskStore,
    busy: BusyTracker,
    tx: mpsc::UnboundedSender<SyncMessage>,
    rx: mpsc::UnboundedReceiver<SyncMessage>,
}

impl SyncController {
    pub fn new(
        api: Arc<dyn TodoApi>,
        formatter: DateFormatter,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            runtime,
            formatter,
            store: TaskStore::new(),
            busy: BusyTracker::new(),
            tx,
            rx,
        }
    }

    /// Run `work` on the runtime; exactly one message comes back for it.
    fn spawn<F>(&mut self, operation: Operation, work: F)
    where
        F: Future<Output = SyncMessage> + Send + 'static,
    {
        self.busy.begin();
        tracing::debug!("Issued {} ({} outstanding)", operation, self.busy.outstanding());

        // Sent from inside the work task so channel order is completion order.
        // The receiver lives as long as the controller.
        let work_tx = self.tx.clone();
        let handle = self.runtime.spawn(async move {
            let _ = work_tx.send(work.await);
        });

        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            if let Err(e) = handle.await {
                tracing::error!("{} task ended without a result: {}", operation, e);
                let _ = tx.send(SyncMessage::Aborted(operation));
            }
        });
    }

    /// Issue the two startup fetches; they may complete in either order.
    pub fn start(&mut self) {
        let api = self.api.clone();
        self.spawn(Operation::FetchUserInfo, async move {
            SyncMessage::UserInfoFetched(api.fetch_user_info().await)
        });

        let api = self.api.clone();
        self.spawn(Operation::FetchTaskList, async move {
            SyncMessage::TaskListFetched(api.fetch_task_list().await)
        });
    }

    pub fn set_done(&mut self, id: TaskId, status: bool) {
        let api = self.api.clone();
        self.spawn(Operation::SubmitDone, async move {
            let result = api.submit_done(id, status).await;
            SyncMessage::DoneSubmitted { id, status, result }
        });
    }

    pub fn set_pin(&mut self, id: TaskId, status: bool) {
        let api = self.api.clone();
        self.spawn(Operation::SubmitPin, async move {
            let result = api.submit_pin(id, status).await;
            SyncMessage::PinSubmitted { id, status, result }
        });
    }

    pub fn stage_edit(&mut self, task: Task) {
        let literal = self.formatter.editable_literal(&task.due);
        self.store.stage_edit(task, literal);
    }

    /// Submit new text and due literal for the staged task.
    ///
    /// # Errors
    /// Fails without contacting the server when nothing is staged or the
    /// literal does not parse.
    pub fn edit(&mut self, text: impl Into<String>, due_literal: &str) -> Result<(), ControllerError> {
        let candidate = self
            .store
            .edit_candidate()
            .ok_or(ControllerError::NoEditCandidate)?;
        // Start from the live entry; the staged copy may predate done/pin acks.
        let base = self.store.get(candidate.id).unwrap_or(candidate).clone();
        let due = self.formatter.parse_editable_literal(due_literal)?;

        let edited = Task {
            task: text.into(),
            due,
            ..base
        };

        let api = self.api.clone();
        self.spawn(Operation::SubmitEdit, async move {
            let result = api.submit_edit(edited.id, &edited.task, edited.due).await;
            SyncMessage::EditSubmitted { edited, result }
        });
        Ok(())
    }

    pub fn stage_delete(&mut self, task: Task) {
        self.store.stage_delete(task);
    }

    /// Submit deletion of the staged task.
    ///
    /// # Errors
    /// Fails without contacting the server when nothing is staged.
    pub fn delete(&mut self) -> Result<(), ControllerError> {
        let id = self
            .store
            .delete_candidate()
            .map(|t| t.id)
            .ok_or(ControllerError::NoDeleteCandidate)?;

        let api = self.api.clone();
        self.spawn(Operation::SubmitDelete, async move {
            let result = api.submit_delete(id).await;
            SyncMessage::DeleteSubmitted { id, result }
        });
        Ok(())
    }

    fn apply(&mut self, message: SyncMessage) {
        self.busy.end();
        let operation = message.operation();

        match message {
            SyncMessage::UserInfoFetched(Ok(user)) => self.store.load_user(user),
            SyncMessage::TaskListFetched(Ok(tasks)) => self.store.load_tasks(tasks),
            SyncMessage::DoneSubmitted {
                id,
                status,
                result: Ok(()),
            } => {
                self.store.apply_done_confirmed(id, status);
            }
            SyncMessage::PinSubmitted {
                id,
                status,
                result: Ok(()),
            } => {
                self.store.apply_pin_confirmed(id, status);
            }
            SyncMessage::EditSubmitted {
                mut edited,
                result: Ok(()),
            } => {
                // An edit only rewrites text and due on the server.
                if let Some(live) = self.store.get(edited.id) {
                    edited.done = live.done;
                    edited.pin = live.pin;
                }
                self.store.confirm_edit(edited);
            }
            SyncMessage::DeleteSubmitted { id, result: Ok(()) } => {
                self.store.apply_delete_confirmed(id);
            }
            SyncMessage::UserInfoFetched(Err(e))
            | SyncMessage::TaskListFetched(Err(e))
            | SyncMessage::DoneSubmitted { result: Err(e), .. }
            | SyncMessage::PinSubmitted { result: Err(e), .. }
            | SyncMessage::EditSubmitted { result: Err(e), .. }
            | SyncMessage::DeleteSubmitted { result: Err(e), .. } => {
                tracing::warn!("{}; keeping current state", e);
            }
            SyncMessage::Aborted(_) => {}
        }

        tracing::debug!("Completed {} ({} outstanding)", operation, self.busy.outstanding());
    }

    /// Apply every completion that has already arrived. Never blocks.
    pub fn process_messages(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.rx.try_recv() {
            self.apply(message);
            applied += 1;
        }
        applied
    }

    /// Wait for the next completion and apply it.
    pub async fn apply_next(&mut self) -> Option<Operation> {
        if !self.busy.is_busy() {
            return None;
        }
        let message = self.rx.recv().await?;
        let operation = message.operation();
        self.apply(message);
        Some(operation)
    }

    /// Wait until no operation is outstanding.
    pub async fn settle(&mut self) {
        while self.apply_next().await.is_some() {}
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    pub fn outstanding(&self) -> usize {
        self.busy.outstanding()
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn formatter(&self) -> &DateFormatter {
        &self.formatter
    }

    pub fn remaining_count(&self) -> usize {
        ordering::remaining_count(self.store.tasks())
    }

    pub fn pinned_tasks(&self) -> Vec<&Task> {
        ordering::pinned_tasks(self.store.tasks())
    }

    pub fn non_pinned_tasks(&self) -> Vec<&Task> {
        ordering::non_pinned_tasks(self.store.tasks())
    }

    /// Checked against the wall clock on every call.
    pub fn is_overdue(&self, task: &Task) -> bool {
        ordering::is_overdue(task, Utc::now())
    }

    pub fn overdue_marker(&self, task: &Task) -> &'static str {
        ordering::overdue_marker(task, Utc::now())
    }

    pub fn relative_label(&self, due: &DateTime<FixedOffset>) -> String {
        self.formatter.relative_label(due, Utc::now())
    }

    pub fn editable_literal(&self, due: &DateTime<FixedOffset>) -> String {
        self.formatter.editable_literal(due)
    }
}
