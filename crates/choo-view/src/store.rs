//! Local mirror of the server's task collection plus the edit/delete staging slots.
//!
//! Mutations other than staging are applied only after the server has
//! acknowledged the corresponding write.

use choo_services::{Task, TaskId, UserInfo};

#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    tasks_loaded: bool,
    user: Option<UserInfo>,
    edit_candidate: Option<Task>,
    edit_due: String,
    delete_candidate: Option<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, user: UserInfo, tasks: Vec<Task>) {
        self.load_user(user);
        self.load_tasks(tasks);
    }

    pub fn load_user(&mut self, user: UserInfo) {
        if self.user.is_some() {
            tracing::warn!("User info already loaded, ignoring second load");
            return;
        }
        self.user = Some(user);
    }

    /// Replace the whole mirror.
    pub fn load_tasks(&mut self, tasks: Vec<Task>) {
        tracing::debug!("Loaded {} tasks", tasks.len());
        self.tasks = tasks;
        self.tasks_loaded = true;
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    /// Both startup fetches have landed.
    pub fn is_loaded(&self) -> bool {
        self.tasks_loaded && self.user.is_some()
    }

    /// Current mirror entry for `id`.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn find_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Returns false when `id` is not mirrored (the mirror is out of sync).
    pub fn apply_done_confirmed(&mut self, id: TaskId, status: bool) -> bool {
        match self.find_mut(id) {
            Some(task) => {
                task.done = status;
                true
            }
            None => {
                tracing::debug!("Done confirmed for unknown task {}", id);
                false
            }
        }
    }

    pub fn apply_pin_confirmed(&mut self, id: TaskId, status: bool) -> bool {
        match self.find_mut(id) {
            Some(task) => {
                task.pin = status;
                true
            }
            None => {
                tracing::debug!("Pin confirmed for unknown task {}", id);
                false
            }
        }
    }

    pub fn stage_edit(&mut self, task: Task, editable_due: String) {
        self.edit_candidate = Some(task);
        self.edit_due = editable_due;
    }

    pub fn edit_candidate(&self) -> Option<&Task> {
        self.edit_candidate.as_ref()
    }

    /// Due literal for the staged edit, empty when nothing is staged.
    pub fn edit_due(&self) -> &str {
        &self.edit_due
    }

    /// Replace the first task with `edited.id` wholesale.
    pub fn confirm_edit(&mut self, edited: Task) -> bool {
        match self.find_mut(edited.id) {
            Some(slot) => {
                *slot = edited;
                true
            }
            None => {
                tracing::debug!("Edit confirmed for unknown task {}", edited.id);
                false
            }
        }
    }

    pub fn stage_delete(&mut self, task: Task) {
        self.delete_candidate = Some(task);
    }

    pub fn delete_candidate(&self) -> Option<&Task> {
        self.delete_candidate.as_ref()
    }

    /// Remove the staged delete candidate from the mirror and clear the slot.
    pub fn confirm_delete(&mut self) -> bool {
        match self.delete_candidate.as_ref().map(|t| t.id) {
            Some(id) => self.apply_delete_confirmed(id),
            None => false,
        }
    }

    /// Remove the first task with `id`; clears the delete slot if it held that task.
    pub fn apply_delete_confirmed(&mut self, id: TaskId) -> bool {
        if self.delete_candidate.as_ref().is_some_and(|t| t.id == id) {
            self.delete_candidate = None;
        }

        match self.tasks.iter().position(|t| t.id == id) {
            Some(index) => {
                self.tasks.remove(index);
                true
            }
            None => {
                tracing::debug!("Delete confirmed for unknown task {}", id);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn task(id: i64, done: bool) -> Task {
        let mut t = Task::new(
            id,
            format!("Task {}", id),
            DateTime::parse_from_rfc3339("2018-11-08T12:27:00+07:00").unwrap(),
        );
        t.done = done;
        t
    }

    fn user() -> UserInfo {
        UserInfo {
            name: "oauthName".to_string(),
            picture: "oauthPicture".to_string(),
        }
    }

    fn loaded() -> TaskStore {
        let mut store = TaskStore::new();
        store.load(
            user(),
            vec![task(1, true), task(2, false), task(3, true), task(4, false), task(5, false)],
        );
        store
    }

    fn ids(store: &TaskStore) -> Vec<i64> {
        store.tasks().iter().map(|t| t.id.0).collect()
    }

    #[test]
    fn test_load_in_either_order() {
        let mut store = TaskStore::new();
        assert!(!store.is_loaded());

        store.load_tasks(vec![task(1, false)]);
        assert!(!store.is_loaded());
        store.load_user(user());
        assert!(store.is_loaded());

        let mut other = TaskStore::new();
        other.load_user(user());
        other.load_tasks(Vec::new());
        assert!(other.is_loaded());
        assert!(other.tasks().is_empty());
    }

    #[test]
    fn test_user_is_set_once() {
        let mut store = loaded();
        store.load_user(UserInfo {
            name: "someone else".to_string(),
            picture: String::new(),
        });
        assert_eq!(store.user().unwrap().name, "oauthName");
    }

    #[test]
    fn test_apply_done_and_pin() {
        let mut store = loaded();
        assert!(store.apply_done_confirmed(TaskId(2), true));
        assert!(store.apply_pin_confirmed(TaskId(3), true));

        assert!(store.tasks()[1].done);
        assert!(store.tasks()[2].pin);
    }

    #[test]
    fn test_get_reads_live_entry() {
        let mut store = loaded();
        store.apply_pin_confirmed(TaskId(2), true);
        assert!(store.get(TaskId(2)).is_some_and(|t| t.pin));
        assert!(store.get(TaskId(99)).is_none());
    }

    #[test]
    fn test_apply_to_unknown_id_is_noop() {
        let mut store = loaded();
        let before = store.tasks().to_vec();

        assert!(!store.apply_done_confirmed(TaskId(99), true));
        assert!(!store.apply_pin_confirmed(TaskId(99), true));
        assert_eq!(store.tasks(), &before[..]);
    }

    #[test]
    fn test_stage_edit_sets_candidate_and_literal() {
        let mut store = loaded();
        let candidate = task(1, false);
        store.stage_edit(candidate.clone(), "2018-11-08T05:27".to_string());

        assert_eq!(store.edit_candidate(), Some(&candidate));
        assert_eq!(store.edit_due(), "2018-11-08T05:27");
    }

    #[test]
    fn test_confirm_edit_replaces_only_matching_task() {
        let mut store = loaded();
        let before = store.tasks().to_vec();

        let mut edited = task(4, false);
        edited.task = "Renamed".to_string();
        edited.due = DateTime::parse_from_rfc3339("2019-01-01T09:00:00+07:00").unwrap();
        assert!(store.confirm_edit(edited.clone()));

        assert_eq!(store.tasks()[3], edited);
        for (i, t) in store.tasks().iter().enumerate() {
            if i != 3 {
                assert_eq!(t, &before[i]);
            }
        }
    }

    #[test]
    fn test_confirm_edit_unknown_is_noop() {
        let mut store = loaded();
        let before = store.tasks().to_vec();
        assert!(!store.confirm_edit(task(42, false)));
        assert_eq!(store.tasks(), &before[..]);
    }

    #[test]
    fn test_confirm_delete_removes_one_and_keeps_order() {
        let mut store = loaded();
        store.stage_delete(task(3, true));
        assert_eq!(store.delete_candidate().map(|t| t.id), Some(TaskId(3)));

        assert!(store.confirm_delete());
        assert_eq!(ids(&store), vec![1, 2, 4, 5]);
        assert!(store.delete_candidate().is_none());
    }

    #[test]
    fn test_confirm_delete_without_candidate_is_noop() {
        let mut store = loaded();
        assert!(!store.confirm_delete());
        assert_eq!(ids(&store), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_confirm_delete_unknown_clears_candidate() {
        let mut store = loaded();
        store.stage_delete(task(77, false));
        assert!(!store.confirm_delete());
        assert!(store.delete_candidate().is_none());
        assert_eq!(ids(&store), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_delete_of_other_task_keeps_candidate() {
        let mut store = loaded();
        store.stage_delete(task(5, false));
        assert!(store.apply_delete_confirmed(TaskId(1)));
        assert_eq!(store.delete_candidate().map(|t| t.id), Some(TaskId(5)));
    }
}
