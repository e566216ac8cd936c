//! Canonical in-memory task collection with optimistic mutations.
//!
//! Every mutation follows the same protocol: validate, take a value copy of
//! the affected record, apply the change locally, call the remote
//! collaborator, then either reconcile with the authoritative response or
//! restore the copy. Audit events and notifications are emitted only after
//! the remote call succeeds.
//!
//! Mutations of the same task are serialised; a second edit waits until the
//! first has been confirmed or rolled back. Mutations of different tasks
//! interleave freely, and rollback touches only the affected record, so a
//! failure on one task never reverts an in-flight change to another.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use mockable::Clock;
use serde_json::{Map, Value};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use super::activity::{MutationKind, activity_message};
use super::{TaskStoreError, TaskStoreResult};
use crate::board::{BoardColumns, BoardQuery, project};
use crate::config::StoreConfig;
use crate::task::{
    domain::{Task, TaskAction, TaskDraft, TaskEvent, TaskId, TaskPatch, TaskStatus, TaskView},
    ports::{Notification, Notifier, TaskRemote},
};
use crate::user::{
    domain::{User, UserId},
    ports::UserDirectory,
};

#[derive(Debug, Default)]
struct StoreState {
    tasks: Vec<TaskView>,
    events: VecDeque<TaskEvent>,
}

/// Value copy of a record taken before an optimistic change.
struct Snapshot {
    index: usize,
    previous: TaskView,
}

/// Raises a shared in-flight counter for its lifetime.
struct FlagGuard<'a>(&'a AtomicUsize);

impl<'a> FlagGuard<'a> {
    fn raise(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Client-side owner of the task collection and its audit log.
///
/// The store is bound to the acting (signed-in) user, whose name appears in
/// audit events and activity notifications. Share it behind an [`Arc`] to
/// issue overlapping operations.
pub struct TaskStore<R, C>
where
    R: TaskRemote,
    C: Clock + Send + Sync,
{
    remote: Arc<R>,
    users: Arc<dyn UserDirectory>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<C>,
    actor: UserId,
    config: StoreConfig,
    state: RwLock<StoreState>,
    task_locks: Mutex<HashMap<TaskId, Arc<AsyncMutex<()>>>>,
    mutations_in_flight: AtomicUsize,
    loads_in_flight: AtomicUsize,
}

impl<R, C> TaskStore<R, C>
where
    R: TaskRemote,
    C: Clock + Send + Sync,
{
    /// Creates an empty store acting as `actor`.
    ///
    /// Call [`TaskStore::load`] to populate it.
    #[must_use]
    pub fn new(
        remote: Arc<R>,
        users: Arc<dyn UserDirectory>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<C>,
        actor: UserId,
    ) -> Self {
        Self {
            remote,
            users,
            notifier,
            clock,
            actor,
            config: StoreConfig::default(),
            state: RwLock::new(StoreState::default()),
            task_locks: Mutex::new(HashMap::new()),
            mutations_in_flight: AtomicUsize::new(0),
            loads_in_flight: AtomicUsize::new(0),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the acting user.
    #[must_use]
    pub const fn actor(&self) -> &UserId {
        &self.actor
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns `true` while a load is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loads_in_flight.load(Ordering::SeqCst) > 0
    }

    /// Returns `true` while any mutation is in flight.
    ///
    /// Advisory only: it lets the presentation layer disable controls but
    /// does not block further calls.
    #[must_use]
    pub fn is_mutating(&self) -> bool {
        self.mutations_in_flight.load(Ordering::SeqCst) > 0
    }

    /// Returns a value copy of the current collection.
    #[must_use]
    pub fn tasks(&self) -> Vec<TaskView> {
        self.read_state().tasks.clone()
    }

    /// Returns the audit log, most recent first.
    #[must_use]
    pub fn events(&self) -> Vec<TaskEvent> {
        self.read_state().events.iter().cloned().collect()
    }

    /// Returns a single task from local state.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<TaskView> {
        self.read_state()
            .tasks
            .iter()
            .find(|view| view.task().id() == id)
            .cloned()
    }

    /// Returns the tasks currently in `status`, in collection order.
    #[must_use]
    pub fn get_by_status(&self, status: TaskStatus) -> Vec<TaskView> {
        self.read_state()
            .tasks
            .iter()
            .filter(|view| view.task().status() == status)
            .cloned()
            .collect()
    }

    /// Looks up a user in the reference directory.
    ///
    /// Returns `None` rather than failing when the id does not resolve.
    #[must_use]
    pub fn resolve_user(&self, id: &UserId) -> Option<User> {
        self.users.find_by_id(id)
    }

    /// Projects the current collection into board columns.
    #[must_use]
    pub fn board(&self, query: &BoardQuery) -> BoardColumns<TaskView> {
        project(&self.read_state().tasks, query)
    }

    /// Projects the current collection under the configured default view.
    #[must_use]
    pub fn default_board(&self) -> BoardColumns<TaskView> {
        self.board(&self.config.default_query())
    }

    /// Replaces local state with the remote collection.
    ///
    /// Previously unseen audit events from the remote history are appended
    /// to the local log.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Remote`] when listing fails; local tasks are
    /// cleared in that case.
    pub async fn load(&self) -> TaskStoreResult<()> {
        let _loading = FlagGuard::raise(&self.loads_in_flight);
        let tasks = match self.remote.list().await {
            Ok(tasks) => tasks,
            Err(err) => {
                tracing::error!(error = %err, "failed to load tasks");
                self.write_state().tasks.clear();
                self.notifier
                    .notify(Notification::error("Failed to load tasks."));
                return Err(err.into());
            }
        };

        let history = match self.remote.history().await {
            Ok(history) => history,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load task history; keeping local log");
                Vec::new()
            }
        };

        let views: Vec<TaskView> = tasks
            .into_iter()
            .map(|task| self.resolve_view(task))
            .collect();
        let count = views.len();
        {
            let mut state = self.write_state();
            state.tasks = views;
            for event in history {
                if !state.events.iter().any(|known| known.id() == event.id()) {
                    state.events.push_back(event);
                }
            }
        }
        tracing::debug!(count, "loaded tasks");
        Ok(())
    }

    /// Reloads the collection; see [`TaskStore::load`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Remote`] when listing fails.
    pub async fn refetch(&self) -> TaskStoreResult<()> {
        self.load().await
    }

    /// Refreshes one task from the remote collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::TaskNotFound`] when the remote does not know
    /// the task and [`TaskStoreError::Remote`] on other failures.
    pub async fn fetch(&self, id: TaskId) -> TaskStoreResult<TaskView> {
        match self.remote.get_by_id(id).await {
            Ok(task) => Ok(self.upsert(task)),
            Err(err) => Err(self.report("fetch", err.into())),
        }
    }

    /// Creates a task and prepends it to local state once confirmed.
    ///
    /// Nothing is inserted locally before the remote call succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Validation`] for a blank title, without
    /// contacting the remote, and [`TaskStoreError::Remote`] when creation
    /// fails.
    pub async fn create(&self, draft: TaskDraft) -> TaskStoreResult<TaskView> {
        if let Err(err) = draft.validate() {
            return Err(self.report("create", err.into()));
        }
        let _mutating = FlagGuard::raise(&self.mutations_in_flight);

        let task = match self.remote.create(&draft, &self.actor).await {
            Ok(task) => task,
            Err(err) => {
                tracing::warn!(error = %err, "remote create failed");
                return Err(self.report("create", err.into()));
            }
        };

        // A load overlapping the remote call may already hold the new task.
        let view = self.upsert(task);

        let mut metadata = Map::new();
        metadata.insert("title".to_owned(), Value::from(view.task().title()));
        metadata.insert(
            "status".to_owned(),
            Value::from(view.task().status().as_str()),
        );
        let event = self.record(view.task().id(), TaskAction::Created, metadata);
        tracing::debug!(task_id = %view.task().id(), "created task");
        self.notifier
            .notify(Notification::success("Task created successfully!"));
        self.announce(&event, view.task().title(), None);
        Ok(view)
    }

    /// Applies a patch optimistically, then confirms it remotely.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Validation`] for an empty patch or blank
    /// title, [`TaskStoreError::TaskNotFound`] for unknown tasks and
    /// [`TaskStoreError::Remote`] when confirmation fails. Local state is
    /// restored to its pre-call value on every error.
    pub async fn update(&self, id: TaskId, patch: TaskPatch) -> TaskStoreResult<TaskView> {
        self.mutate(id, patch, MutationKind::Update).await
    }

    /// Moves a task to another column.
    ///
    /// # Errors
    ///
    /// See [`TaskStore::update`].
    pub async fn change_status(&self, id: TaskId, status: TaskStatus) -> TaskStoreResult<TaskView> {
        self.mutate(
            id,
            TaskPatch::new().with_status(status),
            MutationKind::StatusChange,
        )
        .await
    }

    /// Assigns a task to a registered user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::UserNotFound`] when the user is not in the
    /// directory; otherwise see [`TaskStore::update`].
    pub async fn assign(&self, id: TaskId, user_id: UserId) -> TaskStoreResult<TaskView> {
        if self.users.find_by_id(&user_id).is_none() {
            return Err(self.report(
                MutationKind::Assignment.verb(),
                TaskStoreError::UserNotFound(user_id),
            ));
        }
        self.mutate(
            id,
            TaskPatch::new().assign_to(user_id),
            MutationKind::Assignment,
        )
        .await
    }

    /// Removes the assignee of a task.
    ///
    /// # Errors
    ///
    /// See [`TaskStore::update`].
    pub async fn unassign(&self, id: TaskId) -> TaskStoreResult<TaskView> {
        self.mutate(id, TaskPatch::new().unassign(), MutationKind::Assignment)
            .await
    }

    /// Removes a task optimistically, then confirms the removal remotely.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::TaskNotFound`] for unknown tasks and
    /// [`TaskStoreError::Remote`] when confirmation fails, in which case the
    /// task is restored at its original position.
    pub async fn delete(&self, id: TaskId) -> TaskStoreResult<()> {
        if !self.holds(id) {
            return Err(self.report("delete", TaskStoreError::TaskNotFound(id)));
        }
        let _task_lock = self.lock_task(id).await;
        let _mutating = FlagGuard::raise(&self.mutations_in_flight);

        let snapshot = match self.remove_optimistic(id) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                self.forget_lock(id);
                return Err(self.report("delete", err));
            }
        };

        match self.remote.delete(id).await {
            Ok(()) => {
                let title = snapshot.previous.task().title().to_owned();
                let mut metadata = Map::new();
                metadata.insert("title".to_owned(), Value::from(title.as_str()));
                let event = self.record(id, TaskAction::Deleted, metadata);
                tracing::debug!(task_id = %id, "deleted task");
                self.notifier
                    .notify(Notification::success("Task deleted successfully!"));
                self.announce(&event, &title, None);
                self.forget_lock(id);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(task_id = %id, error = %err, "remote delete failed; restoring task");
                self.restore(snapshot);
                Err(self.report("delete", err.into()))
            }
        }
    }

    async fn mutate(
        &self,
        id: TaskId,
        patch: TaskPatch,
        kind: MutationKind,
    ) -> TaskStoreResult<TaskView> {
        if let Err(err) = patch.validate() {
            return Err(self.report(kind.verb(), err.into()));
        }
        if !self.holds(id) {
            return Err(self.report(kind.verb(), TaskStoreError::TaskNotFound(id)));
        }
        let _task_lock = self.lock_task(id).await;
        let _mutating = FlagGuard::raise(&self.mutations_in_flight);

        let snapshot = match self.apply_optimistic(id, &patch) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                if matches!(err, TaskStoreError::TaskNotFound(_)) {
                    self.forget_lock(id);
                }
                return Err(self.report(kind.verb(), err));
            }
        };
        tracing::debug!(task_id = %id, fields = ?patch.changed_fields(), "applied optimistic update");

        match self.remote.update(id, &patch).await {
            Ok(authoritative) => {
                let view = self.reconcile(authoritative);
                let (action, metadata) =
                    kind.describe(snapshot.previous.task(), view.task(), &patch);
                let event = self.record(id, action, metadata);
                self.notifier
                    .notify(Notification::success("Task updated successfully!"));
                self.announce(&event, view.task().title(), Some(&patch));
                Ok(view)
            }
            Err(err) => {
                tracing::warn!(task_id = %id, error = %err, "remote update failed; rolling back");
                self.restore(snapshot);
                Err(self.report(kind.verb(), err.into()))
            }
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    async fn lock_task(&self, id: TaskId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self
                .task_locks
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(id).or_default())
        };
        lock.lock_owned().await
    }

    fn holds(&self, id: TaskId) -> bool {
        self.read_state()
            .tasks
            .iter()
            .any(|view| view.task().id() == id)
    }

    /// Returns how many per-task locks are currently tracked.
    #[cfg(test)]
    pub(crate) fn tracked_locks(&self) -> usize {
        self.task_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn forget_lock(&self, id: TaskId) {
        self.task_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
    }

    fn resolve_view(&self, task: Task) -> TaskView {
        let assignee = task.assigned_to().and_then(|id| self.users.find_by_id(id));
        TaskView::new(task, assignee)
    }

    fn apply_optimistic(&self, id: TaskId, patch: &TaskPatch) -> TaskStoreResult<Snapshot> {
        let mut state = self.write_state();
        let (index, slot) = state
            .tasks
            .iter_mut()
            .enumerate()
            .find(|(_, view)| view.task().id() == id)
            .ok_or(TaskStoreError::TaskNotFound(id))?;

        let previous = slot.clone();
        let mut optimistic = previous.task().clone();
        optimistic.apply_patch(patch, &*self.clock)?;
        *slot = self.resolve_view(optimistic);
        Ok(Snapshot { index, previous })
    }

    fn remove_optimistic(&self, id: TaskId) -> TaskStoreResult<Snapshot> {
        let mut state = self.write_state();
        let index = state
            .tasks
            .iter()
            .position(|view| view.task().id() == id)
            .ok_or(TaskStoreError::TaskNotFound(id))?;
        let previous = state.tasks.remove(index);
        Ok(Snapshot { index, previous })
    }

    /// Puts the snapshot back in place of the current record, or at its
    /// original position when the record has been removed.
    fn restore(&self, snapshot: Snapshot) {
        let mut state = self.write_state();
        let id = snapshot.previous.task().id();
        if let Some(slot) = state.tasks.iter_mut().find(|view| view.task().id() == id) {
            *slot = snapshot.previous;
        } else {
            let index = snapshot.index.min(state.tasks.len());
            state.tasks.insert(index, snapshot.previous);
        }
    }

    /// Replaces the local record with the authoritative one.
    fn reconcile(&self, task: Task) -> TaskView {
        let view = self.resolve_view(task);
        let mut state = self.write_state();
        let Some(slot) = state
            .tasks
            .iter_mut()
            .find(|existing| existing.task().id() == view.task().id())
        else {
            tracing::debug!(task_id = %view.task().id(), "confirmed task no longer held locally");
            return view;
        };
        *slot = view.clone();
        view
    }

    fn upsert(&self, task: Task) -> TaskView {
        let view = self.resolve_view(task);
        let mut state = self.write_state();
        if let Some(slot) = state
            .tasks
            .iter_mut()
            .find(|existing| existing.task().id() == view.task().id())
        {
            *slot = view.clone();
        } else {
            state.tasks.insert(0, view.clone());
        }
        view
    }

    fn record(&self, id: TaskId, action: TaskAction, metadata: Map<String, Value>) -> TaskEvent {
        let event = TaskEvent::new(id, self.actor.clone(), action, metadata, &*self.clock);
        self.write_state().events.push_front(event.clone());
        event
    }

    fn report(&self, operation: &str, err: TaskStoreError) -> TaskStoreError {
        self.notifier.notify(Notification::error(format!(
            "Failed to {operation} task: {err}"
        )));
        err
    }

    /// Emits the activity notification for a confirmed event after the
    /// configured delay. Skipped when the actor does not resolve.
    ///
    /// `patch` is the confirmed patch for update-shaped events.
    fn announce(&self, event: &TaskEvent, title: &str, patch: Option<&TaskPatch>) {
        let Some(actor) = self.users.find_by_id(event.user_id()) else {
            return;
        };
        let assignee_key = match event.action() {
            TaskAction::Assigned => Some("to"),
            TaskAction::Updated => Some("assigned_to"),
            TaskAction::Created | TaskAction::Deleted | TaskAction::StatusChanged => None,
        };
        let assignee = assignee_key
            .and_then(|key| event.metadata().get(key))
            .and_then(Value::as_str)
            .and_then(|raw| UserId::new(raw).ok())
            .and_then(|id| self.users.find_by_id(&id));
        let message = activity_message(
            actor.name(),
            event,
            title,
            assignee.as_ref().map(User::name),
            patch,
        );

        let delay = self.config.notification_delay();
        if delay.is_zero() {
            self.notifier.notify(Notification::info(message));
            return;
        }
        let notifier = Arc::clone(&self.notifier);
        drop(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            notifier.notify(Notification::info(message));
        }));
    }
}
