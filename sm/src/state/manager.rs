//! ScrumStore - actor that owns the live ScrumData
//!
//! Local mutations are serialized through the actor. Task mutations go to
//! the remote API first and, on success, the full task list is fetched again
//! and handed to the actor to rebuild the backlog and active sprint. After
//! every change the actor saves the aggregate and publishes a snapshot.

use chrono::NaiveDate;
use keystore::KeyStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use crate::api::{ApiTask, TaskApi, TaskPatch, TaskRequest};
use crate::domain::{NewSprint, NewTask, Role, ScrumData, Sprint, Task, TaskStatus, new_sprint_id, seed};

use super::messages::{StoreCommand, StoreError, StoreResponse};

/// Holds the loading flag up for as long as it lives
struct LoadingGuard {
    in_flight: Arc<AtomicUsize>,
}

impl LoadingGuard {
    fn new(in_flight: &Arc<AtomicUsize>) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self {
            in_flight: Arc::clone(in_flight),
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// The server's ids are numeric; local ids are their decimal form
fn parse_task_id(task_id: &str) -> StoreResponse<u64> {
    task_id
        .trim()
        .parse()
        .map_err(|_| StoreError::InvalidTaskId(task_id.to_string()))
}

/// Saves every committed state under one key
struct Persistence {
    keystore: KeyStore,
    key: String,
}

/// Handle to the Scrum state actor
#[derive(Clone)]
pub struct ScrumStore {
    tx: mpsc::Sender<StoreCommand>,
    state_rx: watch::Receiver<ScrumData>,
    api: Arc<dyn TaskApi>,
    in_flight: Arc<AtomicUsize>,
}

impl ScrumStore {
    /// Spawn the store actor
    ///
    /// Restores the aggregate saved under `key`, or starts from the seed
    /// dataset when nothing usable is stored.
    pub fn spawn(api: Arc<dyn TaskApi>, keystore: KeyStore, key: impl Into<String>) -> Self {
        let key = key.into();
        debug!(%key, "spawn: called");

        let data = match keystore.load::<ScrumData>(&key) {
            Some(data) => {
                info!(
                    backlog = data.product_backlog.len(),
                    sprints = data.sprints.len(),
                    "Restored saved Scrum data"
                );
                data
            }
            None => {
                info!("No saved Scrum data, starting from seed");
                seed::initial_data()
            }
        };

        let persistence = Persistence { keystore, key };
        persistence.keystore.save(&persistence.key, &data);

        let (tx, rx) = mpsc::channel(64);
        let (state_tx, state_rx) = watch::channel(data.clone());

        tokio::spawn(actor_loop(data, persistence, state_tx, rx));

        info!("ScrumStore spawned");

        Self {
            tx,
            state_rx,
            api,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Current state
    pub fn snapshot(&self) -> ScrumData {
        self.state_rx.borrow().clone()
    }

    /// Receive every published state
    pub fn subscribe(&self) -> watch::Receiver<ScrumData> {
        self.state_rx.clone()
    }

    /// True while any remote-backed operation is in flight
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn current_role(&self) -> Role {
        self.state_rx.borrow().current_role
    }

    fn loading(&self) -> LoadingGuard {
        LoadingGuard::new(&self.in_flight)
    }

    async fn ask<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> StoreCommand) -> StoreResponse<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(make(reply_tx))
            .await
            .map_err(|_| StoreError::ChannelError)?;
        reply_rx.await.map_err(|_| StoreError::ChannelError)
    }

    // === Local operations ===

    pub async fn set_current_role(&self, role: Role) -> StoreResponse<()> {
        debug!(%role, "set_current_role: called");
        self.ask(|reply| StoreCommand::SetRole { role, reply }).await
    }

    /// Flip the tutorial flag, returning the new value
    pub async fn toggle_tutorial(&self) -> StoreResponse<bool> {
        debug!("toggle_tutorial: called");
        self.ask(|reply| StoreCommand::ToggleTutorial { reply }).await
    }

    /// Replace everything with the seed dataset
    pub async fn reset_data(&self) -> StoreResponse<()> {
        debug!("reset_data: called");
        self.ask(|reply| StoreCommand::Reset { reply }).await
    }

    /// Create a sprint with a fresh id, returning the id
    pub async fn add_sprint(&self, sprint: NewSprint) -> StoreResponse<String> {
        let id = new_sprint_id();
        debug!(%id, name = %sprint.name, is_active = sprint.is_active, "add_sprint: called");
        let sprint = sprint.into_sprint(id.clone());
        self.ask(|reply| StoreCommand::AddSprint { sprint, reply }).await?;
        Ok(id)
    }

    /// Replace a sprint by id; false if no sprint has that id
    ///
    /// Activating an unknown id still deactivates every sprint.
    pub async fn update_sprint(&self, sprint: Sprint) -> StoreResponse<bool> {
        debug!(sprint_id = %sprint.id, is_active = sprint.is_active, "update_sprint: called");
        self.ask(|reply| StoreCommand::UpdateSprint { sprint, reply }).await
    }

    /// Delete a sprint, returning its tasks to the backlog
    ///
    /// Yields the number of tasks moved back, `None` if the id is unknown.
    pub async fn delete_sprint(&self, sprint_id: &str) -> StoreResponse<Option<usize>> {
        debug!(%sprint_id, "delete_sprint: called");
        let sprint_id = sprint_id.to_string();
        self.ask(|reply| StoreCommand::DeleteSprint { sprint_id, reply }).await
    }

    pub async fn add_daily_note(&self, sprint_id: &str, date: NaiveDate, note: impl Into<String>) -> StoreResponse<bool> {
        debug!(%sprint_id, %date, "add_daily_note: called");
        let sprint_id = sprint_id.to_string();
        let note = note.into();
        self.ask(|reply| StoreCommand::AddDailyNote {
            sprint_id,
            date,
            note,
            reply,
        })
        .await
    }

    // === Remote-backed operations ===

    /// Create a task remotely, then reload
    ///
    /// Only a rejected create is an error; see `reload_after_mutation`.
    pub async fn add_task(&self, task: NewTask) -> StoreResponse<()> {
        debug!(title = %task.title, status = %task.status, "add_task: called");
        let _loading = self.loading();

        self.api
            .create_task(&TaskRequest::from(&task))
            .await
            .inspect_err(|e| warn!(error = %e, "add_task: create failed"))?;
        info!(title = %task.title, "Task created");

        self.reload_after_mutation("add_task").await;
        Ok(())
    }

    /// Send every field of the task to the server, then reload
    ///
    /// Nothing local changes unless the server accepts the update.
    pub async fn update_task(&self, task: Task) -> StoreResponse<()> {
        debug!(task_id = %task.id, status = %task.status, "update_task: called");
        let _loading = self.loading();
        let id = parse_task_id(&task.id)?;

        self.api
            .update_task(id, &TaskPatch::from(&task))
            .await
            .inspect_err(|e| warn!(task_id = %task.id, error = %e, "update_task: update failed"))?;
        info!(task_id = %task.id, "Task updated");

        self.reload_after_mutation("update_task").await;
        Ok(())
    }

    /// Delete a task remotely, then reload
    pub async fn delete_task(&self, task_id: &str) -> StoreResponse<()> {
        debug!(%task_id, "delete_task: called");
        let _loading = self.loading();
        let id = parse_task_id(task_id)?;

        self.api
            .delete_task(id)
            .await
            .inspect_err(|e| warn!(%task_id, error = %e, "delete_task: delete failed"))?;
        info!(%task_id, "Task deleted");

        self.reload_after_mutation("delete_task").await;
        Ok(())
    }

    /// Change a task's status wherever it currently is
    ///
    /// Returns false without calling the server when no task has the id.
    /// `sprint_id` names the drop target; the task API has no sprint field,
    /// so it does not reach the update payload.
    pub async fn move_task(&self, task_id: &str, new_status: TaskStatus, sprint_id: Option<&str>) -> StoreResponse<bool> {
        debug!(%task_id, %new_status, ?sprint_id, "move_task: called");
        let _loading = self.loading();

        let Some(task) = self.snapshot().find_task(task_id).cloned() else {
            debug!(%task_id, "move_task: task not found");
            return Ok(false);
        };

        self.update_task(task.with_status(new_status)).await?;
        Ok(true)
    }

    /// Fetch all tasks and rebuild the backlog and the active sprint
    pub async fn load_tasks_from_api(&self) -> StoreResponse<()> {
        debug!("load_tasks_from_api: called");
        let _loading = self.loading();
        self.reload().await
    }

    /// Refresh after a change the server already accepted
    ///
    /// A failed refresh keeps the previous snapshot and is not reported to the
    /// caller; the change itself went through.
    async fn reload_after_mutation(&self, operation: &str) {
        if let Err(e) = self.reload().await {
            warn!(operation, error = %e, "reload after mutation failed, keeping previous state");
        }
    }

    async fn reload(&self) -> StoreResponse<()> {
        let api_tasks = self
            .api
            .list_tasks()
            .await
            .inspect_err(|e| warn!(error = %e, "reload: list failed"))?;

        let tasks: Vec<Task> = api_tasks.into_iter().filter_map(ApiTask::into_task).collect();
        debug!(task_count = tasks.len(), "reload: fetched tasks");

        self.ask(|reply| StoreCommand::ApplyRemoteTasks { tasks, reply }).await
    }

    /// Stop the actor; the last published state stays readable
    pub async fn shutdown(&self) -> StoreResponse<()> {
        debug!("shutdown: called");
        self.tx
            .send(StoreCommand::Shutdown)
            .await
            .map_err(|_| StoreError::ChannelError)
    }
}

/// The actor loop that owns the ScrumData and processes commands
async fn actor_loop(
    mut data: ScrumData,
    persistence: Persistence,
    state_tx: watch::Sender<ScrumData>,
    mut rx: mpsc::Receiver<StoreCommand>,
) {
    debug!("actor_loop: started");

    // Save, then publish, so a caller that saw its reply can read both
    let commit = |data: &ScrumData| {
        persistence.keystore.save(&persistence.key, data);
        state_tx.send_replace(data.clone());
    };

    while let Some(cmd) = rx.recv().await {
        match cmd {
            StoreCommand::SetRole { role, reply } => {
                debug!(%role, "actor_loop: SetRole command");
                data.set_role(role);
                commit(&data);
                let _ = reply.send(());
            }
            StoreCommand::ToggleTutorial { reply } => {
                debug!("actor_loop: ToggleTutorial command");
                data.toggle_tutorial();
                commit(&data);
                let _ = reply.send(data.show_tutorial);
            }
            StoreCommand::Reset { reply } => {
                debug!("actor_loop: Reset command");
                data = seed::initial_data();
                commit(&data);
                info!("Scrum data reset to seed");
                let _ = reply.send(());
            }
            StoreCommand::AddSprint { sprint, reply } => {
                debug!(sprint_id = %sprint.id, "actor_loop: AddSprint command");
                data.add_sprint(sprint);
                commit(&data);
                let _ = reply.send(());
            }
            StoreCommand::UpdateSprint { sprint, reply } => {
                debug!(sprint_id = %sprint.id, "actor_loop: UpdateSprint command");
                let activating = sprint.is_active;
                let found = data.update_sprint(sprint);
                if found || activating {
                    commit(&data);
                }
                let _ = reply.send(found);
            }
            StoreCommand::DeleteSprint { sprint_id, reply } => {
                debug!(%sprint_id, "actor_loop: DeleteSprint command");
                let moved = data.delete_sprint(&sprint_id);
                if let Some(count) = moved {
                    info!(%sprint_id, moved = count, "Sprint deleted, tasks returned to backlog");
                    commit(&data);
                }
                let _ = reply.send(moved);
            }
            StoreCommand::AddDailyNote {
                sprint_id,
                date,
                note,
                reply,
            } => {
                debug!(%sprint_id, "actor_loop: AddDailyNote command");
                let found = data.add_daily_note(&sprint_id, date, note);
                if found {
                    commit(&data);
                }
                let _ = reply.send(found);
            }
            StoreCommand::ApplyRemoteTasks { tasks, reply } => {
                debug!(task_count = tasks.len(), "actor_loop: ApplyRemoteTasks command");
                data.apply_remote_tasks(&tasks);
                commit(&data);
                let _ = reply.send(());
            }
            StoreCommand::Shutdown => {
                debug!("actor_loop: Shutdown command");
                break;
            }
        }
    }

    debug!("actor_loop: stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::mock::{ApiCall, MockTaskApi};
    use crate::api::{ApiError, TaskApi};
    use async_trait::async_trait;
    use keystore::MemoryBackend;
    use serde_json::Value;
    use tokio::sync::Notify;

    const KEY: &str = "scrumData";

    fn api_task(id: u64, title: &str, status: &str) -> ApiTask {
        ApiTask {
            id,
            title: title.to_string(),
            description: String::new(),
            assignee: String::new(),
            story_points: 2,
            status: status.to_string(),
        }
    }

    fn setup(tasks: Vec<ApiTask>) -> (ScrumStore, Arc<MockTaskApi>, KeyStore) {
        let api = Arc::new(MockTaskApi::new(tasks));
        let keystore = KeyStore::new(MemoryBackend::new());
        let store = ScrumStore::spawn(api.clone(), keystore.clone(), KEY);
        (store, api, keystore)
    }

    #[tokio::test]
    async fn test_spawn_without_saved_data_uses_seed_and_saves_it() {
        let (store, _api, keystore) = setup(vec![]);

        assert_eq!(store.snapshot(), seed::initial_data());
        assert_eq!(keystore.load::<ScrumData>(KEY), Some(seed::initial_data()));

        store.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_spawn_restores_saved_data() {
        let keystore = KeyStore::new(MemoryBackend::new());
        let mut saved = ScrumData::empty("Saved project");
        saved.current_role = Role::ScrumMaster;
        keystore.save(KEY, &saved);

        let store = ScrumStore::spawn(Arc::new(MockTaskApi::new(vec![])), keystore, KEY);
        assert_eq!(store.snapshot(), saved);
        assert_eq!(store.current_role(), Role::ScrumMaster);
    }

    #[tokio::test]
    async fn test_delete_seed_sprint() {
        let (store, api, keystore) = setup(vec![]);

        let moved = store.delete_sprint("sprint-1").await.unwrap();
        assert_eq!(moved, Some(3));

        let data = store.snapshot();
        assert_eq!(data.product_backlog.len(), 8);
        assert!(data.sprints.is_empty());
        assert_eq!(keystore.load::<ScrumData>(KEY), Some(data));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_sprint_is_noop() {
        let (store, _api, _keystore) = setup(vec![]);
        assert_eq!(store.delete_sprint("nope").await.unwrap(), None);
        assert_eq!(store.snapshot(), seed::initial_data());
    }

    #[tokio::test]
    async fn test_add_active_sprint_flips_existing() {
        let (store, _api, _keystore) = setup(vec![]);

        let id = store
            .add_sprint(NewSprint::starting_now("Sprint 2", "Payments", true))
            .await
            .unwrap();

        let data = store.snapshot();
        assert_eq!(data.sprints.len(), 2);
        assert!(!data.sprint("sprint-1").unwrap().is_active);
        assert!(data.sprint(&id).unwrap().is_active);
        assert!(data.sprint(&id).unwrap().tasks.is_empty());
    }

    #[tokio::test]
    async fn test_update_sprint_activation() {
        let (store, _api, _keystore) = setup(vec![]);
        let id = store
            .add_sprint(NewSprint::starting_now("Sprint 2", "", false))
            .await
            .unwrap();

        let mut sprint = store.snapshot().sprint(&id).unwrap().clone();
        sprint.is_active = true;
        assert!(store.update_sprint(sprint).await.unwrap());

        let data = store.snapshot();
        assert_eq!(data.active_sprint().unwrap().id, id);
        assert_eq!(data.active_sprint_count(), 1);
    }

    #[tokio::test]
    async fn test_move_unknown_task_is_noop() {
        let (store, api, _keystore) = setup(vec![]);
        let before = store.snapshot();

        let moved = store.move_task("task-404", TaskStatus::Done, None).await.unwrap();

        assert!(!moved);
        assert_eq!(store.snapshot(), before);
        assert!(api.calls().is_empty());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_move_task_updates_remote_and_reloads() {
        let (store, api, _keystore) = setup(vec![api_task(3, "Wire login", "todo"), api_task(4, "Docs", "product-backlog")]);
        store.load_tasks_from_api().await.unwrap();
        assert_eq!(store.snapshot().board_column(TaskStatus::Todo)[0].id, "3");

        let moved = store.move_task("3", TaskStatus::Done, Some("sprint-1")).await.unwrap();
        assert!(moved);

        let calls = api.calls();
        assert_eq!(calls.len(), 3);
        match &calls[1] {
            ApiCall::Update(id, patch) => {
                assert_eq!(*id, 3);
                assert_eq!(patch.status, Some(TaskStatus::Done));
                assert_eq!(patch.title.as_deref(), Some("Wire login"));
            }
            other => panic!("expected update, got {:?}", other),
        }
        assert_eq!(calls[2], ApiCall::List);

        let data = store.snapshot();
        assert_eq!(data.board_column(TaskStatus::Done)[0].id, "3");
        assert!(data.board_column(TaskStatus::Todo).is_empty());
    }

    #[tokio::test]
    async fn test_add_task_then_reload_places_in_backlog() {
        let (store, api, keystore) = setup(vec![]);

        store
            .add_task(NewTask::new("X", TaskStatus::ProductBacklog))
            .await
            .unwrap();

        let data = store.snapshot();
        assert!(data.product_backlog.iter().any(|t| t.title == "X"));
        assert!(matches!(api.calls()[0], ApiCall::Create(_)));
        assert_eq!(keystore.load::<ScrumData>(KEY), Some(data));
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_reload_replaces_partitions() {
        let (store, _api, _keystore) = setup(vec![
            api_task(1, "Backlog item", "product-backlog"),
            api_task(2, "Reserved", "sprint-backlog"),
            api_task(3, "Doing item", "doing"),
        ]);

        store.load_tasks_from_api().await.unwrap();

        let data = store.snapshot();
        assert_eq!(data.product_backlog.len(), 1);
        assert_eq!(data.active_sprint().unwrap().tasks.len(), 1);
        assert!(data.find_task("2").is_none());
        // Seed tasks are gone: the server is the source of truth
        assert!(data.find_task("task-1").is_none());
    }

    #[tokio::test]
    async fn test_update_failure_propagates_and_keeps_state() {
        let (store, api, _keystore) = setup(vec![api_task(5, "Item", "product-backlog")]);
        store.load_tasks_from_api().await.unwrap();
        let before = store.snapshot();

        api.fail_with(400, "storyPoints must be positive");
        let mut task = before.find_task("5").unwrap().clone();
        task.story_points = 0;
        let err = store.update_task(task).await.unwrap_err();

        match err {
            StoreError::Api(e) => assert_eq!(e.to_string(), "API error 400: storyPoints must be positive"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(store.snapshot(), before);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_non_numeric_task_id_never_reaches_server() {
        let (store, api, _keystore) = setup(vec![]);

        let err = store.move_task("task-2", TaskStatus::Todo, None).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidTaskId(ref id) if id == "task-2"));

        let err = store.delete_task("abc").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidTaskId(_)));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_task_reloads() {
        let (store, api, _keystore) = setup(vec![api_task(9, "Gone soon", "product-backlog")]);
        store.load_tasks_from_api().await.unwrap();
        assert!(store.snapshot().find_task("9").is_some());

        store.delete_task("9").await.unwrap();
        assert!(store.snapshot().find_task("9").is_none());
        assert!(api.tasks().is_empty());
    }

    #[tokio::test]
    async fn test_reload_failure_keeps_state() {
        let (store, api, _keystore) = setup(vec![]);
        api.fail_with(503, "failed to list tasks");

        assert!(store.load_tasks_from_api().await.is_err());
        assert_eq!(store.snapshot(), seed::initial_data());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_reset_data_persists_seed() {
        let (store, _api, keystore) = setup(vec![]);
        store.delete_sprint("sprint-1").await.unwrap();
        store.set_current_role(Role::ProductOwner).await.unwrap();

        store.reset_data().await.unwrap();

        assert_eq!(keystore.load::<ScrumData>(KEY), Some(seed::initial_data()));
        assert_eq!(store.snapshot(), seed::initial_data());
    }

    #[tokio::test]
    async fn test_toggle_tutorial_and_role() {
        let (store, _api, keystore) = setup(vec![]);

        assert!(!store.toggle_tutorial().await.unwrap());
        store.set_current_role(Role::ScrumMaster).await.unwrap();

        let saved = keystore.load::<ScrumData>(KEY).unwrap();
        assert!(!saved.show_tutorial);
        assert_eq!(saved.current_role, Role::ScrumMaster);
    }

    #[tokio::test]
    async fn test_add_daily_note() {
        let (store, _api, _keystore) = setup(vec![]);
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();

        assert!(store.add_daily_note("sprint-1", date, "Retro moved").await.unwrap());
        assert!(!store.add_daily_note("sprint-9", date, "x").await.unwrap());

        let notes = &store.snapshot().sprints[0].daily_notes;
        assert_eq!(notes.get("2024-06-03").map(String::as_str), Some("Retro moved"));
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let (store, _api, _keystore) = setup(vec![]);
        let mut rx = store.subscribe();
        rx.borrow_and_update();

        store.set_current_role(Role::ProductOwner).await.unwrap();

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().current_role, Role::ProductOwner);
    }

    #[tokio::test]
    async fn test_loading_guard_counts() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        {
            let _a = LoadingGuard::new(&in_flight);
            let _b = LoadingGuard::new(&in_flight);
            assert_eq!(in_flight.load(Ordering::SeqCst), 2);
        }
        assert_eq!(in_flight.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_operations_after_shutdown_fail() {
        let (store, _api, _keystore) = setup(vec![]);
        store.shutdown().await.unwrap();
        // Give the actor time to exit
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        let err = store.toggle_tutorial().await.unwrap_err();
        assert!(matches!(err, StoreError::ChannelError));
    }

    /// Accepts every change but cannot list tasks
    #[derive(Default)]
    struct ListDownApi {
        creates: AtomicUsize,
        deletes: AtomicUsize,
    }

    #[async_trait]
    impl TaskApi for ListDownApi {
        async fn list_tasks(&self) -> Result<Vec<ApiTask>, ApiError> {
            Err(ApiError::Status {
                status: 503,
                message: "down".to_string(),
            })
        }

        async fn create_task(&self, _task: &TaskRequest) -> Result<Value, ApiError> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            Ok(Value::Null)
        }

        async fn update_task(&self, _id: u64, _patch: &TaskPatch) -> Result<Value, ApiError> {
            Ok(Value::Null)
        }

        async fn delete_task(&self, _id: u64) -> Result<(), ApiError> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Holds `list_tasks` open until released
    #[derive(Default)]
    struct GatedApi {
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl TaskApi for GatedApi {
        async fn list_tasks(&self) -> Result<Vec<ApiTask>, ApiError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(Vec::new())
        }

        async fn create_task(&self, _task: &TaskRequest) -> Result<Value, ApiError> {
            Ok(Value::Null)
        }

        async fn update_task(&self, _id: u64, _patch: &TaskPatch) -> Result<Value, ApiError> {
            Ok(Value::Null)
        }

        async fn delete_task(&self, _id: u64) -> Result<(), ApiError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_accepted_change_succeeds_when_reload_fails() {
        let api = Arc::new(ListDownApi::default());
        let store = ScrumStore::spawn(api.clone(), KeyStore::new(MemoryBackend::new()), KEY);

        store
            .add_task(NewTask::new("X", TaskStatus::ProductBacklog))
            .await
            .unwrap();
        store.delete_task("12").await.unwrap();

        assert_eq!(api.creates.load(Ordering::SeqCst), 1);
        assert_eq!(api.deletes.load(Ordering::SeqCst), 1);
        assert_eq!(store.snapshot(), seed::initial_data());
        assert!(!store.is_loading());

        // A plain reload still reports the failure
        assert!(store.load_tasks_from_api().await.is_err());
    }

    #[tokio::test]
    async fn test_is_loading_while_remote_call_in_flight() {
        let api = Arc::new(GatedApi::default());
        let store = ScrumStore::spawn(api.clone(), KeyStore::new(MemoryBackend::new()), KEY);
        assert!(!store.is_loading());

        let pending = tokio::spawn({
            let store = store.clone();
            async move { store.load_tasks_from_api().await }
        });

        api.entered.notified().await;
        assert!(store.is_loading());

        api.release.notify_one();
        pending.await.unwrap().unwrap();
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_activating_unknown_sprint_is_saved() {
        let (store, _api, keystore) = setup(vec![]);
        let ghost = NewSprint::starting_now("Ghost", "", true).into_sprint("sprint-ghost".to_string());

        assert!(!store.update_sprint(ghost).await.unwrap());

        let data = store.snapshot();
        assert_eq!(data.active_sprint_count(), 0);
        assert_eq!(keystore.load::<ScrumData>(KEY), Some(data));
    }

    #[test]
    fn test_parse_task_id() {
        assert_eq!(parse_task_id("42").unwrap(), 42);
        assert!(parse_task_id("task-1").is_err());
        assert!(parse_task_id("").is_err());
    }

    #[tokio::test]
    async fn test_mock_is_a_task_api() {
        let api: Arc<dyn TaskApi> = Arc::new(MockTaskApi::new(vec![api_task(1, "a", "todo")]));
        assert_eq!(api.list_tasks().await.unwrap().len(), 1);
    }
}
