//! In-memory task repository - used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use depot_core::domain::Task;
use depot_core::error::RepoError;
use depot_core::ports::TaskRepository;

/// In-memory task repository using a HashMap with async RwLock.
///
/// Note: Tasks are lost on process restart.
pub struct InMemoryTaskRepository {
    store: RwLock<HashMap<Uuid, Task>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn save(&self, task: Task) -> Result<Task, RepoError> {
        let mut store = self.store.write().await;
        store.insert(task.id, task.clone());
        Ok(task)
    }

    async fn list(&self) -> Result<Vec<Task>, RepoError> {
        let store = self.store.read().await;
        let mut tasks: Vec<Task> = store.values().cloned().collect();
        tasks.sort_by_key(|task| task.created_at);
        Ok(tasks)
    }
}
