use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Task;
use crate::error::RepoError;

/// Task repository - stores tasks and their failure records.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Find a task by its unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, RepoError>;

    /// Save a task (create or update).
    async fn save(&self, task: Task) -> Result<Task, RepoError>;

    /// All known tasks, oldest first.
    async fn list(&self) -> Result<Vec<Task>, RepoError>;
}
