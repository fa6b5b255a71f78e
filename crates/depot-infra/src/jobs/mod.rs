//! Task queue implementations.

mod memory;

pub use memory::{InMemoryTaskQueue, InMemoryTaskQueueConfig};
