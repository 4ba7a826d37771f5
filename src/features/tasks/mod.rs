pub mod client;
pub mod types;

pub use client::{create, delete, list, update};
pub use types::{NewTask, Task, TaskFilter, TaskUpdate};
