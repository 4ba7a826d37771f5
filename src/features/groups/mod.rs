pub mod client;
pub mod types;

pub use client::{create, delete, list, rename};
pub use types::Group;
