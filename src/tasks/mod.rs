//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Retention sweep: evicts cache entries past the retention age

mod cleanup;

pub use cleanup::spawn_retention_task;
