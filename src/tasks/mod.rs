//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - TTL Cleanup: Sweeps expired item snapshots out of the in-memory cache backend

mod cleanup;

pub use cleanup::spawn_cleanup_task;
