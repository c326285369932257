//! Durable on-disk state
//!
//! Both files are plain text so they stay readable after an unclean
//! shutdown, which is exactly when they matter.

mod atomic;
pub mod queue;
pub mod state_file;

pub use atomic::StagedWrite;
pub use queue::PendingQueue;
pub use state_file::StateStore;
