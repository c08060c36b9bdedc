//! # Task System Core Traits
//!
//! This module defines the fundamental building blocks of the task system.
//!
//! ## Task Lifecycle
//! 1. A `Task` is published via `TaskManager::publish_task()`
//! 2. The task's `process()` method is called on a worker thread
//! 3. The task returns a boxed `TaskResult`
//! 4. The result's `handle_result()` is called on the owner thread with the world
//!
//! ## Thread Safety
//! - `Task` must be `Send` to be transferred to a worker
//! - `TaskResult` must be `Send` to be transferred back to the owner thread
//! - Anything a task shares with the owner goes through an `MtResource`

use crate::engine_state::voxels::world::World;

/// A unit of work executed on a worker thread.
///
/// Tasks own everything they need: shared chunk handles, the terrain generator or
/// the tile atlas behind an `Arc`. They never receive the world itself.
pub trait Task: Send {
    /// Performs the work and returns a result for the owner thread.
    ///
    /// Runs to completion; there is no cancellation.
    fn process(&self) -> Box<dyn TaskResult + Send>;
}

/// The outcome of a `Task`, consumed on the owner thread.
pub trait TaskResult: Send {
    /// Applies the result to the world.
    ///
    /// Runs on the owner thread while it drains completed tasks, so it may touch
    /// any chunk without racing the owner's own edits. Keep it cheap.
    fn handle_result(self: Box<Self>, world: &mut World);
}
