//! # Voxel Task System
//!
//! Tasks related to voxel world generation. They run on the task manager's workers
//! so synthesis never stalls the owner thread.

pub mod chunk_generation_task;
