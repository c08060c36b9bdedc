//! Background tasks for the rendering system.
//!
//! # Available Tasks
//! - `ChunkMeshGenerationTask`: Builds chunk meshes off the owner thread

pub mod chunk_mesh_generation_task;
