//! # Voxel Engine Core
//!
//! This module contains the core voxel engine functionality, providing the foundation
//! for representing, generating and querying a voxel-based world.
//!
//! ## Architecture
//!
//! The voxel system is organized into several key components:
//!
//! * **Block**: Defines individual voxel types, their faces and their atlas tiles
//! * **Chunk**: Manages fixed-size 3D arrays of blocks together with their mesh state
//! * **Terrain**: Synthesizes chunk contents from seeded noise
//! * **World**: Coordinates chunks and provides a unified interface for the entire voxel space
//! * **Raycast**: Finds the first solid block along a ray
//! * **Tasks**: Runs chunk generation on the worker pool
//!
//! ## Data Flow
//!
//! 1. The world registers a chunk for a requested coordinate
//! 2. A generation task fills it, which marks it generated and dirty
//! 3. A meshing task rebuilds its geometry against the loaded neighbors
//! 4. Block edits re-enter at step 3 by marking the chunk dirty again
//!
//! ## Thread Safety
//!
//! * Every chunk sits behind its own `RwLock`; workers and the owner share handles
//! * Mesh builds take read locks, in a fixed order, on at most five chunks
//! * Writers only ever lock a single chunk

pub mod block;
pub mod chunk;
pub mod raycast;
pub mod tasks;
pub mod terrain;
pub mod world;
