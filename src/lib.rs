//! Force-directed graph layout.
//!
//! Vertices are moved by a set of named [`forces`] (Barnes-Hut many-body, collision,
//! links, centering and axis pulls) under a cooling schedule driven by
//! [`simulation::Simulation`]. Spatial forces share a [`quadtree`] index that is rebuilt
//! every tick and evaluated in parallel on a rayon pool.
pub mod utils;
pub mod models;
pub mod quadtree;
pub mod forces;
pub mod simulation;
