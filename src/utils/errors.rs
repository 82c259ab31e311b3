use std::fmt;
use std::error::Error;

use crate::models::VertexId;

/// Represents errors that can occur while building or advancing a simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// A vertex with this id is already part of the simulation (or repeated in the batch).
    DuplicateVertex(VertexId),
    /// A schedule parameter was given a NaN or infinite value.
    NonFiniteParameter { name: &'static str, value: f64 },
    /// The named force can only be applied to the whole vertex set.
    SubsetUnsupported(&'static str),
    /// A worker task panicked while evaluating a partitioned force.
    WorkerPanicked(String),
    /// The worker thread pool could not be created.
    WorkerPool(String),
    /// A previous tick failed part way through, so vertex state can no longer be trusted.
    Poisoned,
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimulationError::DuplicateVertex(id) => write!(f, "Vertex {} is already contained in the simulation", id),
            SimulationError::NonFiniteParameter { name, value } => write!(f, "Parameter {} must be finite, got {}", name, value),
            SimulationError::SubsetUnsupported(force) => write!(f, "The {} force cannot be applied to a vertex subset", force),
            SimulationError::WorkerPanicked(msg) => write!(f, "Worker panicked during force evaluation: {}", msg),
            SimulationError::WorkerPool(msg) => write!(f, "Failed to build worker pool: {}", msg),
            SimulationError::Poisoned => write!(f, "Simulation is poisoned by an earlier failed tick"),
        }
    }
}

impl Error for SimulationError {}
