mod partition;
mod observer;
mod simulation;

pub use partition::partition_ranges;
pub use observer::*;
pub use simulation::*;

#[cfg(test)]
mod partition_tests;
