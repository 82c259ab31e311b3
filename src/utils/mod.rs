pub mod errors;
mod constants;
mod constants_config;
mod random_effects;

pub use errors::SimulationError;
pub use constants::*;
pub use constants_config::*;
pub use random_effects::*;

#[cfg(test)]
mod constants_config_tests;
#[cfg(test)]
mod random_effects_tests;
