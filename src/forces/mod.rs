mod velocity_deltas;
mod many_body;
mod collide;
mod link;
mod center;
mod positioning;
mod force;

pub use velocity_deltas::*;
pub use many_body::*;
pub use collide::*;
pub use link::*;
pub use center::*;
pub use positioning::*;
pub use force::*;

#[cfg(test)]
mod collide_tests;
#[cfg(test)]
mod link_tests;
#[cfg(test)]
mod directional_tests;
