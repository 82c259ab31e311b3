mod vertex;
mod edge;

pub use vertex::*;
pub use edge::*;
