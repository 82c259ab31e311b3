use std::fmt;

/// Caller-chosen identity of a vertex. Unique within a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u64);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for VertexId {
    fn from(id: u64) -> Self {
        VertexId(id)
    }
}

/// A movable point in the layout.
///
/// Forces write `vx`/`vy`; the simulation's integrator turns velocity into position.
/// A fixed axis keeps its coordinate for as long as the flag is set.
///
/// # Examples
///
/// ```
/// use force_graph::models::{Vertex, VertexId};
///
/// let pinned = Vertex::fixed(VertexId(7), 10.0, -4.0);
/// assert!(pinned.is_x_fixed() && pinned.is_y_fixed());
/// assert_eq!((pinned.vx, pinned.vy), (0.0, 0.0));
/// ```
///
/// The id cannot be rewritten once the vertex exists:
///
/// ```compile_fail
/// use force_graph::models::{Vertex, VertexId};
///
/// let mut vertex = Vertex::new(VertexId(1));
/// vertex.id = VertexId(2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    id: VertexId,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    x_fixed: bool,
    y_fixed: bool,
}

impl Vertex {
    /// Creates a free vertex at `(0, 0)`; placement moves it onto the spiral.
    pub fn new(id: impl Into<VertexId>) -> Self {
        Self::at(id, 0.0, 0.0)
    }

    /// Creates a free vertex. Placement adds its spiral offset to `(x, y)`.
    pub fn at(id: impl Into<VertexId>, x: f64, y: f64) -> Self {
        Self::with_fixed_axes(id, x, y, false, false)
    }

    /// Creates a vertex pinned at `(x, y)` on both axes.
    pub fn fixed(id: impl Into<VertexId>, x: f64, y: f64) -> Self {
        Self::with_fixed_axes(id, x, y, true, true)
    }

    pub fn with_fixed_axes(id: impl Into<VertexId>, x: f64, y: f64, x_fixed: bool, y_fixed: bool) -> Self {
        Vertex {
            id: id.into(),
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            x_fixed,
            y_fixed,
        }
    }

    /// Identity is set at construction and never changes, so a simulation's id index stays valid.
    pub fn id(&self) -> VertexId {
        self.id
    }

    pub fn is_x_fixed(&self) -> bool {
        self.x_fixed
    }

    pub fn is_y_fixed(&self) -> bool {
        self.y_fixed
    }

    pub fn set_x_fixed(&mut self, value: bool) {
        self.x_fixed = value;
    }

    pub fn set_y_fixed(&mut self, value: bool) {
        self.y_fixed = value;
    }

    /// Position after this tick's velocity is applied, as seen by the collide and link forces.
    #[inline]
    pub fn projected(&self) -> (f64, f64) {
        (self.x + self.vx, self.y + self.vy)
    }
}
