use crate::models::Vertex;

/// Velocity changes produced by one partition of a partitioned force.
///
/// Workers never write vertices directly. Each one fills its own buffer, and the
/// coordinator folds the buffers into the vertex list after every worker has joined.
/// Entries may name any vertex, not only the ones the partition owns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VelocityDeltas {
    entries: Vec<(usize, f64, f64)>,
}

impl VelocityDeltas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        VelocityDeltas { entries: Vec::with_capacity(capacity) }
    }

    /// Records `(dvx, dvy)` for the vertex at `index`. All-zero deltas are dropped.
    #[inline]
    pub fn push(&mut self, index: usize, dvx: f64, dvy: f64) {
        if dvx != 0.0 || dvy != 0.0 {
            self.entries.push((index, dvx, dvy));
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(usize, f64, f64)> {
        self.entries.iter()
    }

    /// Adds every recorded delta to the matching vertex velocity, in recording order.
    ///
    /// # Example
    /// ```
    /// use force_graph::forces::VelocityDeltas;
    /// use force_graph::models::Vertex;
    ///
    /// let mut vertices = vec![Vertex::new(0), Vertex::new(1)];
    /// let mut deltas = VelocityDeltas::new();
    /// deltas.push(1, 0.5, -1.0);
    /// deltas.push(1, 0.5, 0.0);
    /// deltas.apply_to(&mut vertices);
    /// assert_eq!((vertices[1].vx, vertices[1].vy), (1.0, -1.0));
    /// assert_eq!((vertices[0].vx, vertices[0].vy), (0.0, 0.0));
    /// ```
    pub fn apply_to(&self, vertices: &mut [Vertex]) {
        for &(index, dvx, dvy) in &self.entries {
            if let Some(vertex) = vertices.get_mut(index) {
                vertex.vx += dvx;
                vertex.vy += dvy;
            }
        }
    }
}
