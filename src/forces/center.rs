use crate::models::Vertex;
use crate::utils::DEFAULT_FORCE_STRENGTH;

/// Translates the layout so that the mean vertex position moves onto `(x, y)`.
///
/// Positions are shifted directly and velocities are left alone, so centering never
/// changes the relative layout. Fixed axes are not shifted.
///
/// # Example
/// ```
/// use force_graph::forces::CenterForce;
/// use force_graph::models::Vertex;
///
/// let mut vertices = vec![Vertex::at(0, 10.0, 0.0), Vertex::at(1, 20.0, 4.0)];
/// CenterForce::new(0.0, 0.0).apply(&mut vertices);
/// assert_eq!((vertices[0].x, vertices[1].x), (-5.0, 5.0));
/// assert_eq!((vertices[0].y, vertices[1].y), (-2.0, 2.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterForce {
    pub x: f64,
    pub y: f64,
    pub strength: f64,
}

impl CenterForce {
    pub fn new(x: f64, y: f64) -> Self {
        CenterForce { x, y, strength: DEFAULT_FORCE_STRENGTH }
    }

    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    /// Offset that every vertex would be moved by.
    pub fn shift(&self, vertices: &[Vertex]) -> Option<(f64, f64)> {
        self.shift_of(vertices.iter())
    }

    fn shift_of<'a, I>(&self, vertices: I) -> Option<(f64, f64)>
    where
        I: Iterator<Item = &'a Vertex>,
    {
        let (n, sx, sy) = vertices.fold((0usize, 0.0, 0.0), |(n, sx, sy), v| (n + 1, sx + v.x, sy + v.y));
        if n == 0 {
            return None;
        }
        let n = n as f64;
        Some(((sx / n - self.x) * self.strength, (sy / n - self.y) * self.strength))
    }

    pub fn apply(&self, vertices: &mut [Vertex]) {
        if let Some(shift) = self.shift(vertices) {
            vertices.iter_mut().for_each(|v| Self::translate(v, shift));
        }
    }

    /// Moves only the vertices in `subset`. The mean is still taken over all vertices.
    pub fn apply_subset(&self, vertices: &mut [Vertex], subset: &[usize]) {
        if let Some(shift) = self.shift(vertices) {
            for &i in subset {
                if let Some(v) = vertices.get_mut(i) {
                    Self::translate(v, shift);
                }
            }
        }
    }

    /// Centers the vertices at `members` as a group of their own: their mean moves onto
    /// the target and every other vertex is left alone.
    pub fn apply_among(&self, vertices: &mut [Vertex], members: &[usize]) {
        if let Some(shift) = self.shift_of(members.iter().filter_map(|&i| vertices.get(i))) {
            for &i in members {
                if let Some(v) = vertices.get_mut(i) {
                    Self::translate(v, shift);
                }
            }
        }
    }

    fn translate(vertex: &mut Vertex, (dx, dy): (f64, f64)) {
        if !vertex.is_x_fixed() {
            vertex.x -= dx;
        }
        if !vertex.is_y_fixed() {
            vertex.y -= dy;
        }
    }
}
