use std::fmt;
use std::sync::Arc;

use crate::models::Vertex;
use crate::utils::DEFAULT_FORCE_STRENGTH;

/// Where an [`XForce`] or [`YForce`] pulls: a fixed coordinate or one read on every apply.
#[derive(Clone)]
pub enum AxisTarget {
    Fixed(f64),
    Moving(Arc<dyn Fn() -> f64 + Send + Sync>),
}

impl AxisTarget {
    #[inline]
    pub fn current(&self) -> f64 {
        match self {
            AxisTarget::Fixed(value) => *value,
            AxisTarget::Moving(read) => read(),
        }
    }
}

impl fmt::Debug for AxisTarget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AxisTarget::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            AxisTarget::Moving(_) => f.write_str("Moving(..)"),
        }
    }
}

impl From<f64> for AxisTarget {
    fn from(value: f64) -> Self {
        AxisTarget::Fixed(value)
    }
}

/// Pulls every vertex toward the vertical line `x = target`.
///
/// # Example
/// ```
/// use std::sync::atomic::{AtomicU64, Ordering};
/// use std::sync::Arc;
///
/// use force_graph::forces::XForce;
/// use force_graph::models::Vertex;
///
/// let line = Arc::new(AtomicU64::new(10f64.to_bits()));
/// let reader = Arc::clone(&line);
/// let force = XForce::following(move || f64::from_bits(reader.load(Ordering::Relaxed)));
///
/// let mut vertex = Vertex::at(0, 0.0, 0.0);
/// force.apply_to(&mut vertex, 1.0);
/// assert_eq!(vertex.vx, 10.0);
///
/// line.store((-10f64).to_bits(), Ordering::Relaxed);
/// force.apply_to(&mut vertex, 1.0);
/// assert_eq!(vertex.vx, 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct XForce {
    pub target: AxisTarget,
    pub strength: f64,
}

/// Pulls every vertex toward the horizontal line `y = target`.
#[derive(Debug, Clone)]
pub struct YForce {
    pub target: AxisTarget,
    pub strength: f64,
}

impl XForce {
    pub fn new(target: f64) -> Self {
        XForce { target: target.into(), strength: DEFAULT_FORCE_STRENGTH }
    }

    /// A pull toward whatever `target` returns at the time the force is applied.
    pub fn following<F>(target: F) -> Self
    where
        F: Fn() -> f64 + Send + Sync + 'static,
    {
        XForce { target: AxisTarget::Moving(Arc::new(target)), strength: DEFAULT_FORCE_STRENGTH }
    }

    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    #[inline]
    pub fn apply_to(&self, vertex: &mut Vertex, alpha: f64) {
        self.pull(vertex, self.target.current(), alpha);
    }

    /// Applies the force to every vertex, reading the target once.
    pub fn apply_all<'a, I>(&self, vertices: I, alpha: f64)
    where
        I: IntoIterator<Item = &'a mut Vertex>,
    {
        let target = self.target.current();
        vertices.into_iter().for_each(|v| self.pull(v, target, alpha));
    }

    /// Applies the force to the vertices at `subset` only, reading the target once.
    pub fn apply_subset(&self, vertices: &mut [Vertex], subset: &[usize], alpha: f64) {
        let target = self.target.current();
        for &i in subset {
            if let Some(v) = vertices.get_mut(i) {
                self.pull(v, target, alpha);
            }
        }
    }

    #[inline]
    fn pull(&self, vertex: &mut Vertex, target: f64, alpha: f64) {
        vertex.vx += (target - vertex.x) * self.strength * alpha;
    }
}

impl YForce {
    pub fn new(target: f64) -> Self {
        YForce { target: target.into(), strength: DEFAULT_FORCE_STRENGTH }
    }

    /// A pull toward whatever `target` returns at the time the force is applied.
    pub fn following<F>(target: F) -> Self
    where
        F: Fn() -> f64 + Send + Sync + 'static,
    {
        YForce { target: AxisTarget::Moving(Arc::new(target)), strength: DEFAULT_FORCE_STRENGTH }
    }

    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    #[inline]
    pub fn apply_to(&self, vertex: &mut Vertex, alpha: f64) {
        self.pull(vertex, self.target.current(), alpha);
    }

    /// Applies the force to every vertex, reading the target once.
    pub fn apply_all<'a, I>(&self, vertices: I, alpha: f64)
    where
        I: IntoIterator<Item = &'a mut Vertex>,
    {
        let target = self.target.current();
        vertices.into_iter().for_each(|v| self.pull(v, target, alpha));
    }

    /// Applies the force to the vertices at `subset` only, reading the target once.
    pub fn apply_subset(&self, vertices: &mut [Vertex], subset: &[usize], alpha: f64) {
        let target = self.target.current();
        for &i in subset {
            if let Some(v) = vertices.get_mut(i) {
                self.pull(v, target, alpha);
            }
        }
    }

    #[inline]
    fn pull(&self, vertex: &mut Vertex, target: f64, alpha: f64) {
        vertex.vy += (target - vertex.y) * self.strength * alpha;
    }
}
