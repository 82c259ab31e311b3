use rand::rngs::StdRng;

use crate::forces::VelocityDeltas;
use crate::models::Vertex;
use crate::quadtree::{QuadNode, Quadtree};
use crate::utils::{jiggle, DEFAULT_FORCE_STRENGTH};

/// Treats vertices as circles of a fixed radius and pushes overlapping pairs apart.
///
/// Overlap is judged on projected positions, `(x + vx, y + vy)`, so the force reacts to
/// where vertices are heading this tick rather than where they are.
#[derive(Debug, Clone)]
pub struct CollideForce {
    radius: f64,
    strength: f64,
    tree: Quadtree,
    radii: Vec<f64>,
}

impl CollideForce {
    pub fn new(radius: f64) -> Self {
        CollideForce {
            radius,
            strength: DEFAULT_FORCE_STRENGTH,
            tree: Quadtree::new(),
            radii: Vec::new(),
        }
    }

    /// Fraction of the overlap resolved per tick, usually in `[0, 1]`.
    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    /// Rebuilds the quadtree over projected positions and the per-node maximum radius.
    pub fn prepare(&mut self, vertices: &[Vertex]) {
        self.measure(Quadtree::from_points(vertices, |v| v.x + v.vx, |v| v.y + v.vy));
    }

    /// Like [`prepare`](Self::prepare), but only the vertices at `members` can be collided with.
    pub fn prepare_among(&mut self, vertices: &[Vertex], members: &[usize]) {
        let mut tree = Quadtree::new();
        tree.extend(members.iter().filter_map(|&i| {
            let (x, y) = vertices.get(i)?.projected();
            Some((i, x, y))
        }));
        self.measure(tree);
    }

    fn measure(&mut self, tree: Quadtree) {
        self.tree = tree;
        let mut radii = vec![0.0; self.tree.node_count()];

        self.tree.visit_after(|quad| {
            radii[quad.node.index()] = match self.tree.node(quad.node) {
                QuadNode::Leaf { .. } => self.radius,
                QuadNode::Internal { children } => children
                    .iter()
                    .flatten()
                    .map(|child| radii[child.index()])
                    .fold(0.0, f64::max),
            };
        });

        self.radii = radii;
    }

    /// Resolves overlaps between each vertex in `indices` and every higher-ordinal vertex.
    ///
    /// Each pair is handled once, by its lower ordinal, and both sides of the push are
    /// recorded in `deltas`. `alpha` is accepted for symmetry with other forces but unused.
    pub fn accumulate<I>(&self, vertices: &[Vertex], indices: I, _alpha: f64, rng: &mut StdRng, deltas: &mut VelocityDeltas)
    where
        I: IntoIterator<Item = usize>,
    {
        let ri = self.radius;
        let ri2 = ri * ri;

        for i in indices {
            let (xi, yi) = vertices[i].projected();
            let (mut dvx, mut dvy) = (0.0, 0.0);

            self.tree.visit(|quad| {
                let rj = self.radii[quad.node.index()];
                let r = ri + rj;

                if !self.tree.node(quad.node).is_leaf() {
                    return quad.x0 > xi + r || quad.x1 < xi - r || quad.y0 > yi + r || quad.y1 < yi - r;
                }

                for j in self.tree.leaf_items(quad.node).filter(|&j| j > i) {
                    let (xj, yj) = vertices[j].projected();
                    let mut x = xi - xj;
                    let mut y = yi - yj;
                    let mut l = x * x + y * y;
                    if l >= r * r {
                        continue;
                    }
                    if x == 0.0 {
                        x = jiggle(rng);
                        l += x * x;
                    }
                    if y == 0.0 {
                        y = jiggle(rng);
                        l += y * y;
                    }
                    let l = l.sqrt();
                    let k = (r - l) / l * self.strength;
                    let share = rj * rj / (ri2 + rj * rj);
                    dvx += x * k * share;
                    dvy += y * k * share;
                    deltas.push(j, -x * k * (1.0 - share), -y * k * (1.0 - share));
                }
                false
            });

            deltas.push(i, dvx, dvy);
        }
    }
}
