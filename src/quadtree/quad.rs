use crate::quadtree::NodeId;

/// The square region covered by a quadtree.
///
/// The lower bounds are inclusive and the upper bounds exclusive, so a point on a
/// split line always belongs to the right/bottom half.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Extent {
    /// The unit square anchored at the integer floor of `(x, y)`.
    ///
    /// Integer anchors keep every later doubling exact, so existing quadrant
    /// boundaries never drift.
    pub fn unit_at(x: f64, y: f64) -> Self {
        let x0 = x.floor();
        let y0 = y.floor();
        Extent { x0, y0, x1: x0 + 1.0, y1: y0 + 1.0 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Returns true if the point (x, y) is inside this extent.
    ///
    /// # Examples
    ///
    /// ```
    /// use force_graph::quadtree::Extent;
    ///
    /// let extent = Extent { x0: 0.0, y0: 0.0, x1: 2.0, y1: 2.0 };
    /// assert!(extent.contains(0.0, 1.9));
    /// assert!(!extent.contains(2.0, 1.0)); // upper bound is exclusive
    /// ```
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    /// Returns true if `other` lies entirely inside this extent.
    pub fn encloses(&self, other: &Extent) -> bool {
        self.x0 <= other.x0 && self.y0 <= other.y0 && self.x1 >= other.x1 && self.y1 >= other.y1
    }
}

/// Child slot for a point, from its half-plane membership relative to the midpoint.
///
/// ```text
/// +---+---+
/// | 0 | 1 |   top (y < ym)
/// +---+---+
/// | 2 | 3 |   bottom (y >= ym)
/// +---+---+
/// ```
#[inline]
pub fn quadrant(bottom: bool, right: bool) -> usize {
    ((bottom as usize) << 1) | right as usize
}

/// A node together with the box it covers, produced while traversing a [`Quadtree`](crate::quadtree::Quadtree).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    pub node: NodeId,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Quad {
    pub fn new(node: NodeId, extent: Extent) -> Self {
        Quad { node, x0: extent.x0, y0: extent.y0, x1: extent.x1, y1: extent.y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Child slot of this frame that `(x, y)` falls into.
    #[inline]
    pub fn quadrant_of(&self, x: f64, y: f64) -> usize {
        let xm = (self.x0 + self.x1) / 2.0;
        let ym = (self.y0 + self.y1) / 2.0;
        quadrant(y >= ym, x >= xm)
    }

    /// The frame for `node` sitting in `quadrant` of this frame.
    ///
    /// # Examples
    ///
    /// ```
    /// use force_graph::quadtree::{NodeId, Quad};
    ///
    /// let quad = Quad { node: NodeId(0), x0: 0.0, y0: 0.0, x1: 2.0, y1: 2.0 };
    /// let bottom_right = quad.child(NodeId(4), 3);
    /// assert_eq!((bottom_right.x0, bottom_right.y0, bottom_right.x1, bottom_right.y1), (1.0, 1.0, 2.0, 2.0));
    /// ```
    pub fn child(&self, node: NodeId, quadrant: usize) -> Quad {
        let xm = (self.x0 + self.x1) / 2.0;
        let ym = (self.y0 + self.y1) / 2.0;
        match quadrant {
            0 => Quad { node, x0: self.x0, y0: self.y0, x1: xm, y1: ym },
            1 => Quad { node, x0: xm, y0: self.y0, x1: self.x1, y1: ym },
            2 => Quad { node, x0: self.x0, y0: ym, x1: xm, y1: self.y1 },
            _ => Quad { node, x0: xm, y0: ym, x1: self.x1, y1: self.y1 },
        }
    }
}
