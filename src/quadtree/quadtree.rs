//! Region quadtree over 2D points, stored as an arena of nodes.
//!
//! Nodes reference each other by [`NodeId`] index into a single `Vec`, so a tree is
//! cheap to rebuild every tick and can be shared read-only across worker threads.
//! The covered square only ever doubles, which keeps the quadrant boundaries of
//! already-inserted points exact.
//!
//! # Example
//!
//! ```
//! use force_graph::quadtree::Quadtree;
//!
//! let points = [(0.0, 0.0), (1.0, 1.0), (0.0, 1.0), (1.0, 0.0)];
//! let tree = Quadtree::from_points(&points, |p| p.0, |p| p.1);
//!
//! let extent = tree.extent().expect("tree has points");
//! assert_eq!((extent.x0, extent.y0, extent.x1, extent.y1), (0.0, 0.0, 2.0, 2.0));
//!
//! let mut visited = 0;
//! tree.visit(|_quad| {
//!     visited += 1;
//!     false
//! });
//! assert_eq!(visited, 5); // one internal node and four leaves
//! ```
use crate::quadtree::{quadrant, Extent, Quad};
use crate::utils::MAX_INDEXED_COORDINATE;

/// Index into the node arena of a [`Quadtree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A quadtree node.
///
/// Leaves carry one item. Other items at exactly the same coordinates hang off
/// `next`, forming a coincidence chain that is never split.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum QuadNode {
    Internal {
        children: [Option<NodeId>; 4],
    },
    Leaf {
        item: usize,
        x: f64,
        y: f64,
        next: Option<NodeId>,
    },
}

impl QuadNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self, QuadNode::Leaf { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct Quadtree {
    nodes: Vec<QuadNode>,
    root: Option<NodeId>,
    extent: Option<Extent>,
    len: usize,
}

impl Quadtree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree over `points`, using each point's slice index as its item.
    ///
    /// Points that are not [indexable](Self::is_indexable) are skipped.
    pub fn from_points<P, FX, FY>(points: &[P], x: FX, y: FY) -> Self
    where
        FX: Fn(&P) -> f64,
        FY: Fn(&P) -> f64,
    {
        let mut tree = Quadtree {
            nodes: Vec::with_capacity(points.len() * 2),
            ..Self::default()
        };
        tree.extend(points.iter().enumerate().map(|(i, p)| (i, x(p), y(p))));
        tree
    }

    /// Adds a batch of `(item, x, y)` points, covering their joint extent first.
    pub fn extend<I>(&mut self, points: I)
    where
        I: IntoIterator<Item = (usize, f64, f64)>,
    {
        let valid: Vec<(usize, f64, f64)> = points
            .into_iter()
            .filter(|&(_, x, y)| Self::is_indexable(x, y))
            .collect();
        if valid.is_empty() {
            return;
        }

        let (mut x0, mut y0) = (f64::INFINITY, f64::INFINITY);
        let (mut x1, mut y1) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for &(_, x, y) in &valid {
            x0 = x0.min(x);
            y0 = y0.min(y);
            x1 = x1.max(x);
            y1 = y1.max(y);
        }
        self.cover(x0, y0);
        self.cover(x1, y1);

        for (item, x, y) in valid {
            self.add(item, x, y);
        }
    }

    /// Whether `(x, y)` can be stored: both coordinates finite and below
    /// [`MAX_INDEXED_COORDINATE`] in magnitude.
    pub fn is_indexable(x: f64, y: f64) -> bool {
        x.abs() < MAX_INDEXED_COORDINATE && y.abs() < MAX_INDEXED_COORDINATE
    }

    /// Inserts one point, growing the extent if needed. Points that are not
    /// [indexable](Self::is_indexable) are ignored.
    pub fn insert(&mut self, item: usize, x: f64, y: f64) {
        if !Self::is_indexable(x, y) {
            return;
        }
        self.cover(x, y);
        self.add(item, x, y);
    }

    pub fn extent(&self) -> Option<Extent> {
        self.extent
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &QuadNode {
        &self.nodes[id.0]
    }

    /// Size of the node arena. Per-node summaries are indexed by [`NodeId`] up to this bound.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of stored items, coincident ones included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The items of a leaf and its coincidence chain. Empty for internal nodes.
    pub fn leaf_items(&self, id: NodeId) -> LeafItems<'_> {
        LeafItems { tree: self, next: Some(id) }
    }

    /// Every stored item, in traversal order.
    pub fn items(&self) -> Vec<usize> {
        let mut items = Vec::with_capacity(self.len);
        self.visit(|quad| {
            items.extend(self.leaf_items(quad.node));
            false
        });
        items
    }

    /// Pre-order traversal. Returning `true` from `callback` skips the quad's children.
    pub fn visit<F>(&self, mut callback: F)
    where
        F: FnMut(&Quad) -> bool,
    {
        let (Some(root), Some(extent)) = (self.root, self.extent) else {
            return;
        };
        let mut quads = Vec::with_capacity(32);
        quads.push(Quad::new(root, extent));
        while let Some(quad) = quads.pop() {
            if callback(&quad) {
                continue;
            }
            if let QuadNode::Internal { children } = &self.nodes[quad.node.0] {
                for i in (0..4).rev() {
                    if let Some(child) = children[i] {
                        quads.push(quad.child(child, i));
                    }
                }
            }
        }
    }

    /// Post-order traversal over every node: children always come before their parent.
    pub fn visit_after<F>(&self, mut callback: F)
    where
        F: FnMut(&Quad),
    {
        let (Some(root), Some(extent)) = (self.root, self.extent) else {
            return;
        };
        let mut quads = vec![Quad::new(root, extent)];
        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(quad) = quads.pop() {
            if let QuadNode::Internal { children } = &self.nodes[quad.node.0] {
                for (i, child) in children.iter().enumerate() {
                    if let Some(child) = child {
                        quads.push(quad.child(*child, i));
                    }
                }
            }
            order.push(quad);
        }
        for quad in order.iter().rev() {
            callback(quad);
        }
    }

    fn push(&mut self, node: QuadNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    fn set_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        if let QuadNode::Internal { children } = &mut self.nodes[parent.0] {
            children[index] = Some(child);
        }
    }

    /// Doubles the extent until it contains `(x, y)`.
    ///
    /// The growth direction follows the side the point falls on; the old root becomes the
    /// matching child of a new root. A lone leaf root just keeps the larger extent.
    fn cover(&mut self, x: f64, y: f64) {
        let Some(mut e) = self.extent else {
            self.extent = Some(Extent::unit_at(x, y));
            return;
        };

        let wrap = matches!(self.root.map(|r| &self.nodes[r.0]), Some(QuadNode::Internal { .. }));
        let mut z = e.width();
        let mut node = self.root;

        while !e.contains(x, y) {
            let i = quadrant(y < e.y0, x < e.x0);
            let mut grown = e;
            z *= 2.0;
            if i & 1 == 0 {
                grown.x1 = grown.x0 + z;
            } else {
                grown.x0 = grown.x1 - z;
            }
            if i & 2 == 0 {
                grown.y1 = grown.y0 + z;
            } else {
                grown.y0 = grown.y1 - z;
            }
            if wrap {
                let mut children = [None; 4];
                children[i] = node;
                node = Some(self.push(QuadNode::Internal { children }));
            }
            e = grown;
        }

        if wrap {
            self.root = node;
        }
        self.extent = Some(e);
    }

    /// Inserts a point that is already inside the extent.
    fn add(&mut self, item: usize, x: f64, y: f64) {
        let leaf = self.push(QuadNode::Leaf { item, x, y, next: None });
        self.len += 1;

        let (Some(root), Some(extent)) = (self.root, self.extent) else {
            self.root = Some(leaf);
            return;
        };
        let mut frame = Quad::new(root, extent);
        let mut parent: Option<(NodeId, usize)> = None;

        // Descend to the leaf occupying the point's quadrant, or an empty slot.
        while let QuadNode::Internal { children } = self.nodes[frame.node.0] {
            let i = frame.quadrant_of(x, y);
            match children[i] {
                Some(child) => {
                    parent = Some((frame.node, i));
                    frame = frame.child(child, i);
                }
                None => {
                    self.set_child(frame.node, i, leaf);
                    return;
                }
            }
        }

        let existing = frame.node;
        let QuadNode::Leaf { x: xp, y: yp, .. } = self.nodes[existing.0] else {
            return;
        };

        if x == xp && y == yp {
            if let QuadNode::Leaf { next, .. } = &mut self.nodes[leaf.0] {
                *next = Some(existing);
            }
            self.attach(parent, leaf);
            return;
        }

        // Split until the existing and new points land in different quadrants.
        loop {
            let split = self.push(QuadNode::Internal { children: [None; 4] });
            self.attach(parent, split);
            let i = frame.quadrant_of(x, y);
            let j = frame.quadrant_of(xp, yp);
            if i != j {
                self.set_child(split, j, existing);
                self.set_child(split, i, leaf);
                return;
            }
            parent = Some((split, i));
            frame = frame.child(split, i);
        }
    }

    fn attach(&mut self, parent: Option<(NodeId, usize)>, child: NodeId) {
        match parent {
            Some((p, i)) => self.set_child(p, i, child),
            None => self.root = Some(child),
        }
    }
}

/// Iterator over the items of one leaf's coincidence chain.
pub struct LeafItems<'a> {
    tree: &'a Quadtree,
    next: Option<NodeId>,
}

impl Iterator for LeafItems<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let id = self.next?;
        match self.tree.nodes[id.0] {
            QuadNode::Leaf { item, next, .. } => {
                self.next = next;
                Some(item)
            }
            QuadNode::Internal { .. } => {
                self.next = None;
                None
            }
        }
    }
}
