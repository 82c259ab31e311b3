use crate::models::VertexId;

/// A directed pair of vertex ids. The edge does not own its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    source: VertexId,
    target: VertexId,
}

impl Edge {
    pub fn new(source: impl Into<VertexId>, target: impl Into<VertexId>) -> Self {
        Edge {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn source(&self) -> VertexId {
        self.source
    }

    pub fn target(&self) -> VertexId {
        self.target
    }
}
