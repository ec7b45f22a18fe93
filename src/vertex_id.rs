use std::{
    fmt,
    sync::atomic::{AtomicUsize, Ordering},
};

/// A global vertex identifier counter.  Identifiers are never reused within a
/// process; wrapping around would require allocating `usize::MAX` vertices.
static VERTEX_ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A unique identifier for a vertex.  Vertex identity is by id, never by
/// value, so two vertices holding equal values are still distinct.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct VertexId(usize);

impl VertexId {
    /// Create a new unique vertex identifier.
    pub(crate) fn new() -> Self {
        VertexId(VERTEX_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}
