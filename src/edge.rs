//! Undirected edges.
//!
//! An edge is nothing more than a pair of mutual adjacency entries, one on
//! each endpoint, so none of these operations need a [`Graph`](crate::Graph).
//! Neither endpoint has to be a member of any graph.

use crate::{
    GraphResult, Vertex,
    tracing_support::{debug, debug_span},
    vertex::AsVertex,
};

/// Connects two vertices: adds `v2` to the adjacency of `v1` and `v1` to the
/// adjacency of `v2`.  Re-adding an existing edge has no effect, and a
/// self-loop (`v1 == v2`) adds a single entry.
///
/// Each endpoint keeps the other alive until the edge is removed.  Both
/// operands are resolved before either vertex is touched, so on error
/// neither adjacency set has changed.
pub fn insert_edge<T>(v1: impl AsVertex<T>, v2: impl AsVertex<T>) -> GraphResult<()> {
    let (v1, v2) = (v1.to_vertex()?, v2.to_vertex()?);
    let _span = debug_span!("insert_edge", v1 = %v1.id(), v2 = %v2.id()).entered();
    let added = v1.link(&v2) | v2.link(&v1);
    if !added {
        debug!("edge already present");
    }
    Ok(())
}

/// Disconnects two vertices.  Removing an edge that does not exist has no
/// effect.
pub fn remove_edge<T>(v1: impl AsVertex<T>, v2: impl AsVertex<T>) -> GraphResult<()> {
    let (v1, v2) = (v1.to_vertex()?, v2.to_vertex()?);
    let _span = debug_span!("remove_edge", v1 = %v1.id(), v2 = %v2.id()).entered();
    let removed = v1.unlink(v2.id()) | v2.unlink(v1.id());
    if !removed {
        debug!("edge not present");
    }
    Ok(())
}

/// Checks whether each vertex is in the other's adjacency set.
pub fn has_edge<T>(v1: &Vertex<T>, v2: &Vertex<T>) -> bool {
    v1.is_adjacent(v2) && v2.is_adjacent(v1)
}
