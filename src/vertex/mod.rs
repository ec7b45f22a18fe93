use std::{
    cell::RefCell,
    cmp::Ordering,
    fmt::{self, Debug},
    hash::{Hash, Hasher},
    rc::Rc,
};

use derivative::Derivative;

use crate::{GraphError, GraphResult, VertexId, ordered_set::OrderedSet};

mod weak_vertex;

pub use weak_vertex::WeakVertex;

/// Insertion-ordered neighbor set.  Entries are strong handles.
type Adjacency<T> = OrderedSet<VertexId, Vertex<T>>;

pub(crate) struct VertexNode<T> {
    id: VertexId,
    value: T,
    adjacent: RefCell<Adjacency<T>>,
}

// Releases neighbors iteratively, so dropping the head of a long chain of
// otherwise unreferenced vertices does not recurse once per link.
impl<T> Drop for VertexNode<T> {
    fn drop(&mut self) {
        let mut pending = self.adjacent.get_mut().drain_values();
        while let Some(vertex) = pending.pop() {
            if let Ok(mut node) = Rc::try_unwrap(vertex.node) {
                pending.extend(node.adjacent.get_mut().drain_values());
            }
        }
    }
}

/// A shared handle to a vertex: an opaque value plus the set of vertices it
/// is adjacent to.
///
/// Cloning a `Vertex` clones the handle, not the vertex; all clones observe the
/// same adjacency.  Equality, ordering and hashing are by [`VertexId`], so two
/// vertices holding equal values are never equal to each other.
///
/// Vertices exist independently of any [`Graph`](crate::Graph) and may be
/// members of several graphs at once.  Adjacency is stored on the vertex and
/// holds its neighbors alive: a vertex is freed only once no caller, graph or
/// other vertex's adjacency refers to it.
///
/// An undirected edge is a pair of strong references, i.e. a reference
/// cycle.  Vertices joined by edges are not freed until the edges are removed
/// with [`remove_edge`](crate::edge::remove_edge) or [`Vertex::disconnect`].
#[derive(Derivative)]
#[derivative(Clone(bound = ""))]
pub struct Vertex<T> {
    pub(crate) node: Rc<VertexNode<T>>,
}

impl<T> Vertex<T> {
    /// Creates a vertex with no neighbors.
    pub fn new(value: T) -> Self {
        Self {
            node: Rc::new(VertexNode {
                id: VertexId::new(),
                value,
                adjacent: RefCell::new(Adjacency::default()),
            }),
        }
    }

    /// Creates a vertex with an initial adjacency set.  The entries are
    /// one-directional: the given neighbors are not updated to point back at
    /// the new vertex.  Use [`insert_edge`](crate::edge::insert_edge) for
    /// undirected edges.
    pub fn with_adjacent(value: T, adjacent: impl IntoIterator<Item = Vertex<T>>) -> Self {
        let vertex = Self::new(value);
        for neighbor in adjacent {
            vertex.link(&neighbor);
        }
        vertex
    }

    pub fn id(&self) -> VertexId {
        self.node.id
    }

    pub fn value(&self) -> &T {
        &self.node.value
    }

    /// Gets the neighbors of this vertex in the order their adjacency entries
    /// were added.
    pub fn adjacent(&self) -> Vec<Vertex<T>> {
        self.node.adjacent.borrow().values().cloned().collect()
    }

    /// Checks whether `other` is in this vertex's adjacency set.
    pub fn is_adjacent(&self, other: &Vertex<T>) -> bool {
        self.node.adjacent.borrow().contains(&other.id())
    }

    pub fn degree(&self) -> usize {
        self.node.adjacent.borrow().len()
    }

    /// Removes every edge incident to this vertex: its adjacency set is
    /// emptied and it is removed from the adjacency set of each former
    /// neighbor.  Entries other vertices hold without a matching entry here
    /// are not found and stay in place.
    pub fn disconnect(&self) {
        let neighbors = self.node.adjacent.borrow_mut().drain_values();
        for neighbor in &neighbors {
            neighbor.unlink(self.id());
        }
    }

    /// Creates a non-owning handle to this vertex.
    pub fn downgrade(&self) -> WeakVertex<T> {
        WeakVertex::new(self)
    }

    /// Returns true if both handles refer to the same vertex.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.node, &b.node)
    }

    /// Adds `other` to this vertex's adjacency set.  Returns false if it was
    /// already there, in which case its position is unchanged.
    pub(crate) fn link(&self, other: &Vertex<T>) -> bool {
        self.node
            .adjacent
            .borrow_mut()
            .insert(other.id(), other.clone())
    }

    /// Removes the vertex with the given id from this vertex's adjacency set.
    pub(crate) fn unlink(&self, id: VertexId) -> bool {
        // The removed handle is released after the borrow ends.
        let removed = self.node.adjacent.borrow_mut().remove(&id);
        removed.is_some()
    }
}

impl<T> PartialEq for Vertex<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl<T> Eq for Vertex<T> {}

impl<T> Hash for Vertex<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl<T> PartialOrd for Vertex<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Vertex<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id().cmp(&other.id())
    }
}

// Neighbors are printed by id only, so cyclic adjacency cannot recurse.
impl<T: Debug> Debug for Vertex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let adjacent: Vec<VertexId> = self.adjacent().iter().map(Vertex::id).collect();
        f.debug_struct("Vertex")
            .field("id", &self.id())
            .field("value", self.value())
            .field("adjacent", &adjacent)
            .finish()
    }
}

/// Anything that can be resolved to a live [`Vertex`].  Graph and edge
/// operations accept any `AsVertex` operand and report
/// [`GraphError::InvalidArgument`] when it does not resolve.
pub trait AsVertex<T> {
    /// Gets the id of the vertex this operand designates, whether or not it
    /// is still live.
    fn vertex_id(&self) -> VertexId;

    /// Resolves the operand to a strong handle.
    fn to_vertex(&self) -> GraphResult<Vertex<T>>;
}

impl<T> AsVertex<T> for Vertex<T> {
    fn vertex_id(&self) -> VertexId {
        self.id()
    }

    fn to_vertex(&self) -> GraphResult<Vertex<T>> {
        Ok(self.clone())
    }
}

impl<T> AsVertex<T> for WeakVertex<T> {
    fn vertex_id(&self) -> VertexId {
        self.id()
    }

    fn to_vertex(&self) -> GraphResult<Vertex<T>> {
        self.upgrade().ok_or(GraphError::InvalidArgument {
            id: self.id(),
            reason: "vertex handle is dangling",
        })
    }
}

impl<T, V> AsVertex<T> for &V
where
    V: AsVertex<T> + ?Sized,
{
    fn vertex_id(&self) -> VertexId {
        (**self).vertex_id()
    }

    fn to_vertex(&self) -> GraphResult<Vertex<T>> {
        (**self).to_vertex()
    }
}
