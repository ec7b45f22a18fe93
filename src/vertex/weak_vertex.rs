use std::{
    fmt::{self, Debug},
    hash::{Hash, Hasher},
    rc::{Rc, Weak},
};

use derivative::Derivative;

use super::{Vertex, VertexNode};
use crate::VertexId;

/// A non-owning handle to a [`Vertex`].
///
/// Holding a `WeakVertex` does not keep the vertex alive.  Once every strong
/// handle (including those held by graphs) is gone, the handle is dangling and
/// operations given it fail with
/// [`GraphError::InvalidArgument`](crate::GraphError::InvalidArgument).
#[derive(Derivative)]
#[derivative(Clone(bound = ""))]
pub struct WeakVertex<T> {
    ptr: Weak<VertexNode<T>>,
    id: VertexId,
}

impl<T> WeakVertex<T> {
    pub(super) fn new(vertex: &Vertex<T>) -> Self {
        Self {
            ptr: Rc::downgrade(&vertex.node),
            id: vertex.id(),
        }
    }

    /// Gets the id of the vertex, which stays available after the vertex is
    /// gone.
    pub fn id(&self) -> VertexId {
        self.id
    }

    pub fn upgrade(&self) -> Option<Vertex<T>> {
        self.ptr.upgrade().map(|node| Vertex { node })
    }

    pub fn is_dangling(&self) -> bool {
        self.ptr.strong_count() == 0
    }
}

impl<T> PartialEq for WeakVertex<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for WeakVertex<T> {}

impl<T> Hash for WeakVertex<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> Debug for WeakVertex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WeakVertex({})", self.id)
    }
}
