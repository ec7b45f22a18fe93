//! Error types for graph operations.

use thiserror::Error;

use crate::VertexId;

/// All errors that can be reported by graph and edge operations.  Every
/// operation validates its operands before mutating anything, so an error
/// never leaves a graph or vertex partially updated.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    /// An operand does not designate a live vertex.
    #[error("invalid vertex {id}: {reason}")]
    InvalidArgument { id: VertexId, reason: &'static str },

    /// The vertex is live but not a member of the graph.
    #[error("vertex {0} is not in the graph")]
    NotFound(VertexId),
}

/// Convenience result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
