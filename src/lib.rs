//! An in-memory undirected graph over identity-bearing vertices, with
//! structural mutation and depth-first and breadth-first traversal.
//!
//! Vertices are shared handles that carry their own adjacency, so edges can be
//! created without a graph and a vertex can belong to several graphs.  A
//! [`Graph`] is a set of member vertices; membership is what traversal and
//! vertex removal check.
//!
//! ```
//! use undigraph::{Graph, Vertex};
//!
//! let a = Vertex::new(1);
//! let b = Vertex::new(2);
//! let c = Vertex::new(3);
//! let d = Vertex::new(4);
//!
//! let mut graph = Graph::new();
//! graph.insert_vertices([&a, &b, &c, &d])?;
//! graph.insert_edge(&a, &b)?;
//! graph.insert_edge(&a, &c)?;
//! graph.insert_edge(&b, &d)?;
//!
//! assert_eq!(graph.breadth_first_search(&a)?, vec![1, 2, 3, 4]);
//! assert_eq!(graph.depth_first_search(&a)?, vec![1, 2, 4, 3]);
//! # Ok::<(), undigraph::GraphError>(())
//! ```

pub mod edge;
pub mod error;
pub mod graph;
pub mod search;
pub mod tracing_support;
pub mod vertex;

mod ordered_set;
mod test_support;
mod vertex_id;

pub use crate::error::{GraphError, GraphResult};
pub use crate::graph::Graph;
pub use crate::vertex::{AsVertex, Vertex, WeakVertex};
pub use crate::vertex_id::VertexId;
