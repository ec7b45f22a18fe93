use std::fmt::{self, Debug};

use derivative::Derivative;

use crate::{
    GraphError, GraphResult, Vertex, VertexId, edge,
    ordered_set::OrderedSet,
    search::{Bfs, Dfs},
    tracing_support::{debug, debug_span, info_span},
    vertex::AsVertex,
};

/// An undirected graph over shared [`Vertex`] handles.
///
/// The graph holds a set of member vertices, keyed by identity and iterated in
/// insertion order.  Edges are not stored here: they live on the vertices as
/// mutual adjacency entries, so the same vertex (and its edges) can be shared
/// by several graphs.  Cloning a graph clones the member set, not the
/// vertices.
///
/// Traversal order is defined by adjacency insertion order, never by the order
/// of the member set.
#[derive(Derivative)]
#[derivative(Clone(bound = ""), Default(bound = ""))]
pub struct Graph<T> {
    nodes: OrderedSet<VertexId, Vertex<T>>,
}

impl<T> Graph<T> {
    /// Creates a new, empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty graph with room for at least `capacity` vertices.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: OrderedSet::with_capacity(capacity),
        }
    }

    /// Gets the number of vertices in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Checks whether the vertex is a member of the graph.  A dangling handle
    /// is never a member.
    pub fn contains(&self, vertex: impl AsVertex<T>) -> bool {
        self.nodes.contains(&vertex.vertex_id())
    }

    /// Gets an iterator over the member vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<T>> {
        self.nodes.values()
    }

    /// Removes every vertex from the graph.  Adjacency on the vertices is left
    /// as it is.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    // Mutation

    /// Adds a vertex to the graph.  Returns true if it was not already a
    /// member; adding a member again changes nothing.
    pub fn insert_vertex(&mut self, vertex: impl AsVertex<T>) -> GraphResult<bool> {
        let vertex = vertex.to_vertex()?;
        let _span = debug_span!("insert_vertex", vertex = %vertex.id()).entered();
        Ok(self.nodes.insert(vertex.id(), vertex))
    }

    /// Adds several vertices to the graph, in order.
    ///
    /// Every operand is resolved before any is inserted: if one of them fails,
    /// the error is returned and the graph is left exactly as it was.
    pub fn insert_vertices<I>(&mut self, vertices: I) -> GraphResult<()>
    where
        I: IntoIterator,
        I::Item: AsVertex<T>,
    {
        let vertices = vertices
            .into_iter()
            .map(|vertex| vertex.to_vertex())
            .collect::<GraphResult<Vec<_>>>()?;
        let _span = debug_span!("insert_vertices", count = vertices.len()).entered();
        self.nodes.reserve(vertices.len());
        for vertex in vertices {
            self.nodes.insert(vertex.id(), vertex);
        }
        Ok(())
    }

    /// Connects two vertices.  See [`edge::insert_edge`]; neither vertex has to
    /// be a member of this graph.
    pub fn insert_edge(&self, v1: impl AsVertex<T>, v2: impl AsVertex<T>) -> GraphResult<()> {
        edge::insert_edge(v1, v2)
    }

    /// Disconnects two vertices.  See [`edge::remove_edge`].
    pub fn remove_edge(&self, v1: impl AsVertex<T>, v2: impl AsVertex<T>) -> GraphResult<()> {
        edge::remove_edge(v1, v2)
    }

    /// Removes a member vertex from the graph, returning its handle.
    ///
    /// The vertex is first removed from the adjacency set of every member,
    /// not only from those of its own neighbors.  Vertices outside the graph
    /// that still list it as a neighbor are not touched, and the removed
    /// vertex keeps its own adjacency.
    pub fn remove_vertex(&mut self, vertex: impl AsVertex<T>) -> GraphResult<Vertex<T>> {
        let vertex = self.member(vertex)?;
        let id = vertex.id();
        let _span = debug_span!("remove_vertex", vertex = %id).entered();
        for node in self.nodes.values() {
            node.unlink(id);
        }
        let removed = self.nodes.remove(&id).ok_or(GraphError::NotFound(id))?;
        debug!(remaining = self.nodes.len(), "vertex removed");
        Ok(removed)
    }

    // Searches

    /// Performs a breadth-first search starting from the given member vertex.
    pub fn bfs(&self, start: impl AsVertex<T>) -> GraphResult<Bfs<'_, T>> {
        self.member(start).map(Bfs::new)
    }

    /// Performs a depth-first search starting from the given member vertex.
    pub fn dfs(&self, start: impl AsVertex<T>) -> GraphResult<Dfs<'_, T>> {
        self.member(start).map(Dfs::new)
    }

    /// Collects the values of the vertices reachable from `start`, in
    /// depth-first pre-order.  Each reachable vertex appears once; vertices
    /// not reachable from `start` do not appear even if they are members.
    pub fn depth_first_search(&self, start: impl AsVertex<T>) -> GraphResult<Vec<T>>
    where
        T: Clone,
    {
        let _span = info_span!("depth_first_search", start = %start.vertex_id()).entered();
        Ok(self.dfs(start)?.map(|v| v.value().clone()).collect())
    }

    /// Collects the values of the vertices reachable from `start`, in
    /// breadth-first order.
    pub fn breadth_first_search(&self, start: impl AsVertex<T>) -> GraphResult<Vec<T>>
    where
        T: Clone,
    {
        let _span = info_span!("breadth_first_search", start = %start.vertex_id()).entered();
        Ok(self.bfs(start)?.map(|v| v.value().clone()).collect())
    }

    /// Resolves an operand that must be a live member of this graph.
    fn member(&self, vertex: impl AsVertex<T>) -> GraphResult<Vertex<T>> {
        let vertex = vertex.to_vertex()?;
        if self.nodes.contains(&vertex.id()) {
            Ok(vertex)
        } else {
            Err(GraphError::NotFound(vertex.id()))
        }
    }
}

impl<T> FromIterator<Vertex<T>> for Graph<T> {
    fn from_iter<I: IntoIterator<Item = Vertex<T>>>(iter: I) -> Self {
        let mut graph = Self::new();
        graph.extend(iter);
        graph
    }
}

impl<T> Extend<Vertex<T>> for Graph<T> {
    fn extend<I: IntoIterator<Item = Vertex<T>>>(&mut self, iter: I) {
        for vertex in iter {
            self.nodes.insert(vertex.id(), vertex);
        }
    }
}

impl<T: Debug> Debug for Graph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("vertices", &self.vertices().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::{
        edge::has_edge,
        test_support::{ArbGraph, check_graph_consistency},
        tracing_support::init_tracing,
    };

    fn dangling() -> crate::WeakVertex<i32> {
        Vertex::new(-1).downgrade()
    }

    #[test]
    fn test_new_graph_is_empty() {
        let graph: Graph<i32> = Graph::new();
        assert_eq!(graph.len(), 0);
        assert!(graph.is_empty());
        assert_eq!(graph.vertices().count(), 0);
    }

    #[test]
    fn test_insert_vertex() {
        init_tracing();
        let mut graph = Graph::with_capacity(2);
        let a = Vertex::new(1);
        assert!(!graph.contains(&a));
        assert_eq!(graph.insert_vertex(&a), Ok(true));
        assert!(graph.contains(&a));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_insert_vertex_is_idempotent() {
        let mut graph = Graph::new();
        let a = Vertex::new(1);
        graph.insert_vertex(&a).unwrap();
        assert_eq!(graph.insert_vertex(a.clone()), Ok(false));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_equal_values_are_distinct_members() {
        let mut graph = Graph::new();
        graph.insert_vertex(Vertex::new(1)).unwrap();
        graph.insert_vertex(Vertex::new(1)).unwrap();
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_insert_vertex_rejects_dangling_handle() {
        let mut graph = Graph::new();
        let weak = dangling();
        let err = graph.insert_vertex(&weak).unwrap_err();
        assert_eq!(err, GraphError::InvalidArgument {
            id: weak.id(),
            reason: "vertex handle is dangling",
        });
        assert!(graph.is_empty());
    }

    #[test]
    fn test_insert_vertex_has_no_effect_on_adjacency() {
        let mut graph = Graph::new();
        let a = Vertex::new(1);
        graph.insert_vertex(&a).unwrap();
        assert!(a.adjacent().is_empty());
    }

    #[test]
    fn test_insert_vertices_keeps_order() {
        let mut graph = Graph::new();
        let vertices: Vec<_> = (0..5).map(Vertex::new).collect();
        graph.insert_vertices(&vertices).unwrap();
        graph.insert_vertices(vertices.iter().rev()).unwrap();
        assert_eq!(graph.vertices().cloned().collect::<Vec<_>>(), vertices);
    }

    #[test]
    fn test_insert_vertices_is_all_or_nothing() {
        let mut graph = Graph::new();
        let a = Vertex::new(1).downgrade();
        let b = Vertex::new(2);
        let c = Vertex::new(3);
        let keep_b = b.downgrade();
        let keep_c = c.downgrade();
        graph.insert_vertex(&c).unwrap();
        drop(c);

        let batch = vec![keep_b.clone(), a.clone(), keep_c.clone()];
        let err = graph.insert_vertices(&batch).unwrap_err();
        assert!(matches!(err, GraphError::InvalidArgument { id, .. } if id == a.id()));
        assert!(!graph.contains(&keep_b));
        assert!(graph.contains(&keep_c));
        assert_eq!(graph.len(), 1);
        drop(b);
    }

    #[test]
    fn test_remove_vertex_cleans_every_member() {
        init_tracing();
        let mut graph = Graph::new();
        let a = Vertex::new('a');
        let b = Vertex::new('b');
        let c = Vertex::new('c');
        graph.insert_vertices([&a, &b, &c]).unwrap();
        graph.insert_edge(&a, &b).unwrap();
        graph.insert_edge(&b, &c).unwrap();
        // One-directional entry the removed vertex does not know about.
        c.link(&a);

        let removed = graph.remove_vertex(&a).unwrap();
        assert_eq!(removed, a);
        assert!(!graph.contains(&a));
        assert!(!b.is_adjacent(&a));
        assert!(!c.is_adjacent(&a));
        assert!(has_edge(&b, &c));
        assert_eq!(a.adjacent(), vec![b.clone()]);
        check_graph_consistency(&graph);
    }

    #[test]
    fn test_remove_vertex_leaves_outsiders_alone() {
        let mut graph = Graph::new();
        let a = Vertex::new(1);
        let outsider = Vertex::new(2);
        graph.insert_vertex(&a).unwrap();
        graph.insert_edge(&a, &outsider).unwrap();
        graph.remove_vertex(&a).unwrap();
        assert!(outsider.is_adjacent(&a));
        assert!(a.is_adjacent(&outsider));
    }

    #[test]
    fn test_remove_vertex_not_in_graph() {
        let mut graph = Graph::new();
        let a = Vertex::new(1);
        let b = Vertex::new(2);
        graph.insert_vertex(&a).unwrap();
        graph.insert_edge(&a, &b).unwrap();

        assert_eq!(graph.remove_vertex(&b), Err(GraphError::NotFound(b.id())));
        assert_eq!(graph.len(), 1);
        assert!(has_edge(&a, &b));

        let weak = dangling();
        assert!(matches!(
            graph.remove_vertex(&weak),
            Err(GraphError::InvalidArgument { .. })
        ));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_remove_vertex_twice() {
        let mut graph = Graph::new();
        let a = Vertex::new(1);
        graph.insert_vertex(&a).unwrap();
        graph.remove_vertex(&a).unwrap();
        assert_eq!(graph.remove_vertex(&a), Err(GraphError::NotFound(a.id())));
    }

    #[test]
    fn test_search_requires_member_start() {
        let mut graph = Graph::new();
        let a = Vertex::new(1);
        let b = Vertex::new(2);
        graph.insert_vertex(&a).unwrap();
        graph.insert_edge(&a, &b).unwrap();

        assert_eq!(graph.depth_first_search(&b), Err(GraphError::NotFound(b.id())));
        assert_eq!(graph.breadth_first_search(&b), Err(GraphError::NotFound(b.id())));
        assert!(graph.bfs(&b).is_err());
        assert!(graph.dfs(&b).is_err());

        let weak = dangling();
        assert!(matches!(
            graph.depth_first_search(&weak),
            Err(GraphError::InvalidArgument { .. })
        ));
        assert!(matches!(
            graph.breadth_first_search(&weak),
            Err(GraphError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_search_reaches_non_members_through_edges() {
        let mut graph = Graph::new();
        let a = Vertex::new(1);
        let b = Vertex::new(2);
        graph.insert_vertex(&a).unwrap();
        graph.insert_edge(&a, &b).unwrap();
        assert_eq!(graph.depth_first_search(&a), Ok(vec![1, 2]));
        assert_eq!(graph.breadth_first_search(&a), Ok(vec![1, 2]));
    }

    #[test]
    fn test_search_isolated_start() {
        let mut graph = Graph::new();
        let a = Vertex::new("only");
        let b = Vertex::new("other");
        graph.insert_vertices([&a, &b]).unwrap();
        assert_eq!(graph.depth_first_search(&a), Ok(vec!["only"]));
        assert_eq!(graph.breadth_first_search(&a), Ok(vec!["only"]));
    }

    #[test]
    fn test_search_with_self_loop() {
        let mut graph = Graph::new();
        let a = Vertex::new(1);
        let b = Vertex::new(2);
        graph.insert_vertices([&a, &b]).unwrap();
        graph.insert_edge(&a, &a).unwrap();
        graph.insert_edge(&a, &b).unwrap();
        assert_eq!(graph.depth_first_search(&a), Ok(vec![1, 2]));
        assert_eq!(graph.breadth_first_search(&a), Ok(vec![1, 2]));
    }

    #[test]
    fn test_search_uses_weak_handle() {
        let mut graph = Graph::new();
        let a = Vertex::new(1);
        graph.insert_vertex(&a).unwrap();
        let weak = a.downgrade();
        drop(a);
        // The graph keeps the vertex alive.
        assert_eq!(graph.depth_first_search(&weak), Ok(vec![1]));
    }

    #[test]
    fn test_clone_shares_vertices() {
        let mut graph = Graph::new();
        let a = Vertex::new(1);
        let b = Vertex::new(2);
        graph.insert_vertices([&a, &b]).unwrap();
        let mut copy = graph.clone();
        copy.insert_edge(&a, &b).unwrap();
        copy.remove_vertex(&b).unwrap();
        assert!(graph.contains(&b));
        assert!(!has_edge(&a, &b));
        assert!(!copy.contains(&b));
    }

    #[test]
    fn test_clear() {
        let mut graph = Graph::new();
        let a = Vertex::new(1);
        let b = Vertex::new(2);
        graph.insert_vertices([&a, &b]).unwrap();
        graph.insert_edge(&a, &b).unwrap();
        graph.clear();
        assert!(graph.is_empty());
        assert!(has_edge(&a, &b));
    }

    #[test]
    fn test_edges_change_during_traversal() {
        let a = Vertex::new(1);
        let b = Vertex::new(2);
        let c = Vertex::new(3);
        let graph: Graph<i32> = [a.clone(), b.clone(), c.clone()].into_iter().collect();
        graph.insert_edge(&a, &b).unwrap();

        let mut bfs = graph.bfs(&a).unwrap();
        assert_eq!(bfs.next(), Some(a.clone()));
        // Neighbors of a vertex are read when it is visited.
        graph.remove_edge(&a, &b).unwrap();
        graph.insert_edge(&b, &c).unwrap();
        assert_eq!(bfs.collect::<Vec<_>>(), vec![b.clone(), c.clone()]);
        assert_eq!(graph.breadth_first_search(&a), Ok(vec![1]));

        b.disconnect();
    }

    #[test]
    fn test_debug() {
        let a = Vertex::new(1);
        let graph: Graph<i32> = [a.clone()].into_iter().collect();
        assert_eq!(
            format!("{:?}", graph),
            format!("Graph {{ vertices: [{:?}] }}", a)
        );
    }

    #[quickcheck]
    fn prop_arbitrary_graphs_are_consistent(ArbGraph { graph, .. }: ArbGraph) -> bool {
        check_graph_consistency(&graph);
        true
    }

    #[quickcheck]
    fn prop_insert_edge_is_symmetric(ArbGraph { graph, vertices }: ArbGraph) -> bool {
        let pairs: Vec<_> = vertices.iter().zip(vertices.iter().rev()).collect();
        pairs.into_iter().all(|(v1, v2)| {
            graph.insert_edge(v1, v2).is_ok() && v1.is_adjacent(v2) && v2.is_adjacent(v1)
        })
    }

    #[quickcheck]
    fn prop_remove_edge_removes_both_directions(ArbGraph { graph, vertices }: ArbGraph) -> bool {
        let edges: Vec<_> = vertices
            .iter()
            .flat_map(|v| v.adjacent().into_iter().map(move |n| (v.clone(), n)))
            .collect();
        edges.into_iter().all(|(v1, v2)| {
            graph.remove_edge(&v1, &v2).is_ok() && !v1.is_adjacent(&v2) && !v2.is_adjacent(&v1)
        })
    }

    #[quickcheck]
    fn prop_remove_vertex_closes_adjacency(ArbGraph { mut graph, vertices }: ArbGraph) -> bool {
        for (i, vertex) in vertices.iter().enumerate() {
            if graph.remove_vertex(vertex).is_err() || graph.contains(vertex) {
                return false;
            }
            if graph.vertices().any(|u| u.is_adjacent(vertex)) {
                return false;
            }
            if graph.len() != vertices.len() - i - 1 {
                return false;
            }
            check_graph_consistency(&graph);
        }
        graph.is_empty()
    }

    #[quickcheck]
    fn prop_insert_vertex_is_idempotent(ArbGraph { mut graph, vertices }: ArbGraph) -> bool {
        let len = graph.len();
        vertices
            .iter()
            .all(|v| graph.insert_vertex(v) == Ok(false))
            && graph.len() == len
    }
}
