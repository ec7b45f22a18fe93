#![cfg(test)]

use std::collections::HashSet;
use std::hash::Hash;

use quickcheck::{Arbitrary, Gen};

use crate::{Graph, Vertex};

/// A randomly generated graph together with its vertices in insertion order.
#[derive(Debug, Clone)]
pub struct ArbGraph {
    pub graph: Graph<u8>,
    pub vertices: Vec<Vertex<u8>>,
}

impl Arbitrary for ArbGraph {
    fn arbitrary(g: &mut Gen) -> Self {
        let num_vertices = usize::arbitrary(g) % 20; // Limit size for testing
        let num_edges = usize::arbitrary(g) % 50;
        let num_extra_self_loops = usize::arbitrary(g) % 5;

        let vertices: Vec<_> = (0..num_vertices)
            .map(|_| Vertex::new(u8::arbitrary(g)))
            .collect();
        let graph: Graph<u8> = vertices.iter().cloned().collect();

        for i in 0..num_edges {
            if vertices.is_empty() {
                break;
            }
            let source = &vertices[usize::arbitrary(g) % vertices.len()];
            let target = &vertices[usize::arbitrary(g) % vertices.len()];
            graph
                .insert_edge(source, target)
                .expect("live vertices always resolve");
            if i < num_extra_self_loops {
                graph
                    .insert_edge(source, source)
                    .expect("live vertices always resolve");
            }
        }

        ArbGraph { graph, vertices }
    }
}

pub fn has_duplicates<T: Eq + Hash>(items: impl IntoIterator<Item = T>) -> bool {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item) {
            return true;
        }
    }
    false
}

/// Checks the internal consistency of a graph whose edges were all added
/// with `insert_edge`.
pub fn check_graph_consistency<T>(graph: &Graph<T>) {
    assert_eq!(graph.vertices().count(), graph.len());
    assert_eq!(graph.is_empty(), graph.len() == 0);
    assert!(!has_duplicates(graph.vertices().map(Vertex::id)));

    for vertex in graph.vertices() {
        assert!(graph.contains(vertex));

        let neighbors = vertex.adjacent();
        assert!(!has_duplicates(neighbors.iter().map(Vertex::id)));
        assert_eq!(vertex.degree(), neighbors.len());

        // Every edge is a pair of mutual entries.
        for neighbor in &neighbors {
            assert!(
                neighbor.is_adjacent(vertex),
                "{} lists {} but not the reverse",
                vertex.id(),
                neighbor.id()
            );
        }
    }
}
