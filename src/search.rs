use std::{
    collections::{HashSet, VecDeque},
    iter::FusedIterator,
    marker::PhantomData,
};

use crate::{Graph, Vertex, VertexId};

const DEFAULT_HASH_SET_CAPACITY: usize = 64;

/// Breadth-first traversal from a single start vertex, created by
/// [`Graph::bfs`].
///
/// A vertex can sit in the queue several times; it is marked visited when it
/// is dequeued, and later copies are skipped.  Neighbors are enqueued in
/// adjacency insertion order.
pub struct Bfs<'g, T> {
    visited: HashSet<VertexId>,
    queue: VecDeque<Vertex<T>>,
    graph: PhantomData<&'g Graph<T>>,
}

impl<'g, T> Bfs<'g, T> {
    pub(crate) fn new(start: Vertex<T>) -> Self {
        Self {
            visited: HashSet::with_capacity(DEFAULT_HASH_SET_CAPACITY),
            queue: VecDeque::from([start]),
            graph: PhantomData,
        }
    }
}

impl<'g, T> Iterator for Bfs<'g, T> {
    type Item = Vertex<T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(vertex) = self.queue.pop_front() {
            if !self.visited.insert(vertex.id()) {
                continue;
            }
            for neighbor in vertex.adjacent() {
                if !self.visited.contains(&neighbor.id()) {
                    self.queue.push_back(neighbor);
                }
            }
            return Some(vertex);
        }
        None
    }
}

impl<'g, T> FusedIterator for Bfs<'g, T> {}

/// Depth-first pre-order traversal from a single start vertex, created by
/// [`Graph::dfs`].
///
/// Visits the same sequence as the recursive formulation (visit a vertex, then
/// fully explore each unvisited neighbor in adjacency order before moving on to
/// the next) but keeps pending neighbors on an explicit stack, so long chains
/// cannot overflow the call stack.  Neighbors are pushed in reverse so the
/// first one is popped first, and visited marks are checked at pop time.
pub struct Dfs<'g, T> {
    visited: HashSet<VertexId>,
    stack: Vec<Vertex<T>>,
    graph: PhantomData<&'g Graph<T>>,
}

impl<'g, T> Dfs<'g, T> {
    pub(crate) fn new(start: Vertex<T>) -> Self {
        Self {
            visited: HashSet::with_capacity(DEFAULT_HASH_SET_CAPACITY),
            stack: vec![start],
            graph: PhantomData,
        }
    }
}

impl<'g, T> Iterator for Dfs<'g, T> {
    type Item = Vertex<T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(vertex) = self.stack.pop() {
            if self.visited.insert(vertex.id()) {
                let visited = &self.visited;
                let successors = vertex
                    .adjacent()
                    .into_iter()
                    .rev()
                    .filter(|neighbor| !visited.contains(&neighbor.id()));
                self.stack.extend(successors);
                return Some(vertex);
            }
        }
        None
    }
}

impl<'g, T> FusedIterator for Dfs<'g, T> {}
