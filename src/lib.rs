use petgraph::Undirected;
use petgraph::graph::{Graph, NodeIndex};
use serde::{Deserialize, Serialize};

pub mod atlas;
pub mod counting;
pub mod degree;
pub mod error;
pub mod export;
pub mod graph6;
pub mod layout;
pub mod montage;

pub use error::{Error, Result};

/// Undirected simple graph with anonymous vertices.
pub type SimpleGraph = Graph<(), (), Undirected>;

/// =============== JSON interchange ===============

/// A graph as stored on disk: vertex count plus 1-indexed edge endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableGraph {
  pub node_count: usize,
  pub edges: Vec<(usize, usize)>,
}

impl SerializableGraph {
  pub fn to_graph(&self) -> Result<SimpleGraph> {
    let mut graph = SimpleGraph::with_capacity(self.node_count, self.edges.len());
    let nodes: Vec<NodeIndex> = (0..self.node_count).map(|_| graph.add_node(())).collect();
    for &(u, v) in &self.edges {
      // shift back to 0-indexed internally
      if u == 0 || v == 0 || u > self.node_count || v > self.node_count || u == v {
        return Err(Error::EdgeOutOfRange(u, v, self.node_count));
      }
      graph.update_edge(nodes[u - 1], nodes[v - 1], ());
    }
    Ok(graph)
  }
}

impl From<&SimpleGraph> for SerializableGraph {
  fn from(graph: &SimpleGraph) -> Self {
    let edges = graph
      .raw_edges()
      .iter()
      .map(|e| {
        let (u, v) = (e.source().index(), e.target().index());
        // 1-indexed for output
        (u.min(v) + 1, u.max(v) + 1)
      })
      .collect();
    SerializableGraph {
      node_count: graph.node_count(),
      edges,
    }
  }
}

/// Build a graph on `n` vertices from 0-indexed edge pairs.
pub fn graph_from_edges(n: usize, edges: &[(usize, usize)]) -> SimpleGraph {
  let mut graph = SimpleGraph::with_capacity(n, edges.len());
  for _ in 0..n {
    graph.add_node(());
  }
  for &(u, v) in edges {
    graph.update_edge(NodeIndex::new(u), NodeIndex::new(v), ());
  }
  graph
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn serializable_graph_shifts_indices() {
    let path = graph_from_edges(3, &[(0, 1), (2, 1)]);
    let stored = SerializableGraph::from(&path);
    assert_eq!(stored.node_count, 3);
    assert_eq!(stored.edges, vec![(1, 2), (2, 3)]);

    let back = stored.to_graph().unwrap();
    assert_eq!(back.node_count(), 3);
    assert_eq!(back.edge_count(), 2);
    assert!(back.contains_edge(NodeIndex::new(1), NodeIndex::new(2)));
  }

  #[test]
  fn serializable_graph_rejects_bad_edges() {
    let stored = SerializableGraph {
      node_count: 2,
      edges: vec![(1, 3)],
    };
    assert!(matches!(stored.to_graph(), Err(Error::EdgeOutOfRange(1, 3, 2))));

    let looped = SerializableGraph {
      node_count: 2,
      edges: vec![(2, 2)],
    };
    assert!(looped.to_graph().is_err());
  }
}
