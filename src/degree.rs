//! Degree-sequence buckets.
//!
//! Two graphs with the same sorted degrees land in the same bucket even when
//! they are not isomorphic: the sequence is a necessary condition for
//! isomorphism, never a certificate of it. Buckets are only used for reporting.

use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::SimpleGraph;

/// Vertex degrees sorted in non-increasing order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DegreeSequence(Vec<usize>);

impl DegreeSequence {
  pub fn new(mut degrees: Vec<usize>) -> Self {
    degrees.sort_unstable_by(|a, b| b.cmp(a));
    Self(degrees)
  }

  pub fn as_slice(&self) -> &[usize] {
    &self.0
  }
}

impl fmt::Display for DegreeSequence {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.iter().join(" "))
  }
}

pub fn degree_sequence(graph: &SimpleGraph) -> DegreeSequence {
  DegreeSequence::new(
    graph
      .node_indices()
      .map(|v| graph.neighbors(v).count())
      .collect(),
  )
}

/// One line of the bucket table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRow {
  pub degseq: String,
  pub count: usize,
}

/// Graphs grouped by degree sequence, first-seen order inside each bucket.
#[derive(Debug, Default)]
pub struct DegreeBuckets<'a> {
  buckets: BTreeMap<DegreeSequence, Vec<&'a SimpleGraph>>,
}

impl<'a> DegreeBuckets<'a> {
  pub fn classify(graphs: &'a [SimpleGraph]) -> Self {
    let mut buckets: BTreeMap<DegreeSequence, Vec<&'a SimpleGraph>> = BTreeMap::new();
    for g in graphs {
      buckets.entry(degree_sequence(g)).or_default().push(g);
    }
    debug!(graphs = graphs.len(), buckets = buckets.len(), "classified by degree sequence");
    Self { buckets }
  }

  /// Number of distinct degree sequences.
  pub fn len(&self) -> usize {
    self.buckets.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buckets.is_empty()
  }

  pub fn total_graphs(&self) -> usize {
    self.buckets.values().map(Vec::len).sum()
  }

  pub fn get(&self, key: &DegreeSequence) -> Option<&[&'a SimpleGraph]> {
    self.buckets.get(key).map(Vec::as_slice)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&DegreeSequence, &[&'a SimpleGraph])> {
    self.buckets.iter().map(|(k, v)| (k, v.as_slice()))
  }

  /// Rows sorted by degree sequence descending (component-wise), then by
  /// count descending.
  pub fn rows(&self) -> Vec<BucketRow> {
    self
      .buckets
      .iter()
      .sorted_by(|(ka, va), (kb, vb)| kb.cmp(ka).then(vb.len().cmp(&va.len())))
      .map(|(k, v)| BucketRow {
        degseq: k.to_string(),
        count: v.len(),
      })
      .collect()
  }
}
