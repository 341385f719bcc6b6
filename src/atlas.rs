//! Catalogs of small unlabeled graphs.
//!
//! An [`AtlasProvider`] hands out every pairwise non-isomorphic graph on a
//! given number of vertices. [`unlabeled_connected`] applies the order limit
//! and keeps the connected ones.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use petgraph::algo::{connected_components, is_isomorphic};
use petgraph::graph::NodeIndex;
use tracing::{debug, info};

use crate::degree::degree_sequence;
use crate::graph6::{from_graph6, to_graph6};
use crate::{Error, Result, SerializableGraph, SimpleGraph};

/// Largest order for which unlabeled catalogs are produced.
pub const MAX_ATLAS_ORDER: usize = 7;

pub trait AtlasProvider {
  /// Every non-isomorphic graph on exactly `n` vertices, connected or not,
  /// in atlas order (see [`sort_atlas_order`]).
  fn graphs_on(&self, n: usize) -> Result<Vec<SimpleGraph>>;
}

/// Connected unlabeled graphs on `n` vertices, in the provider's order.
///
/// Empty for `n > MAX_ATLAS_ORDER` (a documented limit, not a failure) and for
/// `n < 1`, since the null graph is not connected.
pub fn unlabeled_connected<A>(atlas: &A, n: i64) -> Result<Vec<SimpleGraph>>
where
  A: AtlasProvider + ?Sized,
{
  if n < 1 || n > MAX_ATLAS_ORDER as i64 {
    debug!(n, "order outside the atlas range");
    return Ok(Vec::new());
  }
  let all = atlas.graphs_on(n as usize)?;
  let total = all.len();
  let connected: Vec<SimpleGraph> = all.into_iter().filter(is_connected).collect();
  info!(n, total, connected = connected.len(), "filtered atlas to connected graphs");
  Ok(connected)
}

pub fn is_connected(graph: &SimpleGraph) -> bool {
  graph.node_count() > 0 && connected_components(graph) == 1
}

/// =============== atlas order ===============

/// Increasing edge count, then increasing degree sequence (degrees read in
/// ascending order), then graph6 text as a final tie-break.
pub fn sort_atlas_order(graphs: &mut Vec<SimpleGraph>) -> Result<()> {
  let mut keyed = Vec::with_capacity(graphs.len());
  for g in graphs.drain(..) {
    let mut ascending = degree_sequence(&g).as_slice().to_vec();
    ascending.reverse();
    keyed.push(((g.edge_count(), ascending, to_graph6(&g)?), g));
  }
  keyed.sort_by(|a, b| a.0.cmp(&b.0));
  graphs.extend(keyed.into_iter().map(|(_, g)| g));
  Ok(())
}

/// =============== isomorphism rejection ===============

/// Cheap isomorphism invariant: each vertex's degree together with the sorted
/// degrees of its neighbours, the whole list sorted.
fn invariant(graph: &SimpleGraph) -> Vec<(usize, Vec<usize>)> {
  let degree = |v: NodeIndex| graph.neighbors(v).count();
  let mut rows: Vec<(usize, Vec<usize>)> = graph
    .node_indices()
    .map(|v| {
      let mut around: Vec<usize> = graph.neighbors(v).map(degree).collect();
      around.sort_unstable();
      (degree(v), around)
    })
    .collect();
  rows.sort();
  rows
}

/// Keep one representative per isomorphism class: bucket by invariant, then
/// run exact isomorphism tests inside each bucket. First-seen representatives
/// survive.
pub fn deduplicate_graphs(graphs: Vec<SimpleGraph>) -> Vec<SimpleGraph> {
  let total_before = graphs.len();

  // 1) bucket by invariant
  let mut buckets: BTreeMap<Vec<(usize, Vec<usize>)>, Vec<usize>> = BTreeMap::new();
  for (idx, g) in graphs.iter().enumerate() {
    buckets.entry(invariant(g)).or_default().push(idx);
  }

  // 2) exact isomorphism filtering within each bucket
  let pb = ProgressBar::new(buckets.len() as u64);
  pb.set_style(progress_style("[iso  ] {pos}/{len} {elapsed_precise}"));

  let mut keep = vec![false; graphs.len()];
  for bucket in buckets.values() {
    let mut representatives: Vec<usize> = Vec::new();
    for &idx in bucket {
      if !representatives
        .iter()
        .any(|&r| is_isomorphic(&graphs[idx], &graphs[r]))
      {
        representatives.push(idx);
        keep[idx] = true;
      }
    }
    pb.inc(1);
  }
  pb.finish_and_clear();

  let uniques: Vec<SimpleGraph> = graphs
    .into_iter()
    .zip(keep)
    .filter_map(|(g, kept)| kept.then_some(g))
    .collect();
  debug!(
    before = total_before,
    after = uniques.len(),
    removed = total_before - uniques.len(),
    "deduplication complete"
  );
  uniques
}

fn progress_style(template: &str) -> ProgressStyle {
  ProgressStyle::with_template(template)
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("█▉▊▋▌▍▎▏  ")
}

/// =============== generated atlas ===============

/// Builds the catalog by vertex augmentation: every graph on `k + 1` vertices
/// is some graph on `k` vertices plus one vertex joined to a subset of the
/// old ones, so extending each class representative by every subset and
/// removing isomorphic duplicates reaches all classes.
#[derive(Debug, Default, Clone, Copy)]
pub struct GeneratedAtlas;

impl GeneratedAtlas {
  fn extend_by_vertex(level: &[SimpleGraph], order: usize) -> Vec<SimpleGraph> {
    let old = order - 1;
    let pb = ProgressBar::new(level.len() as u64);
    pb.set_style(progress_style(
      "[atlas] n={msg} [{elapsed_precise}] {wide_bar:.cyan/blue} {pos}/{len}",
    ));
    pb.set_message(order.to_string());

    let mut candidates = Vec::with_capacity(level.len() << old);
    for graph in level {
      for mask in 0u32..(1 << old) {
        let mut g = graph.clone();
        let new_node = g.add_node(());
        for v in (0..old).filter(|v| mask & (1 << v) != 0) {
          g.add_edge(NodeIndex::new(v), new_node, ());
        }
        candidates.push(g);
      }
      pb.inc(1);
    }
    pb.finish_and_clear();

    deduplicate_graphs(candidates)
  }
}

impl AtlasProvider for GeneratedAtlas {
  fn graphs_on(&self, n: usize) -> Result<Vec<SimpleGraph>> {
    let mut level = vec![SimpleGraph::new_undirected()];
    for order in 1..=n {
      level = Self::extend_by_vertex(&level, order);
      debug!(order, classes = level.len(), "atlas level generated");
    }
    sort_atlas_order(&mut level)?;
    Ok(level)
  }
}

/// =============== file-backed atlas ===============

/// A precomputed catalog read from disk: a JSON array of
/// [`SerializableGraph`] (`.json`), or graph6 lines, optionally preceded by
/// a line holding the number of graphs.
#[derive(Debug, Clone)]
pub struct FileAtlas {
  path: PathBuf,
}

impl FileAtlas {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  fn load(&self) -> Result<Vec<SimpleGraph>> {
    info!(path = %self.path.display(), "loading atlas");
    let file = File::open(&self.path).map_err(|e| Error::io(&self.path, e))?;
    let reader = BufReader::new(file);

    let is_json = self
      .path
      .extension()
      .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
      let stored: Vec<SerializableGraph> = serde_json::from_reader(reader)?;
      return stored.iter().map(SerializableGraph::to_graph).collect();
    }

    let mut graphs = Vec::new();
    for (number, line) in reader.lines().enumerate() {
      let line = line.map_err(|e| Error::io(&self.path, e))?;
      let line = line.trim();
      if line.is_empty() || (number == 0 && line.parse::<usize>().is_ok()) {
        continue;
      }
      graphs.push(from_graph6(line)?);
    }
    Ok(graphs)
  }
}

impl AtlasProvider for FileAtlas {
  fn graphs_on(&self, n: usize) -> Result<Vec<SimpleGraph>> {
    let same_order: Vec<SimpleGraph> = self
      .load()?
      .into_iter()
      .filter(|g| g.node_count() == n)
      .collect();
    let mut graphs = deduplicate_graphs(same_order);
    sort_atlas_order(&mut graphs)?;
    Ok(graphs)
  }
}
