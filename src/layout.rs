//! Node placement for montage thumbnails.
//!
//! Every layout returns one `(x, y)` per vertex, in node-index order, scaled
//! so the largest coordinate magnitude is 1 and centred on the origin.

use std::f64::consts::PI;

use clap::ValueEnum;
use nalgebra::{DMatrix, SymmetricEigen};
use petgraph::algo::dijkstra;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::SimpleGraph;

pub type Position = (f64, f64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Layout {
  /// Fruchterman-Reingold force simulation
  #[default]
  Spring,
  /// Kamada-Kawai stress minimisation on shortest-path distances
  Kamada,
  /// Vertices evenly spaced on a circle
  Circular,
  /// Laplacian eigenvectors
  Spectral,
}

impl Layout {
  pub fn positions(self, graph: &SimpleGraph) -> Vec<Position> {
    let n = graph.node_count();
    if n <= 1 {
      return vec![(0.0, 0.0); n];
    }
    let raw = match self {
      Layout::Spring => spring(graph, SPRING_ITERATIONS, SPRING_SEED),
      Layout::Kamada => kamada_kawai(graph),
      Layout::Circular => circular(n),
      Layout::Spectral => spectral(graph),
    };
    rescale(raw)
  }
}

const SPRING_ITERATIONS: usize = 50;
const SPRING_SEED: u64 = 0;
const KAMADA_ITERATIONS: usize = 200;

fn adjacency(graph: &SimpleGraph) -> DMatrix<f64> {
  let n = graph.node_count();
  let mut a = DMatrix::zeros(n, n);
  for e in graph.raw_edges() {
    let (u, v) = (e.source().index(), e.target().index());
    a[(u, v)] = 1.0;
    a[(v, u)] = 1.0;
  }
  a
}

/// Centre on the origin and scale into `[-1, 1]`.
fn rescale(mut pos: Vec<Position>) -> Vec<Position> {
  let n = pos.len() as f64;
  let (cx, cy) = pos.iter().fold((0.0, 0.0), |(sx, sy), &(x, y)| (sx + x, sy + y));
  let (cx, cy) = (cx / n, cy / n);
  let mut extent: f64 = 0.0;
  for p in pos.iter_mut() {
    p.0 -= cx;
    p.1 -= cy;
    extent = extent.max(p.0.abs()).max(p.1.abs());
  }
  if extent > 0.0 && extent.is_finite() {
    for p in pos.iter_mut() {
      p.0 /= extent;
      p.1 /= extent;
    }
  }
  pos
}

/// =============== circular ===============

fn circular(n: usize) -> Vec<Position> {
  (0..n)
    .map(|i| {
      let theta = 2.0 * PI * i as f64 / n as f64;
      (theta.cos(), theta.sin())
    })
    .collect()
}

/// =============== spring ===============

/// Fruchterman-Reingold with a linearly cooling step limit.
fn spring(graph: &SimpleGraph, iterations: usize, seed: u64) -> Vec<Position> {
  let n = graph.node_count();
  let a = adjacency(graph);
  let mut rng = StdRng::seed_from_u64(seed);
  let mut pos: Vec<Position> = (0..n)
    .map(|_| (rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
    .collect();

  let k = (1.0 / n as f64).sqrt();
  let mut t = 0.1;
  let dt = t / (iterations as f64 + 1.0);

  for _ in 0..iterations {
    let mut disp = vec![(0.0, 0.0); n];
    for i in 0..n {
      for j in 0..n {
        if i == j {
          continue;
        }
        let dx = pos[i].0 - pos[j].0;
        let dy = pos[i].1 - pos[j].1;
        let dist = (dx * dx + dy * dy).sqrt().max(0.01);
        // repulsion k^2/d, attraction d^2/k along edges
        let force = k * k / (dist * dist) - a[(i, j)] * dist / k;
        disp[i].0 += dx * force;
        disp[i].1 += dy * force;
      }
    }
    for (p, d) in pos.iter_mut().zip(&disp) {
      let length = (d.0 * d.0 + d.1 * d.1).sqrt().max(0.01);
      p.0 += d.0 * t / length;
      p.1 += d.1 * t / length;
    }
    t -= dt;
  }
  pos
}

/// =============== kamada-kawai ===============

fn shortest_paths(graph: &SimpleGraph) -> DMatrix<f64> {
  let n = graph.node_count();
  let mut d = DMatrix::from_element(n, n, f64::NAN);
  for source in graph.node_indices() {
    for (target, hops) in dijkstra(graph, source, None, |_| 1usize) {
      d[(source.index(), target.index())] = hops as f64;
    }
  }
  // unreachable pairs sit one step beyond the diameter
  let far = d.iter().filter(|x| x.is_finite()).fold(0.0f64, |m, &x| m.max(x)) + 1.0;
  d.apply(|x| {
    if x.is_nan() {
      *x = far;
    }
  });
  d
}

/// Stress majorization of `sum (|p_i - p_j| - d_ij)^2 / d_ij^2`, starting
/// from the circular layout. Vertices move one at a time against the
/// already-updated positions of the others.
fn kamada_kawai(graph: &SimpleGraph) -> Vec<Position> {
  let n = graph.node_count();
  let d = shortest_paths(graph);
  let mut pos = circular(n);

  for _ in 0..KAMADA_ITERATIONS {
    for i in 0..n {
      let (mut sx, mut sy, mut wsum) = (0.0, 0.0, 0.0);
      for j in 0..n {
        if i == j {
          continue;
        }
        let dij = d[(i, j)];
        let w = 1.0 / (dij * dij);
        let dx = pos[i].0 - pos[j].0;
        let dy = pos[i].1 - pos[j].1;
        let dist = (dx * dx + dy * dy).sqrt();
        let (ux, uy) = if dist > 1e-9 { (dx / dist, dy / dist) } else { (0.0, 0.0) };
        sx += w * (pos[j].0 + dij * ux);
        sy += w * (pos[j].1 + dij * uy);
        wsum += w;
      }
      pos[i] = (sx / wsum, sy / wsum);
    }
  }
  pos
}

/// =============== spectral ===============

/// Eigenvectors of the Laplacian for the second and third smallest
/// eigenvalues. Two-vertex graphs fall back to the circular layout.
fn spectral(graph: &SimpleGraph) -> Vec<Position> {
  let n = graph.node_count();
  if n < 3 {
    return circular(n);
  }
  let a = adjacency(graph);
  let degrees = DMatrix::from_diagonal(&a.column_sum());
  let laplacian = degrees - a;
  let eigen = SymmetricEigen::new(laplacian);

  let mut order: Vec<usize> = (0..n).collect();
  order.sort_by(|&i, &j| eigen.eigenvalues[i].total_cmp(&eigen.eigenvalues[j]));
  let (ex, ey) = (eigen.eigenvectors.column(order[1]), eigen.eigenvectors.column(order[2]));
  (0..n).map(|i| (ex[i], ey[i])).collect()
}
