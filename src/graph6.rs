//! graph6 text encoding.
//!
//! A graph6 line is `N(n)` followed by the upper triangle of the adjacency
//! matrix, read column by column (`(0,1), (0,2), (1,2), (0,3), ...`), packed
//! six bits per printable byte offset by 63.

use petgraph::graph::NodeIndex;

use crate::{Error, Result, SimpleGraph};

const OFFSET: u8 = 63;
const SHORT_LIMIT: usize = 62;
const LONG_LIMIT: usize = 258_047;

fn push_size(out: &mut String, n: usize) {
  if n <= SHORT_LIMIT {
    out.push((n as u8 + OFFSET) as char);
  } else {
    out.push('~');
    for shift in [12, 6, 0] {
      out.push((((n >> shift) & 0x3f) as u8 + OFFSET) as char);
    }
  }
}

/// Encode `graph` as a single graph6 line without header or newline.
pub fn to_graph6(graph: &SimpleGraph) -> Result<String> {
  let n = graph.node_count();
  if n > LONG_LIMIT {
    return Err(Error::TooLarge(n));
  }

  let mut out = String::new();
  push_size(&mut out, n);

  let mut chunk = 0u8;
  let mut filled = 0;
  for j in 1..n {
    for i in 0..j {
      chunk <<= 1;
      if graph.contains_edge(NodeIndex::new(i), NodeIndex::new(j)) {
        chunk |= 1;
      }
      filled += 1;
      if filled == 6 {
        out.push((chunk + OFFSET) as char);
        chunk = 0;
        filled = 0;
      }
    }
  }
  if filled > 0 {
    // pad the last group with zeros
    out.push(((chunk << (6 - filled)) + OFFSET) as char);
  }

  Ok(out)
}

/// Decode one graph6 line. An optional `>>graph6<<` header is accepted.
pub fn from_graph6(line: &str) -> Result<SimpleGraph> {
  let text = line.trim();
  let text = text.strip_prefix(">>graph6<<").unwrap_or(text);
  let bad = |reason: &'static str| Error::Graph6 {
    line: line.to_string(),
    reason,
  };

  let bytes = text.as_bytes();
  if bytes.is_empty() {
    return Err(bad("empty line"));
  }
  if bytes.iter().any(|&b| !(OFFSET..=126).contains(&b)) {
    return Err(bad("byte outside the printable range 63..=126"));
  }

  let (n, body) = if bytes[0] != b'~' {
    ((bytes[0] - OFFSET) as usize, &bytes[1..])
  } else {
    if bytes.len() < 4 || bytes[1] == b'~' {
      return Err(bad("unsupported size header"));
    }
    let n = bytes[1..4]
      .iter()
      .fold(0usize, |acc, &b| (acc << 6) | (b - OFFSET) as usize);
    (n, &bytes[4..])
  };

  let num_bits = n * n.saturating_sub(1) / 2;
  if body.len() != num_bits.div_ceil(6) {
    return Err(bad("body length does not match vertex count"));
  }

  let bits = body
    .iter()
    .flat_map(|&b| (0..6).rev().map(move |i| ((b - OFFSET) >> i) & 1 == 1));

  let pairs = (1..n).flat_map(|j| (0..j).map(move |i| (i, j)));
  let edges: Vec<(usize, usize)> = pairs
    .zip(bits)
    .filter_map(|(pair, bit)| bit.then_some(pair))
    .collect();

  Ok(crate::graph_from_edges(n, &edges))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::graph_from_edges;

  #[test]
  fn encodes_small_graphs() {
    assert_eq!(to_graph6(&graph_from_edges(1, &[])).unwrap(), "@");
    assert_eq!(to_graph6(&graph_from_edges(2, &[(0, 1)])).unwrap(), "A_");
    assert_eq!(
      to_graph6(&graph_from_edges(3, &[(0, 1), (0, 2), (1, 2)])).unwrap(),
      "Bw"
    );
    let k4: Vec<(usize, usize)> = vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
    assert_eq!(to_graph6(&graph_from_edges(4, &k4)).unwrap(), "C~");
  }

  #[test]
  fn encodes_path_on_five_vertices() {
    // bits 101001 0001(00)
    let p5 = graph_from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
    assert_eq!(to_graph6(&p5).unwrap(), "DhC");
  }

  #[test]
  fn decodes_with_header_and_whitespace() {
    let g = from_graph6(">>graph6<<C~\n").unwrap();
    assert_eq!(g.node_count(), 4);
    assert_eq!(g.edge_count(), 6);
  }

  #[test]
  fn large_size_header() {
    let g = graph_from_edges(63, &[(0, 62)]);
    let line = to_graph6(&g).unwrap();
    assert!(line.starts_with("~??~"));
    let back = from_graph6(&line).unwrap();
    assert_eq!(back.node_count(), 63);
    assert!(back.contains_edge(NodeIndex::new(0), NodeIndex::new(62)));
    assert_eq!(back.edge_count(), 1);
  }

  #[test]
  fn rejects_malformed_lines() {
    assert!(from_graph6("").is_err());
    assert!(from_graph6("C~~").is_err());
    assert!(from_graph6("C\u{1}").is_err());
  }
}
