//! Thumbnail grid of node-link drawings.
//!
//! The drawing area is created, filled and presented inside
//! [`render_montage`]; nothing outlives the call.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::{info, warn};

use crate::layout::{Layout, Position};
use crate::{Error, Result, SimpleGraph};

#[derive(Debug, Clone)]
pub struct MontageOptions {
  /// Fixed column count; `None` picks `ceil(sqrt(count))`.
  pub cols: Option<usize>,
  pub layout: Layout,
  /// Edge length of one square cell in pixels.
  pub cell_px: u32,
  pub node_radius: i32,
  pub edge_width: u32,
}

impl Default for MontageOptions {
  fn default() -> Self {
    Self {
      cols: None,
      layout: Layout::Spring,
      cell_px: 150,
      node_radius: 3,
      edge_width: 1,
    }
  }
}

/// `(rows, cols)` for `count` cells. Columns beyond `count` would only be
/// blank, so the column count never exceeds it.
pub fn grid_shape(count: usize, cols: Option<usize>) -> (usize, usize) {
  if count == 0 {
    return (0, 0);
  }
  let cols = match cols {
    Some(0) => {
      warn!("--cols must be at least 1, using 1");
      1
    }
    Some(c) => c.min(count),
    None => (count as f64).sqrt().ceil() as usize,
  };
  (count.div_ceil(cols), cols)
}

/// Render `graphs` as a grid image at `path`. PNG, JPEG and BMP are chosen by
/// extension; `.svg` writes vector output.
///
/// Returns `Ok(false)` without touching the file system when there is nothing
/// to draw.
pub fn render_montage(graphs: &[SimpleGraph], path: &Path, options: &MontageOptions) -> Result<bool> {
  if graphs.is_empty() {
    warn!("no graphs to draw, skipping montage");
    return Ok(false);
  }
  let (rows, cols) = grid_shape(graphs.len(), options.cols);
  let size = (
    canvas_side(cols, options.cell_px)?,
    canvas_side(rows, options.cell_px)?,
  );
  info!(graphs = graphs.len(), rows, cols, path = %path.display(), "rendering montage");

  let is_svg = path
    .extension()
    .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
  let rendered = if is_svg {
    draw_grid(SVGBackend::new(path, size).into_drawing_area(), graphs, rows, cols, options)
  } else {
    draw_grid(BitMapBackend::new(path, size).into_drawing_area(), graphs, rows, cols, options)
  };
  rendered.map_err(Error::Render)?;
  Ok(true)
}

fn canvas_side(cells: usize, cell_px: u32) -> Result<u32> {
  u32::try_from(cells)
    .ok()
    .and_then(|c| c.checked_mul(cell_px))
    .ok_or_else(|| Error::Render(format!("{cells} cells of {cell_px}px do not fit in an image")))
}

fn draw_grid<DB: DrawingBackend>(
  root: DrawingArea<DB, Shift>,
  graphs: &[SimpleGraph],
  rows: usize,
  cols: usize,
  options: &MontageOptions,
) -> std::result::Result<(), String> {
  root.fill(&WHITE).map_err(|e| e.to_string())?;
  let cells = root.split_evenly((rows, cols));
  for (cell, graph) in cells.iter().zip(graphs) {
    let positions = options.layout.positions(graph);
    draw_graph(cell, graph, &positions, options).map_err(|e| e.to_string())?;
  }
  root.present().map_err(|e| e.to_string())?;
  Ok(())
}

fn draw_graph<DB: DrawingBackend>(
  cell: &DrawingArea<DB, Shift>,
  graph: &SimpleGraph,
  positions: &[Position],
  options: &MontageOptions,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
  let (w, h) = cell.dim_in_pixel();
  let margin = options.node_radius as f64 + 0.08 * w.min(h) as f64;
  let half_w = (w as f64 / 2.0 - margin).max(0.0);
  let half_h = (h as f64 / 2.0 - margin).max(0.0);
  let to_pixel = |(x, y): Position| -> (i32, i32) {
    (
      (w as f64 / 2.0 + x * half_w).round() as i32,
      (h as f64 / 2.0 - y * half_h).round() as i32,
    )
  };

  let edge_style = BLACK.mix(0.7).stroke_width(options.edge_width);
  for e in graph.raw_edges() {
    let a = to_pixel(positions[e.source().index()]);
    let b = to_pixel(positions[e.target().index()]);
    cell.draw(&PathElement::new(vec![a, b], edge_style))?;
  }
  let node_style = RGBColor(31, 119, 180).filled();
  for &p in positions {
    cell.draw(&Circle::new(to_pixel(p), options.node_radius, node_style))?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::graph_from_edges;

  #[test]
  fn grid_shape_defaults_to_square_root() {
    assert_eq!(grid_shape(0, None), (0, 0));
    assert_eq!(grid_shape(1, None), (1, 1));
    assert_eq!(grid_shape(6, None), (2, 3));
    assert_eq!(grid_shape(21, None), (5, 5));
    assert_eq!(grid_shape(853, None), (29, 30));
  }

  #[test]
  fn grid_shape_honours_columns() {
    assert_eq!(grid_shape(6, Some(4)), (2, 4));
    assert_eq!(grid_shape(6, Some(10)), (1, 6));
    assert_eq!(grid_shape(3, Some(30_000_000)), (1, 3));
    assert_eq!(grid_shape(6, Some(0)), (6, 1));
  }

  #[test]
  fn empty_montage_writes_nothing() {
    let path = std::env::temp_dir().join(format!("montage-empty-{}.png", std::process::id()));
    assert!(!render_montage(&[], &path, &MontageOptions::default()).unwrap());
    assert!(!path.exists());
  }

  #[test]
  fn oversized_canvas_is_an_error() {
    let graphs: Vec<SimpleGraph> = (0..4).map(|_| graph_from_edges(1, &[])).collect();
    let path = std::env::temp_dir().join(format!("montage-huge-{}.png", std::process::id()));
    let options = MontageOptions {
      cell_px: u32::MAX,
      ..MontageOptions::default()
    };
    assert!(matches!(render_montage(&graphs, &path, &options), Err(Error::Render(_))));
    assert!(!path.exists());
  }

  #[test]
  fn renders_png_and_svg() {
    let graphs = vec![
      graph_from_edges(1, &[]),
      graph_from_edges(3, &[(0, 1), (1, 2)]),
      graph_from_edges(3, &[(0, 1), (1, 2), (2, 0)]),
    ];
    let options = MontageOptions {
      cell_px: 40,
      layout: Layout::Circular,
      ..MontageOptions::default()
    };
    for ext in ["png", "svg"] {
      let path = std::env::temp_dir().join(format!("montage-{}.{ext}", std::process::id()));
      assert!(render_montage(&graphs, &path, &options).unwrap());
      assert!(std::fs::metadata(&path).unwrap().len() > 0);
      std::fs::remove_file(&path).unwrap();
    }
  }
}
