use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::degree::{BucketRow, DegreeBuckets};
use crate::graph6::to_graph6;
use crate::{Error, Result, SerializableGraph, SimpleGraph};

fn create(path: &Path) -> Result<BufWriter<File>> {
  let file = File::create(path).map_err(|e| Error::io(path, e))?;
  Ok(BufWriter::new(file))
}

/// =============== bucket table ===============

/// Write the `degseq,count` table; returns the number of rows written.
pub fn save_bucket_csv(buckets: &DegreeBuckets<'_>, path: &Path) -> Result<usize> {
  let rows = buckets.rows();
  let mut writer = csv::Writer::from_writer(create(path)?);
  for row in &rows {
    writer.serialize(row)?;
  }
  writer.flush().map_err(|e| Error::io(path, e))?;
  info!(rows = rows.len(), path = %path.display(), "wrote degree-sequence buckets");
  Ok(rows.len())
}

pub fn read_bucket_csv(path: &Path) -> Result<Vec<BucketRow>> {
  let mut reader = csv::Reader::from_path(path)?;
  let rows = reader.deserialize().collect::<std::result::Result<Vec<BucketRow>, _>>()?;
  Ok(rows)
}

/// =============== graph6 list ===============

/// One graph6 line per graph, no header.
pub fn save_graph6(graphs: &[SimpleGraph], path: &Path) -> Result<()> {
  let mut writer = create(path)?;
  for g in graphs {
    writeln!(writer, "{}", to_graph6(g)?).map_err(|e| Error::io(path, e))?;
  }
  writer.flush().map_err(|e| Error::io(path, e))?;
  info!(graphs = graphs.len(), path = %path.display(), "wrote graph6 list");
  Ok(())
}

/// =============== JSON catalog ===============

pub fn save_graphs_json(graphs: &[SimpleGraph], path: &Path) -> Result<()> {
  let pb = ProgressBar::new(graphs.len() as u64);
  pb.set_style(
    ProgressStyle::with_template("[save] [{elapsed_precise}] {wide_bar:.green/white} {pos}/{len}")
      .unwrap_or_else(|_| ProgressStyle::default_bar()),
  );

  // serialize graph-by-graph with progress
  let mut serializable = Vec::with_capacity(graphs.len());
  for g in graphs {
    serializable.push(SerializableGraph::from(g));
    pb.inc(1);
  }
  pb.finish_and_clear();

  // write to file once
  let mut writer = create(path)?;
  serde_json::to_writer_pretty(&mut writer, &serializable)?;
  writer.flush().map_err(|e| Error::io(path, e))?;
  info!(graphs = graphs.len(), path = %path.display(), "wrote JSON catalog");
  Ok(())
}
