use std::io;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
  #[error("I/O error on {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("CSV error: {0}")]
  Csv(#[from] csv::Error),
  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),
  #[error("invalid graph6 line {line:?}: {reason}")]
  Graph6 { line: String, reason: &'static str },
  #[error("graph with {0} vertices is too large for graph6 (max 258047)")]
  TooLarge(usize),
  #[error("edge ({0}, {1}) is out of range for a graph on {2} vertices")]
  EdgeOutOfRange(usize, usize, usize),
  #[error("rendering failed: {0}")]
  Render(String),
}

impl Error {
  pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
    Self::Io { path: path.into(), source }
  }
}

pub type Result<T> = std::result::Result<T, Error>;
