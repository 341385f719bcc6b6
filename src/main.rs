use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use connected_graphs::atlas::{AtlasProvider, FileAtlas, GeneratedAtlas, MAX_ATLAS_ORDER, unlabeled_connected};
use connected_graphs::counting::{connected_labeled_count, group_thousands, labeled_count_table};
use connected_graphs::degree::DegreeBuckets;
use connected_graphs::export::{save_bucket_csv, save_graph6, save_graphs_json};
use connected_graphs::layout::Layout;
use connected_graphs::montage::{MontageOptions, render_montage};
use connected_graphs::{Result, SimpleGraph};

/// Count/draw connected simple graphs on n labeled/unlabeled vertices.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
  /// number of vertices
  #[arg(short = 'n', default_value_t = 7, allow_negative_numbers = true)]
  n: i64,

  /// layout for montage (n<=7)
  #[arg(long, value_enum, default_value_t = Layout::Spring)]
  layout: Layout,

  /// columns in montage grid
  #[arg(long)]
  cols: Option<usize>,

  /// export graph6 of non-isomorphic connected graphs (n<=7)
  #[arg(long)]
  g6: Option<PathBuf>,

  /// export CSV (degree-sequence buckets) for n<=7
  #[arg(long = "bucket_csv")]
  bucket_csv: Option<PathBuf>,

  /// output image for montage (n<=7); .svg for vector output
  #[arg(long)]
  montage: Option<PathBuf>,

  /// export the connected catalog as JSON (n<=7)
  #[arg(long)]
  json: Option<PathBuf>,

  /// read the atlas from a JSON or graph6 file instead of generating it
  #[arg(long)]
  atlas: Option<PathBuf>,

  /// montage cell size in pixels
  #[arg(long = "cell-px", default_value_t = 150)]
  cell_px: u32,

  /// also print c_1 .. c_n
  #[arg(long)]
  table: bool,

  /// diagnostics on stderr (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

fn init_tracing(verbose: u8) {
  let level = match verbose {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::new(level))
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

/// Run one optional export; a failure is logged and remembered, never fatal.
fn run_export(failed: &mut bool, what: &str, export: impl FnOnce() -> Result<()>) {
  if let Err(e) = export() {
    error!("{what} export failed: {e}");
    *failed = true;
  }
}

fn export_catalog(cli: &Cli, graphs: &[SimpleGraph]) -> bool {
  let mut failed = false;

  if graphs.is_empty() {
    let requested = [
      ("bucket CSV", &cli.bucket_csv),
      ("graph6", &cli.g6),
      ("JSON", &cli.json),
      ("montage", &cli.montage),
    ];
    for (what, path) in requested {
      if let Some(path) = path {
        warn!("no graphs on n={}, skipping {what} export to {}", cli.n, path.display());
      }
    }
    return false;
  }

  if let Some(path) = &cli.bucket_csv {
    run_export(&mut failed, "bucket CSV", || {
      let buckets = DegreeBuckets::classify(graphs);
      save_bucket_csv(&buckets, path)?;
      println!(
        "[Output] degree-sequence buckets -> {} (unique degseqs: {})",
        path.display(),
        buckets.len()
      );
      Ok(())
    });
  }

  if let Some(path) = &cli.g6 {
    run_export(&mut failed, "graph6", || {
      save_graph6(graphs, path)?;
      println!("[Output] graph6 list -> {}", path.display());
      Ok(())
    });
  }

  if let Some(path) = &cli.json {
    run_export(&mut failed, "JSON", || {
      save_graphs_json(graphs, path)?;
      println!("[Output] JSON catalog -> {}", path.display());
      Ok(())
    });
  }

  if let Some(path) = &cli.montage {
    run_export(&mut failed, "montage", || {
      let options = MontageOptions {
        cols: cli.cols,
        layout: cli.layout,
        cell_px: cli.cell_px,
        ..MontageOptions::default()
      };
      if render_montage(graphs, path, &options)? {
        println!("[Output] montage image -> {}", path.display());
      }
      Ok(())
    });
  }

  failed
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);
  let n = cli.n;

  let labeled = connected_labeled_count(n);
  println!("[Connected] labeled count c_{n} = {}", group_thousands(&labeled));
  if cli.table {
    for (m, c) in labeled_count_table(n.max(0) as usize).iter().enumerate() {
      println!("  c_{} = {}", m + 1, group_thousands(c));
    }
  }

  if n > MAX_ATLAS_ORDER as i64 {
    println!("[Note] Unlabeled/atlas-based outputs are available only for n ≤ {MAX_ATLAS_ORDER}.");
    return ExitCode::SUCCESS;
  }

  let atlas: Box<dyn AtlasProvider> = match &cli.atlas {
    Some(path) => Box::new(FileAtlas::new(path)),
    None => Box::new(GeneratedAtlas),
  };
  let graphs = match unlabeled_connected(atlas.as_ref(), n) {
    Ok(graphs) => graphs,
    Err(e) => {
      error!("could not build the unlabeled catalog: {e}");
      return ExitCode::FAILURE;
    }
  };
  info!(n, count = graphs.len(), "unlabeled catalog ready");
  println!("[Connected] unlabeled (non-isomorphic) count on n={n}: {}", graphs.len());

  if export_catalog(&cli, &graphs) {
    ExitCode::FAILURE
  } else {
    ExitCode::SUCCESS
  }
}
