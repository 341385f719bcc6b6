use std::path::PathBuf;
use std::process::{Command, Output};

use connected_graphs::export::read_bucket_csv;

fn run(args: &[&str]) -> Output {
  Command::new(env!("CARGO_BIN_EXE_connected-graphs"))
    .args(args)
    .output()
    .expect("binary runs")
}

fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}

fn scratch(name: &str) -> PathBuf {
  std::env::temp_dir().join(format!("connected-graphs-cli-{}-{name}", std::process::id()))
}

#[test]
fn order_five_without_exports() {
  let output = run(&["-n", "5"]);
  assert!(output.status.success());
  let text = stdout(&output);
  assert!(text.contains("[Connected] labeled count c_5 = 728"), "{text}");
  assert!(text.contains("[Connected] unlabeled (non-isomorphic) count on n=5: 21"), "{text}");
  assert!(!text.contains("[Output]"), "{text}");
}

#[test]
fn default_order_is_seven() {
  let text = stdout(&run(&[]));
  assert!(text.contains("c_7 = 1,866,256"), "{text}");
  assert!(text.contains("count on n=7: 853"), "{text}");
}

#[test]
fn large_orders_skip_the_catalog() {
  let output = run(&["-n", "12"]);
  assert!(output.status.success());
  let text = stdout(&output);
  assert!(text.contains("c_12 = 73,354,596,206,766,622,208"), "{text}");
  assert!(text.contains("[Note] Unlabeled/atlas-based outputs are available only for n ≤ 7."));
  assert!(!text.contains("unlabeled (non-isomorphic)"));
}

#[test]
fn non_positive_orders_count_zero() {
  let text = stdout(&run(&["-n", "0"]));
  assert!(text.contains("c_0 = 0"), "{text}");
  assert!(text.contains("count on n=0: 0"), "{text}");

  let text = stdout(&run(&["-n", "-3"]));
  assert!(text.contains("c_-3 = 0"), "{text}");
}

#[test]
fn empty_catalog_skips_exports() {
  let csv = scratch("empty.csv");
  let g6 = scratch("empty.g6");
  let output = run(&[
    "-n",
    "0",
    "--g6",
    g6.to_str().unwrap(),
    "--bucket_csv",
    csv.to_str().unwrap(),
  ]);
  assert!(output.status.success());
  let text = stdout(&output);
  assert!(!text.contains("[Output]"), "{text}");
  let diagnostics = String::from_utf8_lossy(&output.stderr);
  assert!(diagnostics.contains("skipping bucket CSV export"), "{diagnostics}");
  assert!(diagnostics.contains("skipping graph6 export"), "{diagnostics}");
  assert!(!csv.exists());
  assert!(!g6.exists());
}

#[test]
fn wide_montage_columns_are_clamped() {
  let png = scratch("wide.png");
  let output = run(&[
    "-n",
    "3",
    "--montage",
    png.to_str().unwrap(),
    "--cols",
    "30000000",
    "--cell-px",
    "20",
  ]);
  assert!(output.status.success());
  assert!(stdout(&output).contains("[Output] montage image ->"));
  assert!(std::fs::metadata(&png).unwrap().len() > 0);
  std::fs::remove_file(png).unwrap();
}

#[test]
fn table_lists_every_order() {
  let text = stdout(&run(&["-n", "4", "--table"]));
  for line in ["c_1 = 1", "c_2 = 1", "c_3 = 4", "c_4 = 38"] {
    assert!(text.contains(line), "{line} missing from {text}");
  }
}

#[test]
fn exports_are_written() {
  let csv = scratch("b.csv");
  let g6 = scratch("g.g6");
  let png = scratch("m.png");
  let output = run(&[
    "-n",
    "4",
    "--bucket_csv",
    csv.to_str().unwrap(),
    "--g6",
    g6.to_str().unwrap(),
    "--montage",
    png.to_str().unwrap(),
    "--layout",
    "circular",
    "--cell-px",
    "40",
  ]);
  assert!(output.status.success());
  let text = stdout(&output);
  assert!(text.contains("(unique degseqs: 6)"), "{text}");
  assert!(text.contains("[Output] graph6 list ->"), "{text}");
  assert!(text.contains("[Output] montage image ->"), "{text}");

  let rows = read_bucket_csv(&csv).unwrap();
  assert_eq!(rows.len(), 6);
  assert_eq!(rows[0].degseq, "3 3 3 3");
  assert_eq!(std::fs::read_to_string(&g6).unwrap().lines().count(), 6);
  assert!(std::fs::metadata(&png).unwrap().len() > 0);

  for path in [csv, g6, png] {
    std::fs::remove_file(path).unwrap();
  }
}

#[test]
fn failed_export_does_not_block_others() {
  let g6 = scratch("ok.g6");
  let output = run(&[
    "-n",
    "3",
    "--bucket_csv",
    "/nonexistent-dir/b.csv",
    "--g6",
    g6.to_str().unwrap(),
  ]);
  assert!(!output.status.success());
  assert!(stdout(&output).contains("[Output] graph6 list ->"));
  assert_eq!(std::fs::read_to_string(&g6).unwrap().lines().count(), 2);
  std::fs::remove_file(g6).unwrap();
}

#[test]
fn atlas_file_replaces_generation() {
  let atlas = scratch("atlas.g6");
  std::fs::write(&atlas, "Bg\nBw\n").unwrap();
  let text = stdout(&run(&["-n", "3", "--atlas", atlas.to_str().unwrap()]));
  assert!(text.contains("count on n=3: 2"), "{text}");
  std::fs::remove_file(atlas).unwrap();
}

#[test]
fn malformed_arguments_are_rejected() {
  let bad_layout = run(&["--layout", "random"]);
  assert!(!bad_layout.status.success());
  assert!(String::from_utf8_lossy(&bad_layout.stderr).contains("Usage"));

  let bad_n = run(&["-n", "five"]);
  assert!(!bad_n.status.success());
  assert!(stdout(&bad_n).is_empty());
}
