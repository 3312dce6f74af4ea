use std::fs;
use std::process::Command;

use serde_json::Value;
use tempfile::tempdir;

fn bef_sim() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_bef-sim"));
    command.env("BEF_LOG", "off");
    command
}

fn stdout_json(command: &mut Command) -> Value {
    let output = command.output().expect("run bef-sim");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let body = String::from_utf8(output.stdout).expect("utf8");
    serde_json::from_str(&body).expect("json")
}

#[test]
fn decompose_prints_both_partitions() {
    let value = stdout_json(bef_sim().args([
        "decompose",
        "--mono",
        "10,6",
        "--observed",
        "14,2.2",
        "--expected",
        "0.6,0.4",
    ]));
    let net = value["loreau_hector"]["net"].as_f64().expect("net");
    assert!((net - 7.8).abs() < 1e-9);
    let ler = value["ler"].as_f64().expect("ler");
    assert!((ler - 1.625).abs() < 1e-9);
    assert!(value["tripartite"]["dominance"].is_number());
}

#[test]
fn decompose_rejects_unnormalised_shares_unless_permissive() {
    let args = [
        "decompose",
        "--mono",
        "10,6",
        "--observed",
        "14,2.2",
        "--expected",
        "0.7,0.7",
    ];
    let strict = bef_sim().args(args).output().expect("run");
    assert!(!strict.status.success());
    let permissive = bef_sim().args(args).arg("--permissive").output().expect("run");
    assert!(permissive.status.success());
}

#[test]
fn ler_and_solver_agree() {
    let value = stdout_json(bef_sim().args([
        "solve-y2", "--m1", "10", "--m2", "6", "--y1", "5", "--ler", "1.2", "--locus", "3",
    ]));
    let y2 = value["y2"].as_f64().expect("y2");
    assert!((y2 - 4.2).abs() < 1e-9);
    assert_eq!(value["locus"].as_array().map(Vec::len), Some(3));

    let value = stdout_json(bef_sim().args([
        "ler",
        "--mono",
        "10,6",
        "--observed",
        &format!("5,{y2}"),
        "--expected",
        "0.5,0.5",
    ]));
    assert!((value["ler"].as_f64().expect("ler") - 1.2).abs() < 1e-9);
}

#[test]
fn landscape_writes_report_grid_and_heatmap() {
    let dir = tempdir().expect("tempdir");
    let output = bef_sim()
        .args([
            "landscape",
            "--mono",
            "15,6",
            "--expected",
            "0.5,0.5",
            "--effect",
            "dom",
            "--max-x",
            "17",
            "--max-y",
            "17",
            "--resolution",
            "8",
            "--observed",
            "9,4.2",
            "--out",
        ])
        .arg(dir.path())
        .output()
        .expect("run");
    assert!(output.status.success());
    for name in ["landscape_report.json", "grid.csv", "heatmap.svg"] {
        assert!(dir.path().join(name).exists(), "{name} missing");
    }
    let csv = fs::read_to_string(dir.path().join("grid.csv")).expect("csv");
    assert!(csv.starts_with("x,y,dom"));
}

#[test]
fn sweep_writes_one_svg_per_panel() {
    let dir = tempdir().expect("tempdir");
    let plan = dir.path().join("plan.yaml");
    fs::write(
        &plan,
        "\
monocultures:
  - [10.0, 6.0]
  - [15.0, 6.0]
expected_relative_yields:
  - [0.5, 0.5]
observed:
  type: grid
  values:
    - [14.0, 2.2]
    - [5.0, 5.8]
resolution: 6
",
    )
    .expect("write plan");
    let out = dir.path().join("out");
    let output = bef_sim()
        .args(["sweep", "--colormap", "bwr_r", "--plan"])
        .arg(&plan)
        .arg("--out")
        .arg(&out)
        .output()
        .expect("run");
    assert!(output.status.success());
    assert!(out.join("panel-0-0.svg").exists());
    assert!(out.join("panel-0-1.svg").exists());
    let summary = fs::read_to_string(out.join("summary.csv")).expect("summary");
    assert_eq!(summary.lines().count(), 5);
    let report: Value =
        serde_json::from_slice(&fs::read(out.join("sweep_report.json")).expect("report"))
            .expect("json");
    assert_eq!(report["panels"].as_array().map(Vec::len), Some(2));
}

#[test]
fn version_prints_crate_version() {
    let output = bef_sim().arg("version").output().expect("run");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        env!("CARGO_PKG_VERSION")
    );
}
