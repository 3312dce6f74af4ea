use bef_core::EffectKind;
use bef_exp::{sweep, write_summary_csv, PanelStatus, SweepPlan};

fn small_plan() -> SweepPlan {
    let mut plan = SweepPlan::exploration();
    plan.resolution = 10;
    plan
}

#[test]
fn sweep_reports_repeat() {
    let plan = small_plan();
    let first = sweep(&plan).expect("sweep");
    let second = sweep(&plan).expect("sweep");
    assert_eq!(first, second);
    assert_eq!(first.plan_hash.len(), 64);
    assert_eq!(first.panels.len(), 9);
    assert_eq!(first.failed(), 0);
    assert_eq!(first.axis_limit, 22.0);
}

#[test]
fn panels_follow_plan_order() {
    let report = sweep(&small_plan()).expect("sweep");
    let indices: Vec<(usize, usize)> = report
        .panels
        .iter()
        .map(|panel| (panel.expected_index, panel.monoculture_index))
        .collect();
    assert_eq!(indices[0], (0, 0));
    assert_eq!(indices[1], (0, 1));
    assert_eq!(indices[3], (1, 0));
    assert_eq!(indices[8], (2, 2));
    let last = &report.panels[8];
    assert_eq!(last.stem(), "panel-2-2");
    assert_eq!(last.monoculture, [20.0, 6.0]);
    assert_eq!(last.expected_ry, [0.6, 0.4]);
}

#[test]
fn golden_panel_row_matches_closed_form() {
    let report = sweep(&small_plan()).expect("sweep");
    let panel = &report.panels[6];
    assert_eq!(panel.monoculture, [10.0, 6.0]);
    assert_eq!(panel.expected_ry, [0.6, 0.4]);
    let row = &panel.rows[0];
    assert_eq!(row.observed, [14.0, 2.2]);
    let lh = row.decomposition.loreau_hector;
    assert!((lh.selection - 5.0 / 3.0).abs() < 1e-9);
    assert!((lh.complementarity - 92.0 / 15.0).abs() < 1e-9);
    assert!((lh.net - 7.8).abs() < 1e-9);

    let limits = report.effect_limits.expect("limits");
    assert!(limits.min <= limits.max);
    assert!(limits.max >= 7.8 - 1e-9);
}

#[test]
fn every_panel_carries_requested_grids() {
    let report = sweep(&small_plan()).expect("sweep");
    for panel in &report.panels {
        assert_eq!(panel.grids.len(), 2);
        assert!(panel.grid(EffectKind::Complementarity).is_some());
        assert!(panel.grid(EffectKind::Selection).is_some());
        assert!(panel.grid(EffectKind::Dominance).is_none());
        assert_eq!(panel.grid_hashes.len(), 2);
        assert!(panel.grid_hashes.contains_key("CE"));
    }
}

#[test]
fn failing_panel_does_not_abort_sweep() {
    let mut plan = small_plan();
    plan.expected_relative_yields.push([0.7, 0.7]);
    let report = sweep(&plan).expect("sweep");
    assert_eq!(report.panels.len(), 12);
    assert_eq!(report.failed(), 3);
    for panel in report.panels.iter().filter(|p| p.expected_index == 3) {
        assert_eq!(panel.status, PanelStatus::Failed);
        assert!(panel.rows.is_empty());
        assert!(panel.grids.is_empty());
        assert!(panel.error.as_deref().unwrap_or("").contains("expected"));
    }
}

#[test]
fn invalid_plan_is_rejected() {
    let mut plan = small_plan();
    plan.monocultures.clear();
    let err = sweep(&plan).unwrap_err();
    assert_eq!(err.info().code, "plan-monocultures");
}

#[test]
fn summary_csv_has_one_row_per_scenario() {
    let report = sweep(&small_plan()).expect("sweep");
    let mut buffer = Vec::new();
    write_summary_csv(&report, &mut buffer).expect("csv");
    let text = String::from_utf8(buffer).expect("utf8");
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("expected_index,monoculture_index,m1,m2,rye1,rye2,yo1,yo2,NE,CE,SE,tic,dom,tdc,ler")
    );
    assert_eq!(lines.count(), 27);
}
