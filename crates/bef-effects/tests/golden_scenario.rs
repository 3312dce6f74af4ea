use bef_effects::{
    biodiversity_effect, decompose, land_equivalent_ratio, tripartite_partition, EffectKind,
};

const M: [f64; 2] = [10.0, 6.0];
const YO: [f64; 2] = [14.0, 2.2];
const RYE: [f64; 2] = [0.6, 0.4];

fn assert_close(actual: f64, expected: f64) {
    let scale = actual.abs().max(expected.abs()).max(1.0);
    assert!(
        (actual - expected).abs() <= 1e-9 * scale,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn loreau_hector_golden_values() {
    let lh = biodiversity_effect(&M, &YO, &RYE).unwrap();
    assert_close(lh.selection, 5.0 / 3.0);
    assert_close(lh.complementarity, 92.0 / 15.0);
    assert_close(lh.net, 7.8);
    let (se, ce, ne) = lh.as_tuple();
    assert_close(se + ce, ne);
}

#[test]
fn tripartite_golden_values() {
    let fox = tripartite_partition(&M, &YO, &RYE).unwrap();
    assert_close(fox.trait_independent, 92.0 / 15.0);
    assert_close(fox.dominance, 204.0 / 265.0);
    assert_close(fox.trait_dependent, 713.0 / 795.0);
    assert_close(fox.total(), 7.8);
}

#[test]
fn ler_golden_value() {
    assert_close(land_equivalent_ratio(&M, &YO, &RYE).unwrap(), 1.625);
}

#[test]
fn decomposition_bundle_matches_individual_calls() {
    let bundle = decompose(&M, &YO, &RYE).unwrap();
    assert_eq!(bundle.loreau_hector, biodiversity_effect(&M, &YO, &RYE).unwrap());
    assert_eq!(bundle.tripartite, tripartite_partition(&M, &YO, &RYE).unwrap());
    assert_close(bundle.ler.unwrap(), 1.625);
    assert_close(bundle.value(EffectKind::Dominance), 204.0 / 265.0);
    let bars = bundle.values(&EffectKind::LOREAU_HECTOR);
    assert_eq!(bars.len(), 3);
    assert_close(bars[0], 7.8);
    assert_close(bars[1], 92.0 / 15.0);
    assert_close(bars[2], 5.0 / 3.0);
}

#[test]
fn no_effect_baseline_is_zero() {
    let m = [10.0, 6.0, 4.0];
    let rye = [0.5, 0.3, 0.2];
    let yo: Vec<f64> = m.iter().zip(&rye).map(|(m, r)| m * r).collect();
    let bundle = decompose(&m, &yo, &rye).unwrap();
    for kind in EffectKind::ALL {
        assert!(bundle.value(kind).abs() < 1e-12, "{kind} should vanish");
    }
}

#[test]
fn ler_baseline_is_one() {
    let ler = land_equivalent_ratio(&[10.0, 10.0], &[5.0, 5.0], &[0.5, 0.5]).unwrap();
    assert_close(ler, 1.0);
}

#[test]
fn driver_scenarios_are_finite() {
    // Observed-yield rows swept by the exploration panels.
    let observed = [[14.0, 2.2], [9.0, 4.2], [5.0, 5.8]];
    let monocultures = [[10.0, 6.0], [15.0, 6.0], [20.0, 6.0]];
    let shares = [[0.4, 0.6], [0.5, 0.5], [0.6, 0.4]];
    for m in &monocultures {
        for rye in &shares {
            for yo in &observed {
                let bundle = decompose(m, yo, rye).unwrap();
                assert!(bundle.ler.unwrap().is_finite());
            }
        }
    }
}
