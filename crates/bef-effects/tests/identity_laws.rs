use bef_effects::{biodiversity_effect, decompose, tripartite_partition};
use proptest::prelude::*;

// Bounds the magnitude of every intermediate product, so rounding noise in a
// cancelling sum stays below the tolerance.
fn magnitude(m: &[f64], yo: &[f64]) -> f64 {
    let max_m = m.iter().cloned().fold(0.0, f64::max);
    let max_ry = yo
        .iter()
        .zip(m)
        .map(|(y, m)| (y / m).abs())
        .fold(0.0, f64::max);
    (m.len() as f64 * max_m * (max_ry + 1.0)).max(1.0)
}

fn close(a: f64, b: f64, scale: f64) -> bool {
    (a - b).abs() <= 1e-9 * scale
}

prop_compose! {
    fn scenario()(n in 2usize..=10)(
        monoculture in prop::collection::vec(0.1f64..100.0, n),
        observed in prop::collection::vec(0.01f64..200.0, n),
        weights in prop::collection::vec(0.05f64..1.0, n),
    ) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let total: f64 = weights.iter().sum();
        let expected = weights.iter().map(|w| w / total).collect();
        (monoculture, observed, expected)
    }
}

proptest! {
    #[test]
    fn net_is_selection_plus_complementarity((m, yo, rye) in scenario()) {
        let scale = magnitude(&m, &yo);
        let lh = biodiversity_effect(&m, &yo, &rye).unwrap();
        prop_assert!(close(lh.selection + lh.complementarity, lh.net, scale),
            "SE + CE = {} but NE = {}", lh.selection + lh.complementarity, lh.net);
    }

    #[test]
    fn tripartite_refines_selection((m, yo, rye) in scenario()) {
        let scale = magnitude(&m, &yo);
        let lh = biodiversity_effect(&m, &yo, &rye).unwrap();
        let fox = tripartite_partition(&m, &yo, &rye).unwrap();
        prop_assert!(close(fox.dominance + fox.trait_dependent, lh.selection, scale));
        prop_assert!(close(fox.trait_independent, lh.complementarity, scale));
        prop_assert!(close(fox.total(), lh.net, scale));
    }

    #[test]
    fn effects_scale_linearly((m, yo, rye) in scenario()) {
        let base = decompose(&m, &yo, &rye).unwrap();
        for k in [0.5, 2.0, 10.0] {
            let scale = k * magnitude(&m, &yo);
            let m_k: Vec<f64> = m.iter().map(|v| v * k).collect();
            let yo_k: Vec<f64> = yo.iter().map(|v| v * k).collect();
            let scaled = decompose(&m_k, &yo_k, &rye).unwrap();
            let (lh, lh_k) = (base.loreau_hector, scaled.loreau_hector);
            prop_assert!(close(lh_k.selection, k * lh.selection, scale));
            prop_assert!(close(lh_k.complementarity, k * lh.complementarity, scale));
            prop_assert!(close(lh_k.net, k * lh.net, scale));
            prop_assert!(close(scaled.tripartite.dominance, k * base.tripartite.dominance, scale));
            prop_assert!(close(
                scaled.tripartite.trait_dependent,
                k * base.tripartite.trait_dependent,
                scale
            ));
            prop_assert!(close(scaled.ler.unwrap(), base.ler.unwrap(), base.ler.unwrap().max(1.0)));
        }
    }
}
