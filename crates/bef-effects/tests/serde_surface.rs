use bef_effects::{decompose, Decomposition, ValidationPolicy};
use serde_json::Value;

#[test]
fn decomposition_serialises_named_terms() {
    let bundle = decompose(&[10.0, 6.0], &[14.0, 2.2], &[0.6, 0.4]).unwrap();
    let value = serde_json::to_value(bundle).unwrap();
    for key in ["selection", "complementarity", "net"] {
        assert!(value["loreau_hector"][key].is_number(), "{key}");
    }
    for key in ["trait_independent", "dominance", "trait_dependent"] {
        assert!(value["tripartite"][key].is_number(), "{key}");
    }
    assert!((value["ler"].as_f64().unwrap() - 1.625).abs() < 1e-12);

    let back: Decomposition = serde_json::from_value(value).unwrap();
    assert!((back.loreau_hector.net - bundle.loreau_hector.net).abs() < 1e-12);
    assert!((back.tripartite.dominance - bundle.tripartite.dominance).abs() < 1e-12);
}

#[test]
fn undefined_ler_serialises_as_null() {
    let bundle = decompose(&[10.0, 6.0], &[8.0, 3.0], &[1.0, 0.0]).unwrap();
    let value = serde_json::to_value(bundle).unwrap();
    assert_eq!(value["ler"], Value::Null);
    let back: Decomposition = serde_json::from_value(value).unwrap();
    assert!(back.ler.is_none());
}

#[test]
fn partial_policy_fills_strict_defaults() {
    let policy: ValidationPolicy =
        serde_json::from_str(r#"{"require_unit_expected_sum": false}"#).unwrap();
    assert!(policy.require_non_negative);
    assert!(!policy.require_unit_expected_sum);
    assert_eq!(policy.sum_tolerance, ValidationPolicy::default().sum_tolerance);

    let empty: ValidationPolicy = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, ValidationPolicy::default());
}
