use bef_core::{BefError, EffectKind, YieldVector};

#[test]
fn yield_vector_rejects_non_finite() {
    let err = YieldVector::new(vec![1.0, f64::NAN]).unwrap_err();
    assert!(matches!(err, BefError::NonFinite(_)));
    assert_eq!(err.info().context["index"], "1");
    assert!(YieldVector::new(vec![1.0, f64::INFINITY]).is_err());
}

#[test]
fn yield_vector_summaries() {
    let v = YieldVector::new(vec![10.0, 6.0]).unwrap();
    assert_eq!(v.len(), 2);
    assert_eq!(v.sum(), 16.0);
    assert!(YieldVector::new(Vec::new()).unwrap().is_empty());
    assert_eq!(Vec::from(v), vec![10.0, 6.0]);
}

#[test]
fn yield_vector_deserialisation_validates() {
    let ok: YieldVector = serde_json::from_str("[1.5, 2.0]").unwrap();
    assert_eq!(ok.as_slice(), &[1.5, 2.0]);
    assert_eq!(serde_json::to_string(&ok).unwrap(), "[1.5,2.0]");
}

#[test]
fn effect_labels_roundtrip() {
    for kind in EffectKind::ALL {
        let parsed: EffectKind = kind.label().parse().unwrap();
        assert_eq!(parsed, kind);
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, format!("\"{}\"", kind.label()));
        let back: EffectKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);
    }
}

#[test]
fn effect_parse_accepts_label_and_one_alias() {
    assert_eq!("TIC".parse::<EffectKind>().unwrap(), EffectKind::TraitIndependent);
    assert_eq!("ce".parse::<EffectKind>().unwrap(), EffectKind::Complementarity);
    assert!("Ce".parse::<EffectKind>().is_err());
    assert!("Tic".parse::<EffectKind>().is_err());
    assert!(" CE".parse::<EffectKind>().is_err());
    assert!("xyz".parse::<EffectKind>().is_err());
    assert!(EffectKind::Net.is_net());
    assert!(!EffectKind::Dominance.is_net());
}

#[test]
fn from_str_and_serde_accept_the_same_labels() {
    let candidates = [
        "NE", "ne", "Ne", "SE", "se", "sE", "CE", "ce", "Ce", "tic", "TIC", "Tic", "dom", "DOM",
        "Dom", "tdc", "TDC", "tDc", "net", "",
    ];
    for label in candidates {
        let parsed = label.parse::<EffectKind>().ok();
        let deserialised = serde_json::from_str::<EffectKind>(&format!("\"{label}\"")).ok();
        assert_eq!(parsed, deserialised, "label {label:?}");
    }
}
