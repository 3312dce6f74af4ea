use bef_core::errors::{BefError, ErrorInfo};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("index", 1)
        .with_context("reason", "example")
}

#[test]
fn shape_error_surface() {
    let err = BefError::Shape(sample_info("S001", "length mismatch"));
    assert_eq!(err.info().code, "S001");
    assert!(err.info().context.contains_key("index"));
    assert!(!err.is_domain());
}

#[test]
fn division_error_surface() {
    let err = BefError::DivisionByZero(sample_info("D001", "zero monoculture"));
    assert_eq!(err.info().code, "D001");
    assert!(err.is_domain());
}

#[test]
fn display_includes_context_and_hint() {
    let err = BefError::ExpectedYield(
        sample_info("E001", "sum away from one").with_hint("normalise the shares"),
    );
    let text = err.to_string();
    assert!(text.starts_with("expected relative yield error: sum away from one"));
    assert!(text.contains("index=1"));
    assert!(text.contains("hint: normalise the shares"));
}

#[test]
fn errors_serialise_with_family_tag() {
    let err = BefError::NonFinite(ErrorInfo::new("N001", "nan"));
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["family"], "NonFinite");
    assert_eq!(json["detail"]["code"], "N001");
    let back: BefError = serde_json::from_value(json).unwrap();
    assert_eq!(back, err);
}
