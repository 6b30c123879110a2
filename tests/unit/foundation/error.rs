use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MetroError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(MetroError::render("x").to_string().contains("render error:"));
    assert!(MetroError::encode("x").to_string().contains("encode error:"));
    assert!(
        MetroError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MetroError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
