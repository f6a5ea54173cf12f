use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FormplateError::asset_load("x")
            .to_string()
            .contains("asset load error:")
    );
    assert!(
        FormplateError::signature_decode("x")
            .to_string()
            .contains("signature decode error:")
    );
    assert!(
        FormplateError::encode("x")
            .to_string()
            .contains("encode error:")
    );
    assert!(
        FormplateError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        FormplateError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FormplateError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
