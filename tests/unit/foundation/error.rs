use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        OrreryError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(OrreryError::data("x").to_string().contains("data error:"));
    assert!(OrreryError::render("x").to_string().contains("render error:"));
    assert!(
        OrreryError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = OrreryError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: OrreryError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, OrreryError::Serde(_)));
}
