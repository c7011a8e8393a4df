use super::*;

#[test]
fn garbage_font_bytes_are_rejected() {
    assert!(TextLayoutEngine::new(b"definitely not a font".to_vec()).is_err());
    assert!(TextLayoutEngine::new(Vec::new()).is_err());
}
