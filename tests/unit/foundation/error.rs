use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MorphError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(MorphError::surface("x").to_string().contains("surface error:"));
    assert!(MorphError::text("x").to_string().contains("text error:"));
    assert!(MorphError::tick("x").to_string().contains("tick error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("disk full");
    let err = MorphError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("disk full"));
}
