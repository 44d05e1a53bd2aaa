//! The facade exposes a complete compile path.

use ablate::prelude::*;
use ablate_test_utils::sample_description;

#[test]
fn translate_through_prelude() {
    let family = FamilyRegistry::with_builtin()
        .create("elmer-libnuma", CompileConfig::default())
        .unwrap();
    let mut files = FilesRequired::new();
    let document: Document = family.translate(&sample_description(), &mut files).unwrap();
    assert_eq!(document.root().name(), "gosmart");
    assert_eq!(files.len(), 4);
    let json = document.to_json().unwrap();
    assert!(json.contains("\"name\": \"gosmart\""));
}

#[test]
fn unknown_family_through_prelude() {
    let err = FamilyRegistry::with_builtin()
        .create("openfoam", CompileConfig::default())
        .err()
        .unwrap();
    assert_eq!(err.to_string(), "unknown family 'openfoam'");
}
