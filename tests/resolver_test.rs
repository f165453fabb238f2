//! Integration tests for sandboxed resource resolution

use hearth::resource::{ResourceError, ResourceResolver};

#[tokio::test]
async fn test_default_extension_and_mime() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("schedule.txt"), "[420]").unwrap();
    std::fs::write(dir.path().join("plan.json"), "[]").unwrap();

    let resolver = ResourceResolver::new(dir.path());

    let resource = resolver.resolve("schedule").await.unwrap();
    assert_eq!(resource.body, b"[420]");
    assert_eq!(resource.mime_type, "text/plain; charset=utf-8");
    assert_eq!(resource.title, "schedule");

    let resource = resolver.resolve("plan.json").await.unwrap();
    assert_eq!(resource.mime_type, "application/json");
}

#[tokio::test]
async fn test_nested_resource() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("zones")).unwrap();
    std::fs::write(dir.path().join("zones").join("kitchen.json"), "{}").unwrap();

    let resolver = ResourceResolver::new(dir.path());
    let resource = resolver.resolve("zones/kitchen.json").await.unwrap();
    assert_eq!(resource.body, b"{}");
}

#[tokio::test]
async fn test_traversal_forbidden_even_when_target_exists() {
    let outer = tempfile::tempdir().unwrap();
    let root = outer.path().join("static");
    std::fs::create_dir(&root).unwrap();
    std::fs::write(outer.path().join("secret.txt"), "hidden").unwrap();

    let resolver = ResourceResolver::new(&root);

    for title in ["../secret.txt", "../secret", "a/../../secret.txt", "/etc/passwd"] {
        let err = resolver.resolve(title).await.unwrap_err();
        assert!(
            matches!(err, ResourceError::ForbiddenPath(_)),
            "{title} should be forbidden, got {err:?}"
        );
    }
}

#[tokio::test]
async fn test_missing_and_directory_are_not_found() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("zones")).unwrap();
    std::fs::create_dir(dir.path().join("archive.d")).unwrap();

    let resolver = ResourceResolver::new(dir.path());

    let err = resolver.resolve("absent").await.unwrap_err();
    assert_eq!(err, ResourceError::ResourceNotFound("absent".to_string()));

    let err = resolver.resolve("zones").await.unwrap_err();
    assert!(matches!(err, ResourceError::ResourceNotFound(_)));

    // Exists, but cannot be read as a file
    let err = resolver.resolve("archive.d").await.unwrap_err();
    assert_eq!(err, ResourceError::ResourceNotFound("archive.d".to_string()));
}
