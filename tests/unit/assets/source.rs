use super::*;

#[test]
fn normalize_rel_path_cleans_separators_and_dots() {
    assert_eq!(normalize_rel_path("a/./b//c.png").unwrap(), "a/b/c.png");
    assert_eq!(normalize_rel_path(r"forms\SAF.png").unwrap(), "forms/SAF.png");
    assert_eq!(normalize_rel_path("./PIC.png").unwrap(), "PIC.png");
}

#[test]
fn normalize_rel_path_rejects_escapes() {
    for bad in ["/etc/passwd", "../x.png", "a/../../b", "", "./", "//"] {
        let err = normalize_rel_path(bad).unwrap_err();
        assert!(matches!(err, FormplateError::AssetLoad(_)), "{bad}");
    }
}

#[test]
fn template_assets_resolve_through_paths() {
    let paths = AssetPaths::default();
    assert_eq!(TemplateAsset::Pic.path(&paths), "PIC.png");
    assert_eq!(TemplateAsset::CheckIcon.path(&paths), "check.png");
    assert_eq!(
        TemplateAsset::saf(SafVariant::Standard).path(&paths),
        "SAF.png"
    );
    assert_eq!(
        TemplateAsset::saf(SafVariant::Member).path(&paths),
        "SAF_victory.png"
    );
}

#[tokio::test]
async fn memory_source_reads_normalized_paths() {
    let src = MemoryAssetSource::new()
        .with("forms/PIC.png", vec![1u8, 2, 3])
        .unwrap();
    assert_eq!(src.len(), 1);
    assert_eq!(src.read("forms/./PIC.png").await.unwrap(), vec![1, 2, 3]);

    let err = src.read("forms/SAF.png").await.unwrap_err();
    assert!(matches!(err, FormplateError::AssetLoad(_)));
}

#[tokio::test]
async fn fs_source_reads_below_root() {
    let root = std::env::temp_dir().join(format!("formplate-assets-{}", std::process::id()));
    std::fs::create_dir_all(root.join("forms")).unwrap();
    std::fs::write(root.join("forms/check.png"), b"icon").unwrap();

    let src = FsAssetSource::new(&root);
    assert_eq!(src.read("forms/check.png").await.unwrap(), b"icon");
    assert!(matches!(
        src.read("forms/missing.png").await.unwrap_err(),
        FormplateError::AssetLoad(_)
    ));
    assert!(src.read("../outside.png").await.is_err());

    std::fs::remove_dir_all(&root).unwrap();
}

#[tokio::test]
async fn shared_sources_delegate() {
    let src: Arc<dyn AssetSource> =
        Arc::new(MemoryAssetSource::new().with("a.png", vec![9u8]).unwrap());
    assert_eq!(src.read("a.png").await.unwrap(), vec![9]);
}
