#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use crate::{BundleCodec, BundleFormat, BundleInput, ListPayload, ListStore, SluiceError};

    const INDEX: &str = "[allow]\nlistFileName = allow.txt\n\n[deny]\nlistFileName = sub/deny.txt\n";

    async fn seeded_store(root: &std::path::Path) -> ListStore {
        let store = ListStore::new(root).await.unwrap();
        store
            .save(INDEX, &[
                ListPayload {
                    path:    "allow.txt".to_owned(),
                    content: "a.example.com\n".to_owned(),
                },
                ListPayload {
                    path:    "sub/deny.txt".to_owned(),
                    content: "b.example.net\n".to_owned(),
                },
            ])
            .await
            .unwrap();
        store
    }

    #[cfg(feature = "archive")]
    fn entry(name: &str, content: &[u8]) -> crate::bundle::archive::ArchiveEntry {
        crate::bundle::archive::ArchiveEntry {
            name:    name.to_owned(),
            content: content.to_vec(),
        }
    }

    #[tokio::test]
    async fn test_json_round_trip() {
        let dir = tempdir().unwrap();
        let store = seeded_store(dir.path()).await;
        let bundle = BundleCodec::new(&store).export_as(BundleFormat::Json).await.unwrap();
        assert_eq!(bundle.filename, "lists.json");
        assert_eq!(bundle.content_type, "application/json");

        let target_dir = tempdir().unwrap();
        let target = ListStore::new(target_dir.path()).await.unwrap();
        let summary = BundleCodec::new(&target)
            .import(BundleInput::from_content_type("application/json", bundle.content))
            .await
            .unwrap();
        assert!(summary.index_written);
        assert_eq!(summary.files_written, 2);

        let loaded = target.load().await.unwrap();
        assert_eq!(loaded.index, INDEX);
        assert_eq!(loaded.files.len(), 2);
        assert_eq!(loaded.files.first().unwrap().content, "a.example.com\n");
        assert_eq!(loaded.files.last().unwrap().content, "b.example.net\n");
    }

    #[cfg(feature = "archive")]
    #[tokio::test]
    async fn test_archive_round_trip() {
        let dir = tempdir().unwrap();
        let store = seeded_store(dir.path()).await;
        let bundle = BundleCodec::new(&store).export().await.unwrap();
        assert_eq!(bundle.filename, "lists.slb");
        assert_eq!(bundle.content_type, "application/octet-stream");

        let target_dir = tempdir().unwrap();
        let target = ListStore::new(target_dir.path()).await.unwrap();
        let summary = BundleCodec::new(&target)
            .import(BundleInput::Archive(bundle.content))
            .await
            .unwrap();
        assert!(summary.index_written);
        assert_eq!(summary.files_written, 2);

        let loaded = target.load().await.unwrap();
        assert_eq!(loaded.index, INDEX);
        assert_eq!(loaded.files.len(), 2);
        assert_eq!(loaded.files.last().unwrap().content, "b.example.net\n");
    }

    #[cfg(feature = "archive")]
    #[tokio::test]
    async fn test_archive_export_lists_index_first_and_dedupes() {
        let dir = tempdir().unwrap();
        let store = ListStore::new(dir.path()).await.unwrap();
        let index = "[one]\nlistFileName = shared.txt\n[two]\nlistFileName = shared.txt\n";
        store.save(index, &[]).await.unwrap();

        let bundle = BundleCodec::new(&store).export().await.unwrap();
        let entries = crate::bundle::archive::from_bytes(&bundle.content).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["lists.ini", "shared.txt"]);
        assert_eq!(entries.first().unwrap().content, index.as_bytes());
        assert!(entries.last().unwrap().content.is_empty());
    }

    #[cfg(feature = "archive")]
    #[tokio::test]
    async fn test_corrupted_archive_is_rejected() {
        let dir = tempdir().unwrap();
        let store = seeded_store(dir.path()).await;
        let bundle = BundleCodec::new(&store).export().await.unwrap();

        let mut flipped = bundle.content.clone();
        let mid = flipped.len() / 2;
        flipped[mid] ^= 0x55;
        let err = BundleCodec::new(&store)
            .import(BundleInput::Archive(flipped))
            .await
            .unwrap_err();
        assert!(matches!(err, SluiceError::InvalidArchive { .. }));

        let truncated = bundle.content[.. bundle.content.len() / 2].to_vec();
        let err = BundleCodec::new(&store)
            .import(BundleInput::Archive(truncated))
            .await
            .unwrap_err();
        assert!(matches!(err, SluiceError::InvalidArchive { .. }));

        let err = BundleCodec::new(&store)
            .import(BundleInput::Archive(b"not a container".to_vec()))
            .await
            .unwrap_err();
        assert!(matches!(err, SluiceError::InvalidArchive { .. }));
    }

    #[cfg(feature = "archive")]
    #[tokio::test]
    async fn test_archive_import_skips_unsafe_and_unlisted_names() {
        let entries = vec![
            entry("../evil.txt", b"nope"),
            entry("notes.md", b"nope"),
            entry("weird name.txt", b"nope"),
            entry("", b"nope"),
            entry("LISTS.INI", b"[allow]\nlistFileName = ok.txt\n"),
            entry("ok.txt", b"fine.example.com\n"),
        ];
        let bytes = crate::bundle::archive::to_bytes(&entries).unwrap();

        let dir = tempdir().unwrap();
        let store = ListStore::new(dir.path().join("confined")).await.unwrap();
        let summary = BundleCodec::new(&store)
            .import(BundleInput::Archive(bytes))
            .await
            .unwrap();

        assert!(summary.index_written);
        assert_eq!(summary.files_written, 1);
        assert!(store.root().join("ok.txt").is_file());
        assert!(!store.root().join("notes.md").exists());
        assert!(!dir.path().join("evil.txt").exists());

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.files.len(), 1);
        assert_eq!(loaded.files.first().unwrap().content, "fine.example.com\n");
    }

    #[cfg(feature = "archive")]
    #[tokio::test]
    async fn test_archive_import_fails_hard_on_masked_traversal() {
        let bytes = crate::bundle::archive::to_bytes(&[entry("a..b.txt", b"nope")]).unwrap();

        let dir = tempdir().unwrap();
        let store = ListStore::new(dir.path()).await.unwrap();
        let err = BundleCodec::new(&store)
            .import(BundleInput::Archive(bytes))
            .await
            .unwrap_err();
        assert!(matches!(err, SluiceError::PathEscape { .. }));
    }

    #[cfg(not(feature = "archive"))]
    #[tokio::test]
    async fn test_archive_input_is_rejected_without_support() {
        let dir = tempdir().unwrap();
        let store = ListStore::new(dir.path()).await.unwrap();
        let err = BundleCodec::new(&store)
            .import(BundleInput::Archive(vec![0, 1, 2]))
            .await
            .unwrap_err();
        assert!(matches!(err, SluiceError::UnsupportedFormat { .. }));
    }

    #[cfg(not(feature = "archive"))]
    #[tokio::test]
    async fn test_archive_export_falls_back_to_json() {
        let dir = tempdir().unwrap();
        let store = seeded_store(dir.path()).await;
        let bundle = BundleCodec::new(&store).export_as(BundleFormat::Archive).await.unwrap();
        assert_eq!(bundle.filename, "lists.json");
        assert_eq!(bundle.content_type, "application/json");
    }

    #[tokio::test]
    async fn test_empty_json_object_imports_cleanly() {
        let dir = tempdir().unwrap();
        let store = ListStore::new(dir.path()).await.unwrap();
        let summary = BundleCodec::new(&store)
            .import(BundleInput::Json(b"{}".to_vec()))
            .await
            .unwrap();
        assert!(summary.index_written);
        assert_eq!(summary.files_written, 0);
        assert_eq!(tokio::fs::read_to_string(store.index_path()).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let dir = tempdir().unwrap();
        let store = ListStore::new(dir.path()).await.unwrap();
        let err = BundleCodec::new(&store)
            .import(BundleInput::Json(b"not json at all".to_vec()))
            .await
            .unwrap_err();
        assert!(matches!(err, SluiceError::InvalidArchive { .. }));
    }

    #[tokio::test]
    async fn test_json_import_ignores_unknown_fields() {
        let payload = r#"{
            "index": "[allow]\nlistFileName = allow.txt\n",
            "exportedAt": "2024-01-01T00:00:00Z",
            "files": {
                "allow": { "path": "allow.txt", "content": "x.example.org\n", "fullPath": "/srv/ignored" },
                "deny":  { "path": "deny.txt" }
            }
        }"#;
        let dir = tempdir().unwrap();
        let store = ListStore::new(dir.path()).await.unwrap();
        let summary = BundleCodec::new(&store)
            .import(BundleInput::Json(payload.as_bytes().to_vec()))
            .await
            .unwrap();
        assert!(summary.index_written);
        assert_eq!(summary.files_written, 2);

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.files.len(), 1);
        assert_eq!(loaded.files.first().unwrap().content, "x.example.org\n");
        assert_eq!(
            tokio::fs::read_to_string(store.root().join("deny.txt")).await.unwrap(),
            ""
        );
    }

    #[test]
    fn test_content_type_dispatch() {
        let json = BundleInput::from_content_type("APPLICATION/JSON; charset=utf-8", vec![1]);
        assert!(matches!(json, BundleInput::Json(_)));
        let binary = BundleInput::from_content_type("application/octet-stream", vec![1]);
        assert!(matches!(binary, BundleInput::Archive(_)));
        let unknown = BundleInput::from_content_type("", vec![1]);
        assert!(matches!(unknown, BundleInput::Archive(_)));
        let tagged = BundleInput::with_format(BundleFormat::Json, vec![2]);
        assert!(matches!(tagged, BundleInput::Json(_)));
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("archive".parse::<BundleFormat>().unwrap(), BundleFormat::Archive);
        assert_eq!("JSON".parse::<BundleFormat>().unwrap(), BundleFormat::Json);
        assert!("yaml".parse::<BundleFormat>().is_err());
        assert_eq!(format!("{}", BundleFormat::Archive), "archive");
        assert_eq!(format!("{}", BundleFormat::Json), "json");
    }
}
