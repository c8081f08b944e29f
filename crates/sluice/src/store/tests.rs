#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use crate::{ListPayload, ListStore, SluiceError};

    const INDEX: &str = "[allow]\nlistFileName = allow.txt\n\n[deny]\nlistFileName = sub/deny.txt\n";

    fn payload(path: &str, content: &str) -> ListPayload {
        ListPayload {
            path:    path.to_owned(),
            content: content.to_owned(),
        }
    }

    #[tokio::test]
    async fn test_new_creates_the_root_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("nested").join("config");
        let store = ListStore::new(&root).await.unwrap();
        assert!(root.is_dir());
        assert!(store.index_path().ends_with("lists.ini"));
    }

    #[tokio::test]
    async fn test_resolve_allows_nested_paths() {
        let dir = tempdir().unwrap();
        let store = ListStore::new(dir.path()).await.unwrap();
        let full = store.resolve("sub/dir/file.txt").await.unwrap();
        assert!(full.starts_with(store.root()));
        assert!(full.ends_with("sub/dir/file.txt"));
    }

    #[tokio::test]
    async fn test_resolve_rejects_parent_traversal() {
        let dir = tempdir().unwrap();
        let store = ListStore::new(dir.path()).await.unwrap();
        let err = store.resolve("../../etc/passwd").await.unwrap_err();
        assert!(matches!(err, SluiceError::PathEscape { .. }));
        let err = store.resolve("a/../../b").await.unwrap_err();
        assert!(matches!(err, SluiceError::PathEscape { .. }));
    }

    #[tokio::test]
    async fn test_resolve_rejects_double_dots_anywhere() {
        let dir = tempdir().unwrap();
        let store = ListStore::new(dir.path()).await.unwrap();
        let err = store.resolve("a..b.txt").await.unwrap_err();
        assert!(matches!(err, SluiceError::PathEscape { .. }));
    }

    #[tokio::test]
    async fn test_resolve_rejects_empty_and_root_itself() {
        let dir = tempdir().unwrap();
        let store = ListStore::new(dir.path()).await.unwrap();
        assert!(matches!(store.resolve("").await, Err(SluiceError::PathEscape { .. })));
        assert!(matches!(store.resolve("config/").await, Err(SluiceError::PathEscape { .. })));
        assert!(matches!(store.resolve(".").await, Err(SluiceError::PathEscape { .. })));
    }

    #[tokio::test]
    async fn test_resolve_strips_redundant_config_prefix() {
        let dir = tempdir().unwrap();
        let store = ListStore::new(dir.path()).await.unwrap();
        let direct = store.resolve("allow.txt").await.unwrap();
        let prefixed = store.resolve("config/allow.txt").await.unwrap();
        assert_eq!(direct, prefixed);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_resolve_rejects_symlink_escape() {
        let dir = tempdir().unwrap();
        let outside = dir.path().join("outside");
        tokio::fs::create_dir_all(&outside).await.unwrap();
        tokio::fs::write(outside.join("target.txt"), "secret").await.unwrap();

        let root = dir.path().join("root");
        let store = ListStore::new(&root).await.unwrap();
        std::os::unix::fs::symlink(outside.join("target.txt"), root.join("link.txt")).unwrap();

        let err = store.resolve("link.txt").await.unwrap_err();
        assert!(matches!(err, SluiceError::PathEscape { .. }));
    }

    #[tokio::test]
    async fn test_load_on_fresh_store_is_empty() {
        let dir = tempdir().unwrap();
        let store = ListStore::new(dir.path()).await.unwrap();
        let loaded = store.load().await.unwrap();
        assert!(loaded.index.is_empty());
        assert!(loaded.files.is_empty());
    }

    #[tokio::test]
    async fn test_load_returns_empty_content_for_missing_files() {
        let dir = tempdir().unwrap();
        let store = ListStore::new(dir.path()).await.unwrap();
        store.save(INDEX, &[]).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.files.len(), 2);
        for file in &loaded.files {
            assert!(file.content.is_empty());
            assert!(file.modified.is_none());
        }
    }

    #[tokio::test]
    async fn test_load_tolerates_partial_index() {
        let dir = tempdir().unwrap();
        let store = ListStore::new(dir.path()).await.unwrap();
        let index = "[good]\nlistFileName = good.txt\n[broken]\ndescription = no path here\n";
        store.save(index, &[payload("good.txt", "entry\n")]).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.index, index);
        assert_eq!(loaded.files.len(), 1);
        let file = loaded.files.first().unwrap();
        assert_eq!(file.section, "good");
        assert_eq!(file.content, "entry\n");
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = ListStore::new(dir.path()).await.unwrap();
        store
            .save(INDEX, &[
                payload("allow.txt", "a.example.com\n"),
                payload("sub/deny.txt", "b.example.net\n"),
            ])
            .await
            .unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.index, INDEX);
        assert_eq!(loaded.files.len(), 2);
        assert_eq!(loaded.files.first().unwrap().content, "a.example.com\n");
        assert_eq!(loaded.files.last().unwrap().content, "b.example.net\n");
        assert!(loaded.files.last().unwrap().full_path.is_file());
        assert!(loaded.files.last().unwrap().modified.is_some());
    }

    #[tokio::test]
    async fn test_save_rejects_escaping_payload() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("confined");
        let store = ListStore::new(&root).await.unwrap();
        let err = store
            .save("", &[payload("../evil.txt", "nope")])
            .await
            .unwrap_err();
        assert!(matches!(err, SluiceError::PathEscape { .. }));
        assert!(!dir.path().join("evil.txt").exists());
    }

    #[tokio::test]
    async fn test_load_propagates_escaping_index_entry() {
        let dir = tempdir().unwrap();
        let store = ListStore::new(dir.path()).await.unwrap();
        store.save("[evil]\nlistFileName = ../../etc/passwd\n", &[]).await.unwrap();

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, SluiceError::PathEscape { .. }));
    }

    #[tokio::test]
    async fn test_referenced_paths_keep_order_and_duplicates() {
        let dir = tempdir().unwrap();
        let store = ListStore::new(dir.path()).await.unwrap();
        let index = "[one]\nlistFileName = shared.txt\n[two]\nlistFileName = other.txt\n[three]\nlistFileName = shared.txt\n";
        store.save(index, &[]).await.unwrap();

        let paths = store.referenced_paths().await;
        assert_eq!(paths, vec![
            "shared.txt".to_owned(),
            "other.txt".to_owned(),
            "shared.txt".to_owned(),
        ]);
    }

    #[tokio::test]
    async fn test_referenced_paths_empty_without_index() {
        let dir = tempdir().unwrap();
        let store = ListStore::new(dir.path()).await.unwrap();
        assert!(store.referenced_paths().await.is_empty());
    }
}
