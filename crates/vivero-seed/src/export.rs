//! Publishable key export.

use std::path::Path;

use tracing::debug;

use crate::error::SeedError;

/// Write `token` to `path` as UTF-8, creating parent directories and
/// replacing any existing file.
pub async fn export_publishable_key(token: &str, path: &Path) -> Result<(), SeedError> {
    let export_err = |source| SeedError::Export {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        debug!(dir = %parent.display(), "creating key file directory");
        tokio::fs::create_dir_all(parent).await.map_err(export_err)?;
    }
    tokio::fs::write(path, token).await.map_err(export_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront").join("env").join("publishable_key");

        export_publishable_key("pk_123", &path).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "pk_123");
    }

    #[tokio::test]
    async fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key");
        std::fs::write(&path, "pk_old_and_longer").unwrap();

        export_publishable_key("pk_new", &path).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "pk_new");
    }

    #[tokio::test]
    async fn test_unwritable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();

        let err = export_publishable_key("pk", &blocker.join("key")).await.unwrap_err();
        assert!(matches!(err, SeedError::Export { .. }));
    }
}
