//! Anonymous identity issuance.
//!
//! The leaderboard keys player records by an opaque identity established
//! once per session. Issuance is delegated to an [`IdentityProvider`]; the
//! shipped implementation persists a generated UUID to a local file so the
//! same identity is presented across runs, the way a browser client keeps
//! its anonymous auth token in local storage.

use std::io;
use std::path::PathBuf;

use futures::future::BoxFuture;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Failures while establishing an anonymous identity.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The persisted identity file exists but holds garbage.
    #[error("identity file `{path}` does not contain a UUID")]
    Malformed {
        /// Offending file path.
        path: String,
    },
    /// Reading or writing the identity file failed.
    #[error("failed to access identity file `{path}`")]
    Io {
        /// Offending file path.
        path: String,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },
}

/// External collaborator issuing anonymous identities.
pub trait IdentityProvider: Send + Sync {
    /// Establish this session's identity. Called once at bootstrap.
    fn authenticate_anonymously(&self) -> BoxFuture<'static, Result<Uuid, IdentityError>>;
}

/// File-backed provider: load the stored identity or mint and persist a
/// fresh v4 UUID.
#[derive(Debug, Clone)]
pub struct FileIdentityProvider {
    path: PathBuf,
}

impl FileIdentityProvider {
    /// Provider persisting the identity at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load_or_create(path: PathBuf) -> Result<Uuid, IdentityError> {
        let display = path.display().to_string();

        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => {
                let id = Uuid::parse_str(contents.trim()).map_err(|_| IdentityError::Malformed {
                    path: display.clone(),
                })?;
                info!(identity = %id, "loaded persisted anonymous identity");
                Ok(id)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                let id = Uuid::new_v4();
                if let Some(parent) = path.parent() {
                    tokio::fs::create_dir_all(parent).await.map_err(|source| {
                        IdentityError::Io {
                            path: display.clone(),
                            source,
                        }
                    })?;
                }
                tokio::fs::write(&path, id.to_string())
                    .await
                    .map_err(|source| IdentityError::Io {
                        path: display.clone(),
                        source,
                    })?;
                info!(identity = %id, "issued new anonymous identity");
                Ok(id)
            }
            Err(source) => Err(IdentityError::Io {
                path: display,
                source,
            }),
        }
    }
}

impl IdentityProvider for FileIdentityProvider {
    fn authenticate_anonymously(&self) -> BoxFuture<'static, Result<Uuid, IdentityError>> {
        let path = self.path.clone();
        Box::pin(Self::load_or_create(path))
    }
}

/// Provider handing out a fixed identity; used in tests.
#[derive(Debug, Clone)]
pub struct StaticIdentityProvider {
    id: Uuid,
}

impl StaticIdentityProvider {
    /// Provider always answering with `id`.
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn authenticate_anonymously(&self) -> BoxFuture<'static, Result<Uuid, IdentityError>> {
        let id = self.id;
        Box::pin(async move { Ok(id) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn identity_is_stable_across_authentications() {
        let dir = std::env::temp_dir().join(format!("pop-the-rock-{}", Uuid::new_v4()));
        let provider = FileIdentityProvider::new(dir.join("identity"));

        let first = provider.authenticate_anonymously().await.unwrap();
        let second = provider.authenticate_anonymously().await.unwrap();
        assert_eq!(first, second);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn malformed_identity_file_is_an_error() {
        let dir = std::env::temp_dir().join(format!("pop-the-rock-{}", Uuid::new_v4()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("identity");
        tokio::fs::write(&path, "not-a-uuid").await.unwrap();

        let provider = FileIdentityProvider::new(&path);
        let err = provider.authenticate_anonymously().await.unwrap_err();
        assert!(matches!(err, IdentityError::Malformed { .. }));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
