//! Object storage for uploaded images.
//!
//! [`ObjectStore`] is the seam the upload handler depends on:
//! - [`HttpObjectStore`] PUTs objects to a storage REST API with a bearer key.
//! - [`LocalObjectStore`] writes under a directory served at `/uploads`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

/// HTTP request timeout for a single upload.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// URL prefix under which [`LocalObjectStore`] files are served.
pub const LOCAL_UPLOADS_PREFIX: &str = "/uploads";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The HTTP request to the storage API failed.
    #[error("Storage request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The storage API returned a non-2xx status code.
    #[error("Storage API returned HTTP {0}")]
    HttpStatus(u16),

    /// Local filesystem failure.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Stores an object under a key and returns its public URL.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str)
        -> Result<String, StorageError>;
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Http {
        url: String,
        key: String,
        bucket: String,
        public_url: String,
    },
    Local {
        dir: PathBuf,
    },
}

impl StorageConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var              | Default / requirement             |
    /// |----------------------|-----------------------------------|
    /// | `STORAGE_BACKEND`    | `local` (`http` or `local`)       |
    /// | `UPLOAD_DIR`         | `uploads` (local only)            |
    /// | `STORAGE_URL`        | required for `http`               |
    /// | `STORAGE_KEY`        | required for `http`               |
    /// | `STORAGE_BUCKET`     | `images`                          |
    /// | `STORAGE_PUBLIC_URL` | `<STORAGE_URL>/object/public/<bucket>` |
    pub fn from_env() -> Self {
        let backend = std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "local".into());
        match backend.as_str() {
            "http" => {
                let url = std::env::var("STORAGE_URL")
                    .expect("STORAGE_URL must be set when STORAGE_BACKEND=http")
                    .trim_end_matches('/')
                    .to_string();
                let key = std::env::var("STORAGE_KEY")
                    .expect("STORAGE_KEY must be set when STORAGE_BACKEND=http");
                let bucket = std::env::var("STORAGE_BUCKET").unwrap_or_else(|_| "images".into());
                let public_url = std::env::var("STORAGE_PUBLIC_URL")
                    .map(|u| u.trim_end_matches('/').to_string())
                    .unwrap_or_else(|_| format!("{url}/object/public/{bucket}"));
                Self::Http {
                    url,
                    key,
                    bucket,
                    public_url,
                }
            }
            "local" => Self::Local {
                dir: std::env::var("UPLOAD_DIR")
                    .unwrap_or_else(|_| "uploads".into())
                    .into(),
            },
            other => panic!("STORAGE_BACKEND must be http or local (got '{other}')"),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            StorageConfig::Http { .. } => "http",
            StorageConfig::Local { .. } => "local",
        }
    }
}

/// Construct the object store matching the configured backend.
pub fn build_object_store(config: &StorageConfig) -> Arc<dyn ObjectStore> {
    match config {
        StorageConfig::Http {
            url,
            key,
            bucket,
            public_url,
        } => Arc::new(HttpObjectStore::new(
            url.clone(),
            key.clone(),
            bucket.clone(),
            public_url.clone(),
        )),
        StorageConfig::Local { dir } => Arc::new(LocalObjectStore::new(dir.clone())),
    }
}

// ---------------------------------------------------------------------------
// HttpObjectStore
// ---------------------------------------------------------------------------

pub struct HttpObjectStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    bucket: String,
    public_url: String,
}

impl HttpObjectStore {
    pub fn new(base_url: String, api_key: String, bucket: String, public_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            base_url,
            api_key,
            bucket,
            public_url,
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/object/{}/{key}", self.base_url, self.bucket)
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let response = self
            .client
            .put(self.object_url(key))
            .bearer_auth(&self.api_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StorageError::HttpStatus(response.status().as_u16()));
        }

        Ok(format!("{}/{key}", self.public_url))
    }
}

// ---------------------------------------------------------------------------
// LocalObjectStore
// ---------------------------------------------------------------------------

pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, StorageError> {
        let path = self.root.join(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &bytes).await?;
        Ok(format!("{LOCAL_UPLOADS_PREFIX}/{key}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_object_url_includes_bucket() {
        let store = HttpObjectStore::new(
            "https://storage.example.com".into(),
            "key".into(),
            "images".into(),
            "https://cdn.example.com/images".into(),
        );
        assert_eq!(
            store.object_url("vehicles/a.webp"),
            "https://storage.example.com/object/images/vehicles/a.webp"
        );
    }

    #[tokio::test]
    async fn local_store_writes_file_and_returns_public_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path().to_path_buf());

        let url = store
            .put("gear/abc.png", vec![1, 2, 3], "image/png")
            .await
            .unwrap();

        assert_eq!(url, "/uploads/gear/abc.png");
        let written = std::fs::read(dir.path().join("gear/abc.png")).unwrap();
        assert_eq!(written, vec![1, 2, 3]);
    }
}
