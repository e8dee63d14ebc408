//! JSON-file cart repository, the guest-device local store.
//!
//! One JSON document per device holding the line-item snapshot, the
//! local-storage analog for an embedded storefront.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::aggregates::CartLine;
use crate::ports::CartRepository;
use crate::StoreError;

pub struct JsonFileCartRepository {
    path: PathBuf,
}

impl JsonFileCartRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CartRepository for JsonFileCartRepository {
    async fn load(&self) -> Result<Vec<CartLine>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, lines: Vec<CartLine>) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(&lines)?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}
