//! JSON file attachment store

use super::attachments::{Attachment, AttachmentStore, AttachmentTable, NewAttachment};
use crate::utils::error::{AltFriendError, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// Attachment store persisting the whole table after every mutation
#[derive(Debug)]
pub struct JsonFileAttachmentStore {
    path: PathBuf,
    table: RwLock<AttachmentTable>,
    write_lock: Mutex<()>,
}

impl JsonFileAttachmentStore {
    /// Open the store, loading `path` when it exists
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let table = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => AttachmentTable::default(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            table: RwLock::new(table),
            write_lock: Mutex::new(()),
        })
    }

    /// Apply `change` to a copy of the table, write the copy, then publish it.
    ///
    /// A failed write leaves the in-memory table as it was.
    async fn commit<T, F>(&self, change: F) -> Result<T>
    where
        F: FnOnce(&mut AttachmentTable) -> Result<T>,
    {
        let _guard = self.write_lock.lock().await;
        let mut next = self.table.read().clone();
        let value = change(&mut next)?;

        self.persist(&next).await?;
        *self.table.write() = next;
        Ok(value)
    }

    async fn persist(&self, table: &AttachmentTable) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(table)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let temp = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp, &bytes).await?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| AltFriendError::Storage(format!("Failed to replace {}: {}", self.path.display(), e)))?;

        debug!("Persisted attachments to {}", self.path.display());
        Ok(())
    }
}

#[async_trait]
impl AttachmentStore for JsonFileAttachmentStore {
    async fn insert(&self, attachment: NewAttachment) -> Result<Attachment> {
        self.commit(|table| Ok(table.insert(attachment))).await
    }

    async fn get(&self, id: u64) -> Result<Option<Attachment>> {
        Ok(self.table.read().get(id))
    }

    async fn set_alt_text(&self, id: u64, alt_text: &str) -> Result<()> {
        self.commit(|table| table.update(id, |a| a.alt_text = Some(alt_text.to_string())))
            .await
    }

    async fn set_keywords(&self, id: u64, keywords: &str) -> Result<()> {
        self.commit(|table| {
            table.update(id, |a| {
                a.keywords = (!keywords.is_empty()).then(|| keywords.to_string())
            })
        })
        .await
    }

    async fn list_images_missing_alt(&self) -> Result<Vec<Attachment>> {
        Ok(self.table.read().missing_alt())
    }
}
