//! In-memory attachment store

use super::attachments::{Attachment, AttachmentStore, AttachmentTable, NewAttachment};
use crate::utils::error::Result;
use async_trait::async_trait;
use parking_lot::RwLock;

/// Process-local attachment store; contents are lost on restart
#[derive(Debug, Default)]
pub struct MemoryAttachmentStore {
    table: RwLock<AttachmentTable>,
}

impl MemoryAttachmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttachmentStore for MemoryAttachmentStore {
    async fn insert(&self, attachment: NewAttachment) -> Result<Attachment> {
        Ok(self.table.write().insert(attachment))
    }

    async fn get(&self, id: u64) -> Result<Option<Attachment>> {
        Ok(self.table.read().get(id))
    }

    async fn set_alt_text(&self, id: u64, alt_text: &str) -> Result<()> {
        self.table
            .write()
            .update(id, |a| a.alt_text = Some(alt_text.to_string()))
    }

    async fn set_keywords(&self, id: u64, keywords: &str) -> Result<()> {
        self.table.write().update(id, |a| {
            a.keywords = (!keywords.is_empty()).then(|| keywords.to_string())
        })
    }

    async fn list_images_missing_alt(&self) -> Result<Vec<Attachment>> {
        Ok(self.table.read().missing_alt())
    }
}
