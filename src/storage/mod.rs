//! Storage layer
//!
//! Opaque collaborators standing in for the host platform: a key-value
//! settings store and an attachment-metadata store.

pub mod attachments;
pub mod json_file;
pub mod memory;
pub mod settings;

pub use attachments::{Attachment, AttachmentStore, NewAttachment};
pub use json_file::JsonFileAttachmentStore;
pub use memory::MemoryAttachmentStore;
pub use settings::{
    AUTO_GENERATE_SETTING, MemorySettingsStore, OPENAI_API_KEY_SETTING, SettingsStore,
};

use crate::config::{StorageBackend, StorageConfig};
use crate::utils::error::{AltFriendError, Result};
use std::sync::Arc;
use tracing::info;

/// Open the attachment store selected by configuration
pub async fn open_attachment_store(config: &StorageConfig) -> Result<Arc<dyn AttachmentStore>> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory attachment store");
            Ok(Arc::new(MemoryAttachmentStore::new()))
        }
        StorageBackend::JsonFile => {
            let path = config.path.as_ref().ok_or_else(|| {
                AltFriendError::Config("json_file storage requires a path".to_string())
            })?;
            info!("Using JSON file attachment store at {}", path.display());
            Ok(Arc::new(JsonFileAttachmentStore::open(path).await?))
        }
    }
}
