//! Attachment metadata

use crate::core::types::ImageRef;
use crate::utils::error::{AltFriendError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A stored media item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: u64,
    pub url: String,
    #[serde(default)]
    pub title: String,
    pub mime_type: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    /// Comma-separated keyword hints
    #[serde(default)]
    pub keywords: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

impl Attachment {
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    pub fn has_alt_text(&self) -> bool {
        self.alt_text.as_deref().is_some_and(|text| !text.is_empty())
    }

    pub fn keywords(&self) -> &str {
        self.keywords.as_deref().unwrap_or_default()
    }

    pub fn to_image_ref(&self) -> ImageRef {
        ImageRef {
            id: self.id,
            url: self.url.clone(),
            title: self.title.clone(),
            keywords: self.keywords().to_string(),
        }
    }
}

/// Attachment registration payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAttachment {
    pub url: String,
    #[serde(default)]
    pub title: String,
    pub mime_type: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
}

/// Attachment metadata store
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Store a new attachment and assign its id
    async fn insert(&self, attachment: NewAttachment) -> Result<Attachment>;

    async fn get(&self, id: u64) -> Result<Option<Attachment>>;

    /// Overwrite the alt text field
    async fn set_alt_text(&self, id: u64, alt_text: &str) -> Result<()>;

    /// Overwrite the keyword field; an empty string clears it
    async fn set_keywords(&self, id: u64, keywords: &str) -> Result<()>;

    /// Image attachments whose alt text is absent or empty, newest first
    async fn list_images_missing_alt(&self) -> Result<Vec<Attachment>>;
}

/// Id-ordered attachment table shared by the store implementations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct AttachmentTable {
    next_id: u64,
    attachments: BTreeMap<u64, Attachment>,
}

impl AttachmentTable {
    pub(crate) fn insert(&mut self, new: NewAttachment) -> Attachment {
        self.next_id += 1;
        let attachment = Attachment {
            id: self.next_id,
            url: new.url,
            title: new.title,
            mime_type: new.mime_type,
            alt_text: new.alt_text.filter(|text| !text.is_empty()),
            keywords: new.keywords.filter(|kw| !kw.is_empty()),
            uploaded_at: Utc::now(),
        };
        self.attachments.insert(attachment.id, attachment.clone());
        attachment
    }

    pub(crate) fn get(&self, id: u64) -> Option<Attachment> {
        self.attachments.get(&id).cloned()
    }

    pub(crate) fn update<F>(&mut self, id: u64, apply: F) -> Result<()>
    where
        F: FnOnce(&mut Attachment),
    {
        let attachment = self
            .attachments
            .get_mut(&id)
            .ok_or_else(|| AltFriendError::NotFound(format!("Attachment {}", id)))?;
        apply(attachment);
        Ok(())
    }

    pub(crate) fn missing_alt(&self) -> Vec<Attachment> {
        let mut missing: Vec<Attachment> = self
            .attachments
            .values()
            .filter(|a| a.is_image() && !a.has_alt_text())
            .cloned()
            .collect();
        missing.sort_by(|a, b| (b.uploaded_at, b.id).cmp(&(a.uploaded_at, a.id)));
        missing
    }
}
