//! Alt text service implementation

use super::types::{SettingsUpdate, SettingsView};
use crate::config::{Config, validate_api_key_format};
use crate::core::bulk::BulkBackend;
use crate::core::media::ImageNormalizer;
use crate::core::types::{GeneratedAltText, GenerationResult, ImageRef};
use crate::core::vision::{AltTextGenerator, VisionClient};
use crate::storage::{
    AUTO_GENERATE_SETTING, Attachment, AttachmentStore, MemorySettingsStore, NewAttachment,
    OPENAI_API_KEY_SETTING, SettingsStore, open_attachment_store,
};
use crate::utils::error::{AltFriendError, ErrorKind, GenerationError, Result};
use crate::utils::{mask_api_key, sanitize_text_field};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Separate generation failures from infrastructure failures
pub fn split_outcome(result: Result<GeneratedAltText>) -> Result<GenerationResult> {
    match result {
        Ok(generated) => Ok(Ok(generated)),
        Err(AltFriendError::Generation(error)) => Ok(Err(error)),
        Err(e) => Err(e),
    }
}

fn reject(kind: ErrorKind) -> AltFriendError {
    AltFriendError::Generation(GenerationError::new(kind))
}

/// Alt text service
pub struct AltTextService {
    generator: Arc<dyn AltTextGenerator>,
    attachments: Arc<dyn AttachmentStore>,
    settings: Arc<dyn SettingsStore>,
}

impl AltTextService {
    pub fn new(
        generator: Arc<dyn AltTextGenerator>,
        attachments: Arc<dyn AttachmentStore>,
        settings: Arc<dyn SettingsStore>,
    ) -> Self {
        Self {
            generator,
            attachments,
            settings,
        }
    }

    /// Wire the vision client, stores and normalizer from configuration
    pub async fn from_config(config: &Config) -> Result<Self> {
        let settings: Arc<dyn SettingsStore> = Arc::new(MemorySettingsStore::from_config(config));
        let attachments = open_attachment_store(config.storage()).await?;
        let normalizer = Arc::new(ImageNormalizer::new(config.image())?);
        let generator = Arc::new(VisionClient::new(
            config.openai().clone(),
            normalizer,
            Arc::clone(&settings),
        )?);

        Ok(Self::new(generator, attachments, settings))
    }

    pub fn attachments(&self) -> &Arc<dyn AttachmentStore> {
        &self.attachments
    }

    pub fn settings(&self) -> &Arc<dyn SettingsStore> {
        &self.settings
    }

    /// Generate alt text for a caller-supplied image location and persist it
    /// on the attachment.
    ///
    /// Validation runs in order: location, attachment id (zero counts as
    /// missing), then the attachment must exist and be an image.
    pub async fn generate_single(
        &self,
        attachment_id: Option<u64>,
        image_url: Option<&str>,
        keywords: Option<&str>,
    ) -> Result<GeneratedAltText> {
        let image_url = image_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| reject(ErrorKind::MissingImageUrl))?;
        let attachment = self.image_attachment(attachment_id).await?;
        let keywords = sanitize_text_field(keywords.unwrap_or_default());

        self.generate_and_store(attachment.id, image_url, &keywords)
            .await
    }

    /// Generate alt text for a stored attachment using its own URL and keywords
    pub async fn generate_for_attachment(
        &self,
        attachment_id: Option<u64>,
    ) -> Result<GeneratedAltText> {
        let attachment = self.image_attachment(attachment_id).await?;
        if attachment.url.trim().is_empty() {
            return Err(AltFriendError::Generation(GenerationError::with_message(
                ErrorKind::MissingImageUrl,
                "Could not retrieve image URL.",
            )));
        }

        self.generate_and_store(attachment.id, &attachment.url, attachment.keywords())
            .await
    }

    async fn image_attachment(&self, attachment_id: Option<u64>) -> Result<Attachment> {
        let id = attachment_id
            .filter(|id| *id != 0)
            .ok_or_else(|| reject(ErrorKind::MissingAttachmentId))?;

        self.attachments
            .get(id)
            .await?
            .filter(Attachment::is_image)
            .ok_or_else(|| reject(ErrorKind::InvalidAttachment))
    }

    async fn generate_and_store(
        &self,
        attachment_id: u64,
        image_url: &str,
        keywords: &str,
    ) -> Result<GeneratedAltText> {
        let generated = self.generator.generate_alt_text(image_url, keywords).await?;

        let text = sanitize_text_field(&generated.text);
        if text.is_empty() {
            return Err(reject(ErrorKind::EmptyResponse));
        }

        self.attachments.set_alt_text(attachment_id, &text).await?;
        info!("Saved alt text for attachment {}", attachment_id);

        Ok(GeneratedAltText {
            text,
            usage: generated.usage,
        })
    }

    /// Image attachments lacking alt text, newest first
    pub async fn list_missing(&self) -> Result<Vec<ImageRef>> {
        let images: Vec<ImageRef> = self
            .attachments
            .list_images_missing_alt()
            .await?
            .iter()
            .filter(|a| !a.url.trim().is_empty())
            .map(Attachment::to_image_ref)
            .collect();

        debug!("Found {} images without alt text", images.len());
        Ok(images)
    }

    /// Register an attachment, generating alt text when auto-generation is on.
    ///
    /// A generation failure is logged and never fails the registration.
    pub async fn register_attachment(&self, new: NewAttachment) -> Result<Attachment> {
        let new = NewAttachment {
            alt_text: new.alt_text.as_deref().map(sanitize_text_field),
            keywords: new.keywords.as_deref().map(sanitize_text_field),
            ..new
        };
        let attachment = self.attachments.insert(new).await?;
        info!("Registered attachment {}", attachment.id);

        let eligible = attachment.is_image()
            && !attachment.has_alt_text()
            && !attachment.url.trim().is_empty();
        if !eligible || !self.settings.auto_generate_on_upload().await {
            return Ok(attachment);
        }

        match self
            .generate_and_store(attachment.id, &attachment.url, attachment.keywords())
            .await
        {
            Ok(_) => Ok(self.get_attachment(attachment.id).await?),
            Err(e) => {
                warn!(
                    "Auto-generation failed for attachment {}: {}",
                    attachment.id, e
                );
                Ok(attachment)
            }
        }
    }

    pub async fn get_attachment(&self, id: u64) -> Result<Attachment> {
        self.attachments
            .get(id)
            .await?
            .ok_or_else(|| AltFriendError::NotFound(format!("Attachment {}", id)))
    }

    /// Store sanitized keyword hints; empty input clears them
    pub async fn set_keywords(&self, id: u64, keywords: &str) -> Result<Attachment> {
        let keywords = sanitize_text_field(keywords);
        self.attachments.set_keywords(id, &keywords).await?;
        self.get_attachment(id).await
    }

    pub async fn settings_view(&self) -> SettingsView {
        let api_key = self.settings.api_key().await;
        SettingsView {
            api_key_configured: api_key.is_some(),
            api_key_masked: api_key.as_deref().map(mask_api_key),
            auto_generate_on_upload: self.settings.auto_generate_on_upload().await,
        }
    }

    /// Apply a settings update.
    ///
    /// A malformed API key rejects the whole update and keeps the stored value.
    pub async fn update_settings(&self, update: SettingsUpdate) -> Result<SettingsView> {
        let api_key = update
            .openai_api_key
            .as_deref()
            .map(sanitize_text_field);

        if let Some(key) = &api_key {
            validate_api_key_format(key).map_err(|message| {
                AltFriendError::Generation(GenerationError::with_message(
                    ErrorKind::InvalidRequest,
                    message,
                ))
            })?;
        }

        if let Some(key) = api_key {
            info!("Updating API key ({})", mask_api_key(&key));
            self.settings.set(OPENAI_API_KEY_SETTING, key).await?;
        }
        if let Some(enabled) = update.auto_generate_on_upload {
            self.settings
                .set(AUTO_GENERATE_SETTING, enabled.to_string())
                .await?;
        }

        Ok(self.settings_view().await)
    }
}

#[async_trait]
impl BulkBackend for AltTextService {
    async fn list_missing(&self) -> Result<Vec<ImageRef>> {
        AltTextService::list_missing(self).await
    }

    async fn generate_single(&self, attachment_id: u64) -> Result<GenerationResult> {
        split_outcome(self.generate_for_attachment(Some(attachment_id)).await)
    }
}
