//! Image normalizer
//!
//! Loads an image from the media root or a remote URL and returns bytes whose
//! dimensions fit within the configured bounds.

use super::{ImageSource, SourceResolver};
use crate::config::ImageConfig;
use crate::core::types::NormalizedImage;
use crate::utils::error::{AltFriendError, ErrorKind, GenerationError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::path::PathBuf;
use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use url::Url;

/// Bounds and encoder settings applied by the normalizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub max_width: u32,
    pub max_height: u32,
    /// JPEG quality for resized output
    pub quality: u8,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            max_width: 256,
            max_height: 256,
            quality: 50,
        }
    }
}

impl From<&ImageConfig> for NormalizeOptions {
    fn from(config: &ImageConfig) -> Self {
        Self {
            max_width: config.max_width,
            max_height: config.max_height,
            quality: config.quality,
        }
    }
}

/// Detailed normalization failure.
///
/// Callers only ever see `image_processing_error`; the detail is for logs.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("invalid image location: {0}")]
    InvalidLocation(String),

    #[error("failed to fetch image: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("failed to access image data: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported image format")]
    UnsupportedFormat,

    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),

    #[error("failed to encode image: {0}")]
    Encode(image::ImageError),

    #[error("image has no pixels")]
    Empty,

    #[error("image processing task failed: {0}")]
    Task(String),
}

impl From<NormalizeError> for GenerationError {
    fn from(_: NormalizeError) -> Self {
        GenerationError::new(ErrorKind::ImageProcessingError)
    }
}

/// Image normalizer
pub struct ImageNormalizer {
    options: NormalizeOptions,
    resolver: SourceResolver,
    http: reqwest::Client,
    temp_dir: PathBuf,
}

impl ImageNormalizer {
    /// Build a normalizer from configuration
    pub fn new(config: &ImageConfig) -> Result<Self> {
        let resolver = match (&config.site_url, &config.media_root) {
            (Some(site_url), Some(media_root)) => {
                SourceResolver::with_site(site_url, media_root)
                    .map_err(|e| AltFriendError::Config(e.to_string()))?
            }
            _ => SourceResolver::new(),
        };

        let http = reqwest::Client::builder()
            .timeout(config.fetch_timeout_duration())
            .build()?;

        Ok(Self {
            options: NormalizeOptions::from(config),
            resolver,
            http,
            temp_dir: config.temp_dir.clone().unwrap_or_else(std::env::temp_dir),
        })
    }

    pub fn options(&self) -> NormalizeOptions {
        self.options
    }

    /// Normalize the image at `location` with the configured bounds
    pub async fn normalize(&self, location: &str) -> std::result::Result<NormalizedImage, NormalizeError> {
        self.normalize_with(location, self.options).await
    }

    /// Normalize the image at `location` with explicit bounds
    pub async fn normalize_with(
        &self,
        location: &str,
        options: NormalizeOptions,
    ) -> std::result::Result<NormalizedImage, NormalizeError> {
        let result = match self.resolver.resolve(location)? {
            ImageSource::Local(path) => {
                debug!("Reading local image {}", path.display());
                let bytes = tokio::fs::read(&path).await?;
                process(bytes, options).await
            }
            ImageSource::Remote(url) => {
                // The download lives exactly as long as this arm; dropping it removes the file.
                let download = self.download(&url).await?;
                let bytes = tokio::fs::read(download.path()).await?;
                process(bytes, options).await
            }
        };

        if let Err(e) = &result {
            warn!("Image normalization failed for {}: {}", location, e);
        }
        result
    }

    async fn download(&self, url: &Url) -> std::result::Result<NamedTempFile, NormalizeError> {
        let temp = tempfile::Builder::new()
            .prefix("alt-friend-")
            .tempfile_in(&self.temp_dir)?;

        debug!("Downloading {} to {}", url, temp.path().display());

        let mut response = self.http.get(url.clone()).send().await?.error_for_status()?;
        let mut file = tokio::fs::File::from_std(temp.reopen()?);
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        Ok(temp)
    }
}

async fn process(
    bytes: Vec<u8>,
    options: NormalizeOptions,
) -> std::result::Result<NormalizedImage, NormalizeError> {
    tokio::task::spawn_blocking(move || normalize_bytes(bytes, options))
        .await
        .map_err(|e| NormalizeError::Task(e.to_string()))?
}

fn mime_type_for(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::Png => Some("image/png"),
        ImageFormat::Gif => Some("image/gif"),
        ImageFormat::WebP => Some("image/webp"),
        _ => None,
    }
}

fn scaled(dimension: u32, ratio: f64, max: u32) -> u32 {
    ((f64::from(dimension) * ratio).round() as u32).clamp(1, max)
}

/// Normalize encoded image bytes.
///
/// Images already within bounds are returned untouched with their native MIME
/// type. Larger images are scaled by `min(max_w / w, max_h / h)`, flattened
/// onto white and re-encoded as JPEG.
pub fn normalize_bytes(
    bytes: Vec<u8>,
    options: NormalizeOptions,
) -> std::result::Result<NormalizedImage, NormalizeError> {
    let format = image::guess_format(&bytes).map_err(|_| NormalizeError::UnsupportedFormat)?;
    let mime_type = mime_type_for(format).ok_or(NormalizeError::UnsupportedFormat)?;

    let image = image::load_from_memory_with_format(&bytes, format).map_err(NormalizeError::Decode)?;
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(NormalizeError::Empty);
    }

    let ratio = f64::min(
        f64::from(options.max_width) / f64::from(width),
        f64::from(options.max_height) / f64::from(height),
    );

    if ratio >= 1.0 {
        return Ok(NormalizedImage {
            bytes,
            mime_type,
            width,
            height,
            resized: false,
        });
    }

    let new_width = scaled(width, ratio, options.max_width);
    let new_height = scaled(height, ratio, options.max_height);
    debug!(
        "Resizing image {}x{} -> {}x{}",
        width, height, new_width, new_height
    );

    let resized = image.resize_exact(new_width, new_height, FilterType::Triangle);
    let flattened = flatten_onto_white(&resized);

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, options.quality)
        .encode_image(&flattened)
        .map_err(NormalizeError::Encode)?;

    Ok(NormalizedImage {
        bytes: out,
        mime_type: "image/jpeg",
        width: new_width,
        height: new_height,
        resized: true,
    })
}

/// Composite over an opaque white background; JPEG has no alpha channel
fn flatten_onto_white(image: &DynamicImage) -> RgbImage {
    let rgba = image.to_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = u16::from(a);
        let blend = |c: u8| ((u16::from(c) * alpha + 255 * (255 - alpha)) / 255) as u8;
        out.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }
    out
}
