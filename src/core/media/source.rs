//! Resolution of image locations to local files or remote URLs

use super::NormalizeError;
use std::path::{Path, PathBuf};
use url::Url;

/// Where the bytes of an image can be read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Directly readable from the filesystem
    Local(PathBuf),
    /// Must be downloaded first
    Remote(Url),
}

/// Maps image locations onto [`ImageSource`]s.
///
/// URLs under the configured site URL are served from the media root on disk
/// instead of being downloaded again.
#[derive(Debug, Clone, Default)]
pub struct SourceResolver {
    site: Option<(Url, PathBuf)>,
}

impl SourceResolver {
    /// Resolver that downloads every http(s) location
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver that maps `site_url` onto `media_root`
    pub fn with_site(site_url: &str, media_root: &Path) -> Result<Self, NormalizeError> {
        let mut site = Url::parse(site_url)
            .map_err(|e| NormalizeError::InvalidLocation(format!("{}: {}", site_url, e)))?;
        if !site.path().ends_with('/') {
            let path = format!("{}/", site.path());
            site.set_path(&path);
        }
        let root = std::path::absolute(media_root)?;
        Ok(Self {
            site: Some((site, root)),
        })
    }

    /// Classify a location.
    ///
    /// Only http(s) URLs are accepted. A URL is read from disk only when it
    /// falls under the site URL; every other path or scheme is refused.
    pub fn resolve(&self, location: &str) -> Result<ImageSource, NormalizeError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(NormalizeError::InvalidLocation(
                "empty image location".to_string(),
            ));
        }

        let url = Url::parse(location)
            .map_err(|e| NormalizeError::InvalidLocation(format!("{}: {}", location, e)))?;

        match url.scheme() {
            "http" | "https" => match self.local_path_for(&url)? {
                Some(path) => Ok(ImageSource::Local(path)),
                None => Ok(ImageSource::Remote(url)),
            },
            other => Err(NormalizeError::InvalidLocation(format!(
                "unsupported scheme: {}",
                other
            ))),
        }
    }

    fn local_path_for(&self, url: &Url) -> Result<Option<PathBuf>, NormalizeError> {
        let Some((site, root)) = &self.site else {
            return Ok(None);
        };

        if url.origin() != site.origin() || !url.path().starts_with(site.path()) {
            return Ok(None);
        }

        let relative = &url.path()[site.path().len()..];
        let root_url = Url::from_directory_path(root)
            .map_err(|_| NormalizeError::InvalidLocation(root.display().to_string()))?;
        let path = root_url
            .join(relative)
            .ok()
            .and_then(|file_url| file_url.to_file_path().ok())
            .ok_or_else(|| NormalizeError::InvalidLocation(url.to_string()))?;

        // Dot segments are normalized by the join; anything outside the root is refused.
        if !path.starts_with(root) {
            return Err(NormalizeError::InvalidLocation(url.to_string()));
        }

        Ok(Some(path))
    }
}
