//! Image and configuration fixtures

use alt_friend::config::Config;
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Encode a solid-color PNG of the given size
pub fn encode_png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

/// Write a PNG into `dir` and return its path
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, encode_png(width, height)).unwrap();
    path
}

/// Default configuration pointed at a mock vision API
pub fn test_config(api_base: &str) -> Config {
    let mut config = Config::default();
    config.app.openai.api_base = api_base.to_string();
    config.app.openai.api_key = Some("sk-test-key-0123456789".to_string());
    config
}
