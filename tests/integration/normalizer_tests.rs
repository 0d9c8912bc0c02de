//! Remote image normalization tests

#[cfg(test)]
mod tests {
    use crate::common::{encode_png, write_png};
    use alt_friend::config::ImageConfig;
    use alt_friend::core::media::{ImageNormalizer, NormalizeError};
    use std::path::Path;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn normalizer_in(temp_dir: &Path) -> ImageNormalizer {
        let config = ImageConfig {
            temp_dir: Some(temp_dir.to_path_buf()),
            ..ImageConfig::default()
        };
        ImageNormalizer::new(&config).unwrap()
    }

    fn leftover_files(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    async fn serve(server: &MockServer, route: &str, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(template)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_remote_image_is_downscaled() {
        let server = MockServer::start().await;
        serve(
            &server,
            "/uploads/wide.png",
            ResponseTemplate::new(200).set_body_bytes(encode_png(800, 400)),
        )
        .await;

        let temp = TempDir::new().unwrap();
        let normalizer = normalizer_in(temp.path());
        let image = normalizer
            .normalize(&format!("{}/uploads/wide.png", server.uri()))
            .await
            .unwrap();

        assert_eq!((image.width, image.height), (256, 128));
        assert_eq!(image.mime_type, "image/jpeg");
        assert!(image.resized);
        assert_eq!(leftover_files(temp.path()), 0);
    }

    #[tokio::test]
    async fn test_temp_file_removed_after_decode_failure() {
        let server = MockServer::start().await;
        serve(
            &server,
            "/uploads/broken.png",
            ResponseTemplate::new(200).set_body_bytes(b"<html>not an image</html>".to_vec()),
        )
        .await;

        let temp = TempDir::new().unwrap();
        let normalizer = normalizer_in(temp.path());
        let result = normalizer
            .normalize(&format!("{}/uploads/broken.png", server.uri()))
            .await;

        assert!(matches!(result, Err(NormalizeError::UnsupportedFormat)));
        assert_eq!(leftover_files(temp.path()), 0);
    }

    #[tokio::test]
    async fn test_http_error_is_fetch_failure() {
        let server = MockServer::start().await;
        serve(&server, "/uploads/missing.png", ResponseTemplate::new(404)).await;

        let temp = TempDir::new().unwrap();
        let normalizer = normalizer_in(temp.path());
        let result = normalizer
            .normalize(&format!("{}/uploads/missing.png", server.uri()))
            .await;

        assert!(matches!(result, Err(NormalizeError::Fetch(_))));
        assert_eq!(leftover_files(temp.path()), 0);
    }

    #[tokio::test]
    async fn test_site_url_served_from_media_root() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let media = TempDir::new().unwrap();
        std::fs::create_dir(media.path().join("2024")).unwrap();
        write_png(&media.path().join("2024"), "photo.png", 40, 30);

        let config = ImageConfig {
            site_url: Some(format!("{}/media", server.uri())),
            media_root: Some(media.path().to_path_buf()),
            ..ImageConfig::default()
        };
        let normalizer = ImageNormalizer::new(&config).unwrap();

        let image = normalizer
            .normalize(&format!("{}/media/2024/photo.png", server.uri()))
            .await
            .unwrap();
        assert_eq!((image.width, image.height), (40, 30));
        assert_eq!(image.mime_type, "image/png");
        assert!(!image.resized);
    }

    #[tokio::test]
    async fn test_files_outside_media_root_are_refused() {
        let media = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        let private = write_png(elsewhere.path(), "private.png", 40, 30);

        let config = ImageConfig {
            site_url: Some("https://site.test/media".to_string()),
            media_root: Some(media.path().to_path_buf()),
            ..ImageConfig::default()
        };
        let normalizer = ImageNormalizer::new(&config).unwrap();

        let as_path = private.to_str().unwrap().to_string();
        let as_file_url = format!("file://{}", as_path);
        for location in [as_path, as_file_url] {
            let result = normalizer.normalize(&location).await;
            assert!(
                matches!(result, Err(NormalizeError::InvalidLocation(_))),
                "{} was read",
                location
            );
        }
    }
}
