//! 画像ファイルの読み込み
//!
//! 読めないファイルはエラーにせず「画像なし」として扱う。
//! 送信時に入力不足として表面化する。

use image::ImageFormat;
use reunify_common::EncodedImage;
use std::path::Path;

/// 拡張子からMIMEタイプを推定（不明ならNone）
pub fn declared_mime_type(path: &Path) -> Option<&'static str> {
    ImageFormat::from_path(path).ok().map(|format| format.to_mime_type())
}

/// ファイルを読み込んでBase64化
pub fn load_image(path: &Path) -> Option<EncodedImage> {
    match std::fs::read(path) {
        Ok(bytes) => {
            let image = EncodedImage::from_bytes(&bytes, declared_mime_type(path));
            log::debug!(
                "loaded {} ({} bytes, {})",
                path.display(),
                bytes.len(),
                image.mime_type
            );
            Some(image)
        }
        Err(e) => {
            log::warn!("画像を読み込めません: {} ({})", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_declared_mime_type() {
        assert_eq!(declared_mime_type(Path::new("a.png")), Some("image/png"));
        assert_eq!(declared_mime_type(Path::new("a.JPG")), Some("image/jpeg"));
        assert_eq!(declared_mime_type(Path::new("a.webp")), Some("image/webp"));
        assert_eq!(declared_mime_type(Path::new("a.unknown")), None);
        assert_eq!(declared_mime_type(Path::new("noext")), None);
    }

    #[test]
    fn test_load_image_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        let bytes = b"\x89PNG\r\n\x1a\nfake";
        fs::write(&path, bytes).unwrap();

        let image = load_image(&path).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.decode().unwrap(), bytes);
    }

    #[test]
    fn test_unknown_extension_falls_back_to_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.bin");
        fs::write(&path, b"data").unwrap();

        assert_eq!(load_image(&path).unwrap().mime_type, "image/jpeg");
    }

    #[test]
    fn test_missing_file_is_absent() {
        assert!(load_image(Path::new("/nonexistent/photo-12345.jpg")).is_none());
    }
}
