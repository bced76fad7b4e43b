//! 生成画像の保存

use crate::error::{ReunifyError, Result};
use image::ImageFormat;
use reunify_common::EncodedImage;
use std::path::{Path, PathBuf};

/// MIMEタイプに対応する拡張子（不明なら "png"）
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    ImageFormat::from_mime_type(mime_type)
        .and_then(|format| format.extensions_str().first().copied())
        .unwrap_or("png")
}

/// 既定の出力ファイル名: reunify-YYYYmmdd-HHMMSS.<ext>
pub fn default_output_path(dir: &Path, mime_type: &str) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    dir.join(format!("reunify-{}.{}", stamp, extension_for_mime(mime_type)))
}

/// Data URLをデコードしてファイルに書き出す
///
/// `output` がNoneならカレントディレクトリに既定名で保存する。
pub fn save_data_url(data_url: &str, output: Option<&Path>) -> Result<PathBuf> {
    let image = EncodedImage::from_data_url(data_url)
        .ok_or_else(|| ReunifyError::ApiParse("生成画像がData URL形式ではありません".into()))?;
    let bytes = image.decode()?;

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => default_output_path(Path::new("."), &image.mime_type),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(&path, &bytes)?;
    log::info!("saved {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}
