//! 画像エンコーダ
//!
//! 生バイト列 / Data URL から EncodedImage を作る。
//! サイズや形式のチェックはしない（ファイル選択とAPI側に任せる）。

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::Result;
use crate::types::EncodedImage;

/// MIMEタイプが取れないときの既定値
pub const FALLBACK_MIME_TYPE: &str = "image/jpeg";

/// Data URLからBase64データ部分を抽出
///
/// # Arguments
/// * `data_url` - "data:image/jpeg;base64,/9j/4AAQ..." 形式のData URL
///
/// # Returns
/// Base64エンコードされたデータ部分、または抽出失敗時はNone
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    data_url.split_once(',').map(|(_, data)| data)
}

/// Data URLからMIMEタイプを抽出
///
/// ヘッダ部の `:` と `;` の間を取り出す。取れなければ "image/jpeg"。
pub fn extract_mime_type_from_data_url(data_url: &str) -> &str {
    let header = data_url.split_once(',').map_or(data_url, |(h, _)| h);
    header
        .split_once(':')
        .and_then(|(_, rest)| rest.split_once(';'))
        .map(|(mime, _)| mime.trim())
        .filter(|mime| !mime.is_empty())
        .unwrap_or(FALLBACK_MIME_TYPE)
}

/// MIMEタイプとBase64データからData URLを組み立てる
pub fn to_data_url(mime_type: &str, base64_data: &str) -> String {
    format!("data:{};base64,{}", mime_type, base64_data)
}

impl EncodedImage {
    /// ファイルのバイト列から作成
    ///
    /// `declared_mime` が空かNoneなら "image/jpeg" とみなす。
    pub fn from_bytes(bytes: &[u8], declared_mime: Option<&str>) -> Self {
        let mime_type = declared_mime
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(FALLBACK_MIME_TYPE)
            .to_string();
        let base64_data = STANDARD.encode(bytes);
        let preview_url = to_data_url(&mime_type, &base64_data);

        Self {
            base64_data,
            mime_type,
            preview_url,
        }
    }

    /// FileReader.readAsDataURL の結果から作成
    ///
    /// カンマが無い文字列は画像なし（None）として扱う。
    pub fn from_data_url(data_url: &str) -> Option<Self> {
        let base64_data = extract_base64_from_data_url(data_url)?;
        let mime_type = extract_mime_type_from_data_url(data_url);

        Some(Self {
            base64_data: base64_data.to_string(),
            mime_type: mime_type.to_string(),
            preview_url: data_url.to_string(),
        })
    }

    /// Base64を元のバイト列に戻す
    pub fn decode(&self) -> Result<Vec<u8>> {
        Ok(STANDARD.decode(self.base64_data.as_bytes())?)
    }

    /// デコード後のおおよそのバイト数
    pub fn approx_size(&self) -> usize {
        self.base64_data.len() / 4 * 3
    }
}
