//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// 送信前の入力チェック失敗（ネットワークには到達しない）
    #[error("{0}")]
    Validation(String),

    /// 生成サービス側の失敗（メッセージはそのまま画面に出す）
    #[error("{0}")]
    Generation(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_generation_message_is_verbatim() {
        // 画面にはサービスのメッセージをそのまま表示する
        let error = Error::Generation("quota exceeded".to_string());
        assert_eq!(error.to_string(), "quota exceeded");
    }

    #[test]
    fn test_validation_message_is_verbatim() {
        let error = Error::Validation("Please upload both photos and provide a prompt.".to_string());
        assert_eq!(error.to_string(), "Please upload both photos and provide a prompt.");
    }

    #[test]
    fn test_error_from_base64() {
        use base64::Engine;
        let decode_error = base64::engine::general_purpose::STANDARD
            .decode("###")
            .unwrap_err();
        let error: Error = decode_error.into();
        assert!(matches!(error, Error::Base64(_)));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Config("テスト".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Config"));
        assert!(debug.contains("テスト"));
    }
}
