//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Load error: {0}")]
    Load(#[from] LoadError),
}

/// カタログ読み込み失敗（通信・パース）
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("dataset unavailable: {0}")]
    Unavailable(String),

    #[error("dataset is not a record array: {0}")]
    Parse(#[from] serde_json::Error),
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
    fn test_error_display_load_unavailable() {
        let error = Error::Load(LoadError::Unavailable("HTTP 404".to_string()));
        assert_eq!(
            format!("{}", error),
            "Load error: dataset unavailable: HTTP 404"
        );
    }

    #[test]
    fn test_load_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: LoadError = json_error.into();
        assert!(matches!(error, LoadError::Parse(_)));
        assert!(format!("{}", error).contains("not a record array"));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }
}
