//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use mineral_catalog::error::CatalogError;
use mineral_catalog::{convert, scanner};
use std::path::Path;
use tempfile::tempdir;

/// 存在しない画像ルートを点検した場合
#[test]
fn test_check_nonexistent_image_root() {
    let result = scanner::audit_images(&[], Path::new("/nonexistent/path/12345"));
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, CatalogError::FolderNotFound(_)));
}

/// 空の画像ルートはエラーではなく空の結果
#[test]
fn test_check_empty_image_root() {
    let dir = tempdir().expect("Failed to create temp dir");
    let audit = scanner::audit_images(&[], dir.path()).unwrap();

    assert!(audit.records.is_empty());
    assert!(audit.orphan_folders.is_empty());
}

/// Excelでないファイルを変換しようとした場合
#[test]
fn test_convert_not_a_workbook() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("inventario.txt");
    std::fs::write(&input, "hola").unwrap();

    let result = convert::read_workbook(&input);
    assert!(matches!(result, Err(CatalogError::Workbook(_))));
}

/// CatalogErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        CatalogError::Config("error de prueba".to_string()),
        CatalogError::FileNotFound("catalogo.json".to_string()),
        CatalogError::FolderNotFound("/path/to/images".to_string()),
        CatalogError::Workbook("hoja vacía".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: CatalogError = io_err.into();

    assert!(matches!(err, CatalogError::Io(_)));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: CatalogError = json_err.into();

    assert!(matches!(err, CatalogError::JsonParse(_)));
}

/// common::Errorからの変換
#[test]
fn test_common_error_conversion() {
    let load_err = mineral_catalog_common::LoadError::Unavailable("404".to_string());
    let err: CatalogError = mineral_catalog_common::Error::Load(load_err).into();

    assert!(matches!(err, CatalogError::Catalog(_)));
    assert!(format!("{}", err).contains("404"));
}

/// 配列でないデータセット
#[test]
fn test_load_catalog_not_array() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("catalogo_minerales.json");
    std::fs::write(&path, r#"{"Mineral": "Cuarzo"}"#).unwrap();

    let err: CatalogError = mineral_catalog_common::load_catalog_file(&path)
        .unwrap_err()
        .into();
    assert!(matches!(err, CatalogError::Catalog(_)));
}
