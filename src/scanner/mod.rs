//! 画像フォルダの点検
//!
//! `{画像ルート}/{在庫番号}/{1..4}.jpg` の命名規則に沿って、
//! レコードごとの画像枚数と、どのレコードにも対応しないフォルダを調べる。

use crate::error::{CatalogError, Result};
use mineral_catalog_common::layout::GALLERY_SIZE;
use mineral_catalog_common::MineralRecord;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// レコード1件分の画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordImages {
    pub inventory_id: String,
    /// 存在した番号（昇順）
    pub present: Vec<u8>,
}

impl RecordImages {
    pub fn has_cover(&self) -> bool {
        self.present.first() == Some(&1)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImageAudit {
    pub records: Vec<RecordImages>,
    /// どのレコードにも対応しないフォルダ
    pub orphan_folders: Vec<PathBuf>,
}

impl ImageAudit {
    /// 表紙（1枚目）がないレコード
    pub fn missing_cover(&self) -> impl Iterator<Item = &RecordImages> {
        self.records.iter().filter(|r| !r.has_cover())
    }

    /// 画像枚数ごとのレコード数
    pub fn gallery_sizes(&self) -> BTreeMap<usize, usize> {
        let mut sizes = BTreeMap::new();
        for record in &self.records {
            *sizes.entry(record.present.len()).or_default() += 1;
        }
        sizes
    }
}

/// ギャラリー候補のうち存在する番号
fn present_indices(folder: &Path) -> Vec<u8> {
    (1..=GALLERY_SIZE)
        .filter(|i| folder.join(format!("{}.jpg", i)).is_file())
        .collect()
}

pub fn audit_images(records: &[MineralRecord], image_root: &Path) -> Result<ImageAudit> {
    if !image_root.is_dir() {
        return Err(CatalogError::FolderNotFound(image_root.display().to_string()));
    }

    let audited = records
        .iter()
        .filter(|r| !r.inventory_id.is_empty())
        .map(|r| RecordImages {
            inventory_id: r.inventory_id.clone(),
            present: present_indices(&image_root.join(&r.inventory_id)),
        })
        .collect();

    let known: HashSet<&str> = records.iter().map(|r| r.inventory_id.as_str()).collect();
    let mut orphan_folders: Vec<PathBuf> = WalkDir::new(image_root)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
        .filter(|e| {
            let name = e.file_name().to_string_lossy();
            !known.contains(name.as_ref())
        })
        .map(|e| e.path().to_path_buf())
        .collect();
    orphan_folders.sort();

    Ok(ImageAudit {
        records: audited,
        orphan_folders,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn record(id: &str) -> MineralRecord {
        MineralRecord {
            inventory_id: id.to_string(),
            name: id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_audit_missing_root() {
        let result = audit_images(&[], Path::new("/nonexistent/images"));
        assert!(matches!(result, Err(CatalogError::FolderNotFound(_))));
    }

    #[test]
    fn test_audit_counts_images() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("A1")).unwrap();
        fs::write(root.join("A1").join("1.jpg"), b"x").unwrap();
        fs::write(root.join("A1").join("3.jpg"), b"x").unwrap();
        fs::write(root.join("A1").join("5.jpg"), b"x").unwrap();
        fs::create_dir_all(root.join("A2")).unwrap();
        fs::write(root.join("A2").join("2.jpg"), b"x").unwrap();
        fs::create_dir_all(root.join("ZZ")).unwrap();

        let audit = audit_images(&[record("A1"), record("A2"), record("A3")], root).unwrap();

        assert_eq!(audit.records[0].present, vec![1, 3]);
        let missing: Vec<_> = audit.missing_cover().map(|r| r.inventory_id.as_str()).collect();
        assert_eq!(missing, vec!["A2", "A3"]);
        assert_eq!(audit.orphan_folders, vec![root.join("ZZ")]);

        let sizes = audit.gallery_sizes();
        assert_eq!(sizes.get(&0), Some(&1));
        assert_eq!(sizes.get(&1), Some(&1));
        assert_eq!(sizes.get(&2), Some(&1));
    }
}
