use anyhow::{Context, Result};
use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};

use image::ImageReader;
use mineral_catalog_common::layout::DEFAULT_IMAGE_ROOT;
use mineral_catalog_common::{parse_catalog, ImageProbe, MineralRecord};

pub fn load_catalog(path: &Path) -> Result<Vec<MineralRecord>> {
    let content = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let records = parse_catalog(&content).with_context(|| format!("parse {}", path.display()))?;
    Ok(records)
}

/// データセットと同じフォルダの `images/`
pub fn image_root_for(dataset: &Path) -> PathBuf {
    dataset
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(DEFAULT_IMAGE_ROOT)
}

/// 縮小してRGBAで返す。読めなければ None
pub fn decode_rgba(path: &str, max_side: u32) -> Option<([usize; 2], Vec<u8>)> {
    let image = ImageReader::open(path).ok()?.decode().ok()?;
    let thumb = image.thumbnail(max_side, max_side);
    let size = [thumb.width() as usize, thumb.height() as usize];
    Some((size, thumb.to_rgba8().into_raw()))
}

/// 実際にデコードできるかで判定するプローブ
pub struct FileProbe;

impl ImageProbe for FileProbe {
    fn probe(&self, src: String) -> impl Future<Output = bool> {
        async move {
            ImageReader::open(&src)
                .ok()
                .and_then(|r| r.decode().ok())
                .is_some()
        }
    }
}
