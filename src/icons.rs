//! アプリ用アイコン生成
//!
//! 元画像をRGBA化し、各サイズへLanczos3で縮小してPNG保存する。
//! 72pxのICOも併せて出力する。

use crate::error::{CatalogError, Result};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// 出力する正方形サイズ
pub const ICON_SIZES: &[u32] = &[72, 96, 128, 144, 152, 192, 384, 512];

/// ICOのサイズ
pub const ICO_SIZE: u32 = 72;

pub fn icon_file_name(size: u32) -> String {
    format!("icon-{}x{}.png", size, size)
}

fn resize(source: &DynamicImage, size: u32) -> DynamicImage {
    source.resize_exact(size, size, FilterType::Lanczos3)
}

/// アイコン一式を生成し、出力したファイルを返す
pub fn generate_icons(source: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
    if !source.exists() {
        return Err(CatalogError::FileNotFound(source.display().to_string()));
    }
    std::fs::create_dir_all(output_dir)?;

    let image = DynamicImage::ImageRgba8(image::open(source)?.to_rgba8());
    tracing::debug!(width = image.width(), height = image.height(), "icon source loaded");

    let progress = ProgressBar::new(ICON_SIZES.len() as u64 + 1);
    progress.set_style(
        ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut generated = ICON_SIZES
        .par_iter()
        .map(|&size| {
            let path = output_dir.join(icon_file_name(size));
            resize(&image, size).save_with_format(&path, ImageFormat::Png)?;
            progress.inc(1);
            Ok(path)
        })
        .collect::<Result<Vec<_>>>()?;

    let ico_path = output_dir.join(format!("icon-{}x{}.ico", ICO_SIZE, ICO_SIZE));
    resize(&image, ICO_SIZE).save_with_format(&ico_path, ImageFormat::Ico)?;
    progress.inc(1);
    progress.finish_and_clear();
    generated.push(ico_path);

    Ok(generated)
}
