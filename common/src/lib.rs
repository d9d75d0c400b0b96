//! Mineral Catalog Common Library
//!
//! Web(WASM)・デスクトップ・CLIで共有される型と閲覧ロジック。
//! UIツールキットには依存しない。

pub mod types;
pub mod error;
pub mod catalog;
pub mod filter;
pub mod layout;
pub mod gallery;
pub mod zoom;
pub mod kiosk;
pub mod session;
pub mod stats;

pub use types::MineralRecord;
pub use error::{Error, LoadError, Result};
#[cfg(not(target_arch = "wasm32"))]
pub use catalog::load_catalog_file;
pub use catalog::{parse_catalog, status_text, Catalog, DATASET_FILE, LOAD_ERROR_STATUS};
pub use filter::{apply_filters, derive_filter_options, FilterDimension, FilterOptions, FilterState};
pub use layout::{CardView, DetailField, DetailView};
pub use gallery::{probe_gallery, Gallery, ImageProbe, ProbeOutcome, ProbeRequest, Thumbnail};
pub use zoom::{ZoomDirection, ZoomState};
pub use kiosk::{KioskController, KioskStep, KIOSK_FADE_MS, KIOSK_INTERVAL_MS};
pub use session::{CatalogSession, KioskToggle, OpenDetail};
