//! ブラウザ側の入出力（データセット取得・画像プローブ）

pub mod dataset;
pub mod probe;

pub use dataset::fetch_catalog;
pub use probe::BrowserProbe;
