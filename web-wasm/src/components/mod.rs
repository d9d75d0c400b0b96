//! UIコンポーネント

pub mod detail_modal;
pub mod filter_bar;
pub mod footer;
pub mod fullscreen_viewer;
pub mod header;
pub mod kiosk_button;
pub mod mineral_grid;
