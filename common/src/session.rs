//! 閲覧セッション
//!
//! カタログ・絞り込み・詳細・ギャラリー・ズーム・展示モードの状態を1か所にまとめ、
//! UIイベントごとのハンドラを提供する。UI側はイベントをここへ渡すだけにする。
//!
//! `T` は展示モードのタイマーハンドル（UIツールキットごとに異なる）。

use crate::catalog::Catalog;
use crate::filter::{FilterDimension, FilterOptions, FilterState};
use crate::gallery::{Gallery, ProbeOutcome, ProbeRequest};
use crate::kiosk::{KioskController, KioskStep};
use crate::layout::{CardView, DetailView};
use crate::types::MineralRecord;
use crate::zoom::ZoomState;

/// 展示モード切り替えの結果
#[derive(Debug)]
pub enum KioskToggle<T> {
    /// 開始して先頭を開いた
    Started(ProbeRequest),
    /// 停止した。返したハンドルは破棄する
    Stopped(Option<T>),
    /// 表示対象が空で開始できない
    Refused,
}

/// 開いている詳細
#[derive(Debug, Clone)]
pub struct OpenDetail {
    pub record: MineralRecord,
    pub view: DetailView,
}

#[derive(Debug)]
pub struct CatalogSession<T> {
    catalog: Catalog,
    filter: FilterState,
    options: FilterOptions,
    image_root: String,
    detail: Option<OpenDetail>,
    gallery: Gallery,
    fullscreen: Option<String>,
    zoom: ZoomState,
    kiosk: KioskController<T>,
}

impl<T> CatalogSession<T> {
    pub fn new(records: Vec<MineralRecord>, image_root: impl Into<String>) -> Self {
        let catalog = Catalog::new(records);
        let options = catalog.filter_options();
        Self {
            catalog,
            filter: FilterState::default(),
            options,
            image_root: image_root.into(),
            detail: None,
            gallery: Gallery::default(),
            fullscreen: None,
            zoom: ZoomState::default(),
            kiosk: KioskController::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn image_root(&self) -> &str {
        &self.image_root
    }

    pub fn status_text(&self) -> String {
        self.catalog.status_text()
    }

    /// 絞り込み結果をカードとして（毎回作り直す）
    pub fn cards(&self) -> Vec<CardView> {
        self.catalog
            .filtered()
            .map(|r| CardView::from_record(r, &self.image_root))
            .collect()
    }

    // --- 検索・フィルタ ---

    pub fn set_query(&mut self, query: &str) -> usize {
        self.filter.query = query.to_string();
        self.catalog.refilter(&self.filter)
    }

    pub fn select_filter(&mut self, dimension: FilterDimension, value: &str) -> usize {
        self.filter.select(dimension, value);
        self.catalog.refilter(&self.filter)
    }

    // --- 詳細ビュー ---

    pub fn detail(&self) -> Option<&OpenDetail> {
        self.detail.as_ref()
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// 絞り込み結果の position 番目を開き、ギャラリーのプローブ依頼を返す
    pub fn open_record(&mut self, position: usize) -> Option<ProbeRequest> {
        let record = self.catalog.filtered_get(position)?.clone();
        let request = self.gallery.open(&self.image_root, &record.inventory_id);
        self.detail = Some(OpenDetail {
            view: DetailView::from_record(&record),
            record,
        });
        Some(request)
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
        self.gallery.close();
    }

    pub fn apply_probes(&mut self, generation: u64, outcomes: Vec<ProbeOutcome>) -> bool {
        self.gallery.apply_probes(generation, outcomes)
    }

    pub fn main_image_failed(&mut self, generation: u64) {
        self.gallery.main_image_failed(generation);
    }

    pub fn select_thumbnail(&mut self, position: usize) -> bool {
        self.gallery.select(position)
    }

    // --- 全画面ビューア ---

    pub fn fullscreen(&self) -> Option<&str> {
        self.fullscreen.as_deref()
    }

    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    /// メイン画像の現在のソースで全画面を開き、ズームを初期化
    pub fn open_fullscreen(&mut self) -> Option<&str> {
        if self.detail.is_none() {
            return None;
        }
        self.fullscreen = Some(self.gallery.main_src().to_string());
        self.zoom.reset();
        self.fullscreen.as_deref()
    }

    pub fn close_fullscreen(&mut self) {
        self.fullscreen = None;
        self.zoom.end_drag();
    }

    pub fn zoom_wheel(&mut self, delta_y: f64) -> bool {
        self.fullscreen.is_some() && self.zoom.zoom_wheel(delta_y)
    }

    pub fn begin_drag(&mut self, x: f64, y: f64) {
        if self.fullscreen.is_some() {
            self.zoom.begin_drag(x, y);
        }
    }

    pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
        self.zoom.drag_to(x, y)
    }

    pub fn end_drag(&mut self) {
        self.zoom.end_drag();
    }

    pub fn reset_zoom(&mut self) {
        self.zoom.reset();
    }

    // --- 展示モード ---

    pub fn kiosk(&self) -> &KioskController<T> {
        &self.kiosk
    }

    pub fn kiosk_mut(&mut self) -> &mut KioskController<T> {
        &mut self.kiosk
    }

    /// 展示モードの切り替え。開始時は開いている詳細を閉じてから先頭を開く
    pub fn toggle_kiosk(&mut self, arm: impl FnOnce() -> T) -> KioskToggle<T> {
        if self.kiosk.is_active() {
            let timer = self.kiosk.stop();
            self.close_detail();
            return KioskToggle::Stopped(timer);
        }

        let len = self.catalog.filtered_len();
        if len == 0 {
            return KioskToggle::Refused;
        }
        self.close_detail();
        match self.kiosk.start(len, arm) {
            Some(first) => match self.open_record(first) {
                Some(request) => KioskToggle::Started(request),
                None => KioskToggle::Stopped(self.kiosk.stop()),
            },
            None => KioskToggle::Refused,
        }
    }

    /// タイマー発火。表示位置を返すだけで、開くのはフェード後に `open_record` で行う
    pub fn kiosk_tick(&mut self) -> KioskStep<T> {
        let step = self.kiosk.advance(self.catalog.filtered_len());
        if matches!(step, KioskStep::Stopped(_)) {
            self.close_detail();
        }
        step
    }
}
