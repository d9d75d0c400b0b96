//! メインアプリケーションコンポーネント

use crate::api::{fetch_catalog, BrowserProbe};
use crate::components::{
    detail_modal::DetailModal,
    filter_bar::FilterBar,
    footer::Footer,
    fullscreen_viewer::FullscreenViewer,
    header::Header,
    mineral_grid::MineralGrid,
};
use gloo::timers::callback::{Interval, Timeout};
use leptos::prelude::*;
use leptos::task::spawn_local;
use mineral_catalog_common::layout::DEFAULT_IMAGE_ROOT;
use mineral_catalog_common::{
    probe_gallery, CatalogSession, KioskStep, KioskToggle, ProbeRequest, DATASET_FILE,
    KIOSK_FADE_MS, KIOSK_INTERVAL_MS,
};

/// 閲覧セッション（展示モードのタイマーは gloo の Interval）
pub type Session = RwSignal<CatalogSession<Interval>, LocalStorage>;

/// データセットの読み込み状態
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed,
}

/// アプリケーションの状態
///
/// 中身はすべてシグナルのハンドルなので Copy でコンポーネントへ渡せる。
#[derive(Clone, Copy)]
pub struct AppState {
    pub session: Session,
    pub load_state: RwSignal<LoadState>,
    /// 展示モードの切り替え中（詳細をフェードアウト）
    pub fading: RwSignal<bool>,
    fade: StoredValue<Option<Timeout>, LocalStorage>,
}

impl AppState {
    fn new() -> Self {
        Self {
            session: RwSignal::new_local(CatalogSession::new(Vec::new(), DEFAULT_IMAGE_ROOT)),
            load_state: RwSignal::new(LoadState::Loading),
            fading: RwSignal::new(false),
            fade: StoredValue::new_local(None),
        }
    }

    /// 読み込み失敗時は操作系を無効のままにする
    pub fn is_ready(&self) -> bool {
        self.load_state.get() == LoadState::Ready
    }

    /// 絞り込み結果の position 番目を詳細に開き、ギャラリーをプローブする
    pub fn open_record(self, position: usize) {
        if let Some(request) = self.session.try_update(|s| s.open_record(position)).flatten() {
            self.spawn_probes(request);
        }
    }

    fn spawn_probes(self, request: ProbeRequest) {
        spawn_local(async move {
            let outcomes = probe_gallery(&BrowserProbe, &request).await;
            self.session
                .maybe_update(|s| s.apply_probes(request.generation, outcomes));
        });
    }

    pub fn toggle_kiosk(self) {
        let toggle = self.session.try_update(|s| {
            s.toggle_kiosk(|| Interval::new(KIOSK_INTERVAL_MS, move || self.kiosk_tick()))
        });

        match toggle {
            Some(KioskToggle::Started(request)) => self.spawn_probes(request),
            Some(KioskToggle::Stopped(timer)) => {
                self.cancel_fade();
                drop(timer);
            }
            Some(KioskToggle::Refused) | None => {}
        }
    }

    fn kiosk_tick(self) {
        match self.session.try_update(|s| s.kiosk_tick()) {
            Some(KioskStep::Show(position)) => {
                self.fading.set(true);
                let timeout = Timeout::new(KIOSK_FADE_MS, move || {
                    self.fading.set(false);
                    // フェード中に停止された場合は開かない
                    if self.session.with_untracked(|s| s.kiosk().is_active()) {
                        self.open_record(position);
                    }
                });
                self.fade.set_value(Some(timeout));
            }
            Some(KioskStep::Stopped(timer)) => {
                self.cancel_fade();
                // 発火中の Interval を自身のコールバック内で破棄しない
                spawn_local(async move { drop(timer) });
            }
            Some(KioskStep::Idle) | None => {}
        }
    }

    fn cancel_fade(self) {
        self.fade.set_value(None);
        self.fading.set(false);
    }

    /// アンマウント時にタイマーを解放
    fn shutdown(self) {
        self.fade.set_value(None);
        if let Some(timer) = self.session.try_update(|s| s.kiosk_mut().stop()).flatten() {
            drop(timer);
        }
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();

    spawn_local(async move {
        match fetch_catalog(DATASET_FILE).await {
            Ok(records) => {
                state
                    .session
                    .set(CatalogSession::new(records, DEFAULT_IMAGE_ROOT));
                state.load_state.set(LoadState::Ready);
            }
            Err(e) => {
                web_sys::console::error_1(&format!("Error cargando los datos: {}", e).into());
                state.load_state.set(LoadState::Failed);
            }
        }
    });

    // body に kiosk クラス（展示用のスタイル切り替え）
    Effect::new(move |_| {
        let active = state.session.with(|s| s.kiosk().is_active());
        if let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) {
            let _ = body.class_list().toggle_with_force("kiosk", active);
        }
    });

    on_cleanup(move || state.shutdown());

    view! {
        <Header state=state />
        <FilterBar state=state />
        <MineralGrid state=state />
        <DetailModal state=state />
        <FullscreenViewer state=state />
        <Footer />
    }
}
