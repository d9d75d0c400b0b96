use std::path::PathBuf;
use std::time::{Duration, Instant};

use eframe::egui;
use mineral_catalog_common::{
    CatalogSession, KioskStep, KioskToggle, ProbeOutcome, ProbeRequest, KIOSK_FADE_MS,
    KIOSK_INTERVAL_MS,
};

pub fn kiosk_interval() -> Duration {
    Duration::from_millis(u64::from(KIOSK_INTERVAL_MS))
}

pub fn kiosk_fade() -> Duration {
    Duration::from_millis(u64::from(KIOSK_FADE_MS))
}

/// 展示モードのタイマー。フレームループから期限を確認する
#[derive(Debug, Clone, Copy)]
pub struct KioskClock {
    pub next_tick: Instant,
}

impl KioskClock {
    pub fn armed(now: Instant) -> Self {
        Self { next_tick: now + kiosk_interval() }
    }

    /// 期限を過ぎていれば次の期限を設定して true
    pub fn fire(&mut self, now: Instant) -> bool {
        if now < self.next_tick {
            return false;
        }
        self.next_tick = now + kiosk_interval();
        true
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.next_tick.saturating_duration_since(now)
    }
}

/// フェード後に開く予定の位置
#[derive(Debug, Clone, Copy)]
pub struct PendingOpen {
    pub position: usize,
    pub at: Instant,
}

/// 展示モードを1フレーム進めた結果
#[derive(Debug, Default)]
pub struct KioskAdvance {
    /// フェード後に開いた詳細のギャラリー確認依頼
    pub opened: Option<ProbeRequest>,
    /// 次に確認するまでの待ち時間
    pub wake_in: Option<Duration>,
}

impl KioskAdvance {
    fn wake_within(&mut self, wait: Duration) {
        self.wake_in = Some(self.wake_in.map_or(wait, |w| w.min(wait)));
    }
}

/// 画像のデコードサイズ（カード用と詳細・全画面用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSize {
    Card,
    Full,
}

impl ImageSize {
    pub fn max_side(self) -> u32 {
        match self {
            ImageSize::Card => 320,
            ImageSize::Full => 1600,
        }
    }
}

pub enum TextureSlot {
    Loading,
    Ready(egui::TextureHandle),
    Failed,
}

/// デコードスレッドからの結果
pub struct DecodedImage {
    pub path: String,
    pub size: ImageSize,
    pub pixels: Option<([usize; 2], Vec<u8>)>,
}

/// ギャラリープローブの結果
pub struct GalleryProbed {
    pub generation: u64,
    pub outcomes: Vec<ProbeOutcome>,
}

pub struct AppState {
    pub session: CatalogSession<KioskClock>,
    pub source_path: Option<PathBuf>,
    /// 読み込み失敗。失敗時は操作系を無効にする
    pub load_error: Option<String>,
    pub pending_open: Option<PendingOpen>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            session: CatalogSession::new(Vec::new(), ""),
            source_path: None,
            load_error: None,
            pending_open: None,
        }
    }
}

impl AppState {
    pub fn is_ready(&self) -> bool {
        self.source_path.is_some() && self.load_error.is_none()
    }

    /// フェード中（詳細を薄くする）
    pub fn is_fading(&self) -> bool {
        self.pending_open.is_some()
    }

    /// 展示モードの切り替え。停止時はフェード待ちも捨てる
    pub fn toggle_kiosk(&mut self, now: Instant) -> Option<ProbeRequest> {
        match self.session.toggle_kiosk(|| KioskClock::armed(now)) {
            KioskToggle::Started(request) => Some(request),
            KioskToggle::Stopped(_) => {
                self.pending_open = None;
                None
            }
            KioskToggle::Refused => None,
        }
    }

    /// 期限を確認して展示モードを進める
    pub fn advance_kiosk(&mut self, now: Instant) -> KioskAdvance {
        let mut advance = KioskAdvance::default();

        if let Some(pending) = self.pending_open {
            if now >= pending.at {
                self.pending_open = None;
                // フェード中に停止された場合は開かない
                if self.session.kiosk().is_active() {
                    advance.opened = self.session.open_record(pending.position);
                }
            } else {
                advance.wake_within(pending.at - now);
            }
        }

        let fired = match self.session.kiosk_mut().timer_mut() {
            Some(clock) => {
                let fired = clock.fire(now);
                advance.wake_within(clock.remaining(now));
                fired
            }
            None => false,
        };
        if !fired {
            return advance;
        }

        match self.session.kiosk_tick() {
            KioskStep::Show(position) => {
                self.pending_open = Some(PendingOpen {
                    position,
                    at: now + kiosk_fade(),
                });
                advance.wake_within(Duration::ZERO);
            }
            KioskStep::Stopped(_) => self.pending_open = None,
            KioskStep::Idle => {}
        }
        advance
    }
}
