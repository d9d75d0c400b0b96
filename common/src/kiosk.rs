//! 展示（キオスク）モード
//!
//! Idle → Active → Idle の状態機械。タイマーそのものは各UIが用意し、
//! ハンドルの所有権をこのコントローラに預ける。停止経路（明示停止・空集合検出）
//! では必ずハンドルを手放すので、停止後にタイマーが残ることはない。
//!
//! 手動操作での一時停止はしない。

/// 1件あたりの表示間隔
pub const KIOSK_INTERVAL_MS: u32 = 8000;
/// 切り替え時のフェード時間
pub const KIOSK_FADE_MS: u32 = 400;

pub const KIOSK_LABEL_IDLE: &str = "Modo Exposición";
pub const KIOSK_LABEL_ACTIVE: &str = "Salir Modo Exposición";

/// 1回の進行の結果
#[derive(Debug)]
pub enum KioskStep<T> {
    /// 絞り込み結果のこの位置を表示する
    Show(usize),
    /// 表示対象が空になったので停止した。返したハンドルは呼び出し側で破棄する
    Stopped(Option<T>),
    /// すでに停止中
    Idle,
}

#[derive(Debug)]
pub struct KioskController<T> {
    active: bool,
    index: usize,
    timer: Option<T>,
}

impl<T> Default for KioskController<T> {
    fn default() -> Self {
        Self {
            active: false,
            index: 0,
            timer: None,
        }
    }
}

impl<T> KioskController<T> {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// 次に表示する位置
    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn label(&self) -> &'static str {
        if self.active {
            KIOSK_LABEL_ACTIVE
        } else {
            KIOSK_LABEL_IDLE
        }
    }

    pub fn timer_mut(&mut self) -> Option<&mut T> {
        self.timer.as_mut()
    }

    /// 開始。表示対象が空なら何もしない
    ///
    /// 成功すると先頭（位置0）を即表示すべき位置として返し、`arm` で作った
    /// 繰り返しタイマーを保持する。
    pub fn start(&mut self, filtered_len: usize, arm: impl FnOnce() -> T) -> Option<usize> {
        if self.active || filtered_len == 0 {
            return None;
        }
        self.active = true;
        self.index = 0;
        let first = self.next_position(filtered_len);
        self.timer = Some(arm());
        tracing::debug!(filtered_len, "kiosk started");
        Some(first)
    }

    /// 明示停止。保持していたタイマーを返す（破棄でキャンセル）
    pub fn stop(&mut self) -> Option<T> {
        if self.active {
            tracing::debug!("kiosk stopped");
        }
        self.active = false;
        self.index = 0;
        self.timer.take()
    }

    /// タイマー発火時の進行。空集合なら強制的に Idle へ
    pub fn advance(&mut self, filtered_len: usize) -> KioskStep<T> {
        if !self.active {
            return KioskStep::Idle;
        }
        if filtered_len == 0 {
            tracing::debug!("kiosk stopped: nothing left to show");
            return KioskStep::Stopped(self.stop());
        }
        KioskStep::Show(self.next_position(filtered_len))
    }

    /// 現在位置を返して1つ進める（末尾で先頭に戻る）
    fn next_position(&mut self, len: usize) -> usize {
        // 実行中に件数が減っていても範囲内に収める
        let position = self.index % len;
        self.index = (position + 1) % len;
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// 破棄を記録するタイマー
    struct FakeTimer {
        dropped: Rc<Cell<bool>>,
    }

    impl Drop for FakeTimer {
        fn drop(&mut self) {
            self.dropped.set(true);
        }
    }

    fn armed(flag: &Rc<Cell<bool>>) -> impl FnOnce() -> FakeTimer {
        let dropped = flag.clone();
        move || FakeTimer { dropped }
    }

    #[test]
    fn test_start_requires_records() {
        let mut kiosk: KioskController<()> = KioskController::default();
        assert_eq!(kiosk.start(0, || ()), None);
        assert!(!kiosk.is_active());
        assert_eq!(kiosk.label(), KIOSK_LABEL_IDLE);
    }

    #[test]
    fn test_rotation_wraps_in_order() {
        let mut kiosk: KioskController<()> = KioskController::default();
        let mut shown = vec![kiosk.start(3, || ()).unwrap()];
        for _ in 0..5 {
            match kiosk.advance(3) {
                KioskStep::Show(i) => shown.push(i),
                other => panic!("unexpected step: {:?}", other),
            }
        }
        assert_eq!(shown, vec![0, 1, 2, 0, 1, 2]);
        assert_eq!(kiosk.label(), KIOSK_LABEL_ACTIVE);
    }

    #[test]
    fn test_explicit_stop_releases_timer() {
        let dropped = Rc::new(Cell::new(false));
        let mut kiosk = KioskController::default();
        kiosk.start(2, armed(&dropped));
        assert!(kiosk.timer_mut().is_some());

        drop(kiosk.stop());
        assert!(dropped.get());
        assert!(!kiosk.is_active());
        assert!(matches!(kiosk.advance(2), KioskStep::Idle));
    }

    #[test]
    fn test_empty_set_forces_idle() {
        let dropped = Rc::new(Cell::new(false));
        let mut kiosk = KioskController::default();
        kiosk.start(2, armed(&dropped));

        match kiosk.advance(0) {
            KioskStep::Stopped(timer) => {
                assert!(timer.is_some());
                drop(timer);
            }
            _ => panic!("expected Stopped"),
        }
        assert!(dropped.get());
        assert!(!kiosk.is_active());
        assert!(kiosk.timer_mut().is_none());
    }

    #[test]
    fn test_shrinking_set_stays_in_range() {
        let mut kiosk: KioskController<()> = KioskController::default();
        kiosk.start(5, || ());
        kiosk.advance(5);
        kiosk.advance(5);
        // 次は位置3だが件数が2に減った
        match kiosk.advance(2) {
            KioskStep::Show(i) => assert!(i < 2),
            _ => panic!("expected Show"),
        }
    }

    #[test]
    fn test_restart_begins_at_first() {
        let mut kiosk: KioskController<()> = KioskController::default();
        kiosk.start(3, || ());
        kiosk.advance(3);
        kiosk.stop();
        assert_eq!(kiosk.start(3, || ()), Some(0));
    }
}
