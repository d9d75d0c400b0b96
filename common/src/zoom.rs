//! 全画面ビューアのズーム・パン
//!
//! 表示は (scale, offset_x, offset_y) だけで決まる（translate → scale の順）。

/// ズームイン1回の倍率
pub const ZOOM_IN_STEP: f64 = 1.1;
/// ズームアウト1回の倍率
pub const ZOOM_OUT_STEP: f64 = 0.9;
pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// ホイールの deltaY から方向を決める（正ならズームアウト）
    pub fn from_wheel(delta_y: f64) -> Self {
        if delta_y > 0.0 {
            ZoomDirection::Out
        } else {
            ZoomDirection::In
        }
    }

    fn factor(self) -> f64 {
        match self {
            ZoomDirection::In => ZOOM_IN_STEP,
            ZoomDirection::Out => ZOOM_OUT_STEP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    drag_anchor: Option<(f64, f64)>,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            drag_anchor: None,
        }
    }
}

impl ZoomState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// 1段階ズーム。範囲外になる入力は丸めずに無視し false を返す
    pub fn zoom(&mut self, direction: ZoomDirection) -> bool {
        let candidate = self.scale * direction.factor();
        if !(MIN_SCALE..=MAX_SCALE).contains(&candidate) {
            return false;
        }
        self.scale = candidate;
        true
    }

    pub fn zoom_wheel(&mut self, delta_y: f64) -> bool {
        self.zoom(ZoomDirection::from_wheel(delta_y))
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// 押下開始。現在のオフセットを基準にアンカーを記録する
    pub fn begin_drag(&mut self, pointer_x: f64, pointer_y: f64) {
        self.drag_anchor = Some((pointer_x - self.offset_x, pointer_y - self.offset_y));
    }

    /// ドラッグ中のみオフセットを更新。移動量の制限なし
    pub fn drag_to(&mut self, pointer_x: f64, pointer_y: f64) -> bool {
        let Some((anchor_x, anchor_y)) = self.drag_anchor else {
            return false;
        };
        self.offset_x = pointer_x - anchor_x;
        self.offset_y = pointer_y - anchor_y;
        true
    }

    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    /// CSS transform 文字列
    pub fn css_transform(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.offset_x, self.offset_y, self.scale
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_zoom_sequence() {
        let mut zoom = ZoomState::default();
        for _ in 0..3 {
            assert!(zoom.zoom(ZoomDirection::In));
        }
        assert!(approx(zoom.scale, 1.331));

        assert!(zoom.zoom(ZoomDirection::Out));
        assert!(approx(zoom.scale, 1.1979));
    }

    #[test]
    fn test_zoom_never_leaves_range() {
        let mut zoom = ZoomState::default();
        for _ in 0..200 {
            zoom.zoom(ZoomDirection::In);
            assert!(zoom.scale <= MAX_SCALE);
        }
        // 10を超える直前で止まる（丸めて10にはしない）
        assert!(zoom.scale > MAX_SCALE / ZOOM_IN_STEP);

        for _ in 0..200 {
            zoom.zoom(ZoomDirection::Out);
            assert!(zoom.scale >= MIN_SCALE);
        }
        assert!(zoom.scale < MIN_SCALE / ZOOM_OUT_STEP);
    }

    #[test]
    fn test_out_of_range_input_is_ignored() {
        let mut zoom = ZoomState { scale: 0.52, ..Default::default() };
        assert!(!zoom.zoom(ZoomDirection::Out));
        assert!(approx(zoom.scale, 0.52));
    }

    #[test]
    fn test_wheel_direction() {
        let mut zoom = ZoomState::default();
        zoom.zoom_wheel(120.0);
        assert!(approx(zoom.scale, 0.9));
        zoom.zoom_wheel(-120.0);
        assert!(approx(zoom.scale, 0.99));
    }

    #[test]
    fn test_pan_is_relative() {
        let mut zoom = ZoomState::default();
        zoom.begin_drag(100.0, 100.0);
        zoom.drag_to(130.0, 90.0);
        zoom.end_drag();
        assert_eq!((zoom.offset_x, zoom.offset_y), (30.0, -10.0));

        // 2回目のドラッグは現在位置から続く
        zoom.begin_drag(500.0, 500.0);
        zoom.drag_to(510.0, 520.0);
        assert_eq!((zoom.offset_x, zoom.offset_y), (40.0, 10.0));
    }

    #[test]
    fn test_move_without_press_does_nothing() {
        let mut zoom = ZoomState::default();
        assert!(!zoom.drag_to(50.0, 50.0));
        assert_eq!((zoom.offset_x, zoom.offset_y), (0.0, 0.0));
        assert!(!zoom.is_dragging());
    }

    #[test]
    fn test_reset_always_identity() {
        let mut zoom = ZoomState::default();
        zoom.zoom(ZoomDirection::In);
        zoom.begin_drag(0.0, 0.0);
        zoom.drag_to(-300.0, 4000.0);
        zoom.reset();
        assert_eq!(zoom, ZoomState::default());
        assert_eq!(zoom.css_transform(), "translate(0px, 0px) scale(1)");
    }

    #[test]
    fn test_css_transform() {
        let zoom = ZoomState { scale: 1.5, offset_x: 12.0, offset_y: -4.5, ..Default::default() };
        assert_eq!(zoom.css_transform(), "translate(12px, -4.5px) scale(1.5)");
    }
}
