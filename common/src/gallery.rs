//! 詳細ビューのギャラリー
//!
//! メイン画像は開いた瞬間に1枚目を表示し、並行して1〜4枚目を試し読み（プローブ）する。
//! 全プローブの完了を待ってから、読めたものだけを番号順にサムネイル化する。
//!
//! 連続して開いた場合に古いプローブ結果が混ざらないよう、`open` ごとに世代番号を進め、
//! 世代の古い結果は捨てる。

use crate::layout::{image_path, DETAIL_PLACEHOLDER, GALLERY_SIZE};
use futures::future::join_all;
use std::future::Future;

/// 画像の存在確認。ツールキットごとに実装する
pub trait ImageProbe {
    /// 読み込めたら true。失敗はエラーにせず false
    fn probe(&self, src: String) -> impl Future<Output = bool>;
}

/// `open` が返すプローブ依頼
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    pub generation: u64,
    /// (番号, パス)。番号昇順
    pub candidates: Vec<(u8, String)>,
}

/// プローブ結果1件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub index: u8,
    pub src: String,
    pub loaded: bool,
}

/// サムネイル1枚
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub index: u8,
    pub src: String,
}

/// 全候補を並行にプローブし、全件の完了を待つ。結果は完了順ではなく番号順
pub async fn probe_gallery<P: ImageProbe>(probe: &P, request: &ProbeRequest) -> Vec<ProbeOutcome> {
    let probes = request.candidates.iter().map(|(index, src)| {
        let index = *index;
        let src = src.clone();
        async move {
            let loaded = probe.probe(src.clone()).await;
            ProbeOutcome { index, src, loaded }
        }
    });
    join_all(probes).await
}

#[derive(Debug, Clone, Default)]
pub struct Gallery {
    generation: u64,
    record_id: Option<String>,
    main_src: String,
    thumbnails: Vec<Thumbnail>,
    active: Option<usize>,
}

impl Gallery {
    /// レコードを開く。メイン画像を1枚目に差し替え、サムネイルを空にしてプローブ依頼を返す
    pub fn open(&mut self, image_root: &str, inventory_id: &str) -> ProbeRequest {
        self.generation += 1;
        self.record_id = Some(inventory_id.to_string());
        self.main_src = image_path(image_root, inventory_id, 1);
        self.thumbnails.clear();
        self.active = None;

        ProbeRequest {
            generation: self.generation,
            candidates: (1..=GALLERY_SIZE)
                .map(|i| (i, image_path(image_root, inventory_id, i)))
                .collect(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }

    pub fn main_src(&self) -> &str {
        &self.main_src
    }

    pub fn thumbnails(&self) -> &[Thumbnail] {
        &self.thumbnails
    }

    /// アクティブなサムネイルの位置
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// メイン画像の読み込み失敗。代替画像に差し替える
    pub fn main_image_failed(&mut self, generation: u64) {
        if self.is_current(generation) {
            self.main_src = DETAIL_PLACEHOLDER.to_string();
        }
    }

    /// プローブ結果を反映。世代が古ければ何もせず false
    ///
    /// 1枚目が読めた場合だけ、それを初期アクティブにする（メイン画像と一致させるため）。
    pub fn apply_probes(&mut self, generation: u64, mut outcomes: Vec<ProbeOutcome>) -> bool {
        if !self.is_current(generation) {
            tracing::debug!(
                stale = generation,
                current = self.generation,
                "discarding stale gallery probes"
            );
            return false;
        }

        outcomes.sort_by_key(|o| o.index);
        self.thumbnails = outcomes
            .into_iter()
            .filter(|o| o.loaded)
            .map(|o| Thumbnail { index: o.index, src: o.src })
            .collect();
        self.active = self.thumbnails.iter().position(|t| t.index == 1);
        true
    }

    /// サムネイル選択。メイン画像を差し替え、そのサムネイルだけをアクティブにする
    pub fn select(&mut self, position: usize) -> bool {
        let Some(thumb) = self.thumbnails.get(position) else {
            return false;
        };
        self.main_src = thumb.src.clone();
        self.active = Some(position);
        true
    }

    pub fn close(&mut self) {
        // 世代は進めたままにして、閉じた後に届いた結果も捨てる
        self.generation += 1;
        self.record_id = None;
        self.main_src.clear();
        self.thumbnails.clear();
        self.active = None;
    }
}
