//! カードグリッドコンポーネント
//!
//! 絞り込みが変わるたびにカード一覧を丸ごと作り直す（差分更新はしない）。

use crate::app::AppState;
use leptos::prelude::*;
use mineral_catalog_common::layout::CARD_PLACEHOLDER;
use mineral_catalog_common::CardView;
use web_sys::HtmlImageElement;

#[component]
pub fn MineralGrid(state: AppState) -> impl IntoView {
    let cards = Memo::new(move |_| state.session.with(|s| s.cards()));

    view! {
        <main class="grid" id="grid">
            {move || {
                cards
                    .get()
                    .into_iter()
                    .enumerate()
                    .map(|(position, card)| {
                        view! { <MineralCard card=card position=position state=state /> }
                    })
                    .collect_view()
            }}
        </main>
    }
}

#[component]
fn MineralCard(card: CardView, position: usize, state: AppState) -> impl IntoView {
    view! {
        <div class="mineral-card" on:click=move |_| state.open_record(position)>
            <span class="inventory-tag">{card.inventory_tag}</span>
            <img
                class="card-image"
                src=card.cover_src
                alt=card.name.clone()
                on:error=move |ev| {
                    // 表紙が読めなければ代替画像へ（代替画像自体の失敗では繰り返さない）
                    let img: HtmlImageElement = event_target(&ev);
                    if img.src() != CARD_PLACEHOLDER {
                        img.set_src(CARD_PLACEHOLDER);
                    }
                }
            />
            <div class="card-info">
                <h3>{card.name}</h3>
                <span class="formula">{card.formula}</span>
                <div class="card-meta">
                    <span><strong>"Origen: "</strong>{card.origin}</span>
                    <span><strong>"Clase: "</strong>{card.class}</span>
                </div>
            </div>
        </div>
    }
}
