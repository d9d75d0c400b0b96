//! 詳細モーダル（ギャラリー付き）

use crate::app::AppState;
use leptos::prelude::*;
use web_sys::MouseEvent;

#[component]
pub fn DetailModal(state: AppState) -> impl IntoView {
    let session = state.session;

    let detail = Memo::new(move |_| session.with(|s| s.detail().map(|d| d.view.clone())));
    let main_src = Memo::new(move |_| session.with(|s| s.gallery().main_src().to_string()));
    let thumbnails = Memo::new(move |_| session.with(|s| s.gallery().thumbnails().to_vec()));
    let active = Memo::new(move |_| session.with(|s| s.gallery().active()));

    let close = move || session.update(|s| s.close_detail());

    // 背景（モーダルの外側）のクリックで閉じる
    let on_backdrop = move |ev: MouseEvent| {
        if ev.target() == ev.current_target() {
            close();
        }
    };

    view! {
        {move || {
            detail
                .get()
                .map(|detail_view| {
                    let fields = detail_view
                        .fields
                        .into_iter()
                        .map(|field| {
                            view! {
                                <div class="detail-item">
                                    <h4>{field.label}</h4>
                                    <p>{field.value}</p>
                                </div>
                            }
                        })
                        .collect_view();

                    view! {
                        <div
                            id="modal"
                            class="modal"
                            style:opacity=move || if state.fading.get() { "0" } else { "1" }
                            on:click=on_backdrop
                        >
                            <div class="modal-content">
                                <span class="modal-close" on:click=move |_| close()>"×"</span>
                                <div class="modal-gallery">
                                    <img
                                        id="modalMainImg"
                                        class="modal-main-img"
                                        src=move || main_src.get()
                                        alt=detail_view.title.clone()
                                        on:error=move |_| {
                                            session.update(|s| {
                                                let generation = s.gallery().generation();
                                                s.main_image_failed(generation);
                                            })
                                        }
                                        on:click=move |_| {
                                            session.update(|s| {
                                                s.open_fullscreen();
                                            })
                                        }
                                    />
                                    <div id="modalThumbs" class="modal-thumbs">
                                        {move || {
                                            let active = active.get();
                                            thumbnails
                                                .get()
                                                .into_iter()
                                                .enumerate()
                                                .map(|(position, thumb)| {
                                                    let is_active = active == Some(position);
                                                    view! {
                                                        <img
                                                            src=thumb.src
                                                            alt=format!("Vista {}", thumb.index)
                                                            class:active=is_active
                                                            on:click=move |_| {
                                                                session.update(|s| {
                                                                    s.select_thumbnail(position);
                                                                })
                                                            }
                                                        />
                                                    }
                                                })
                                                .collect_view()
                                        }}
                                    </div>
                                </div>
                                <div class="modal-info">
                                    <span class="inventory-tag">{detail_view.inventory_id}</span>
                                    <h2>{detail_view.title}</h2>
                                    <p class="formula">{detail_view.formula}</p>
                                    <div class="detail-grid">{fields}</div>
                                    <div class="notes">
                                        <h4>"Notas"</h4>
                                        <p>{detail_view.notes}</p>
                                    </div>
                                </div>
                            </div>
                        </div>
                    }
                })
        }}
    }
}
