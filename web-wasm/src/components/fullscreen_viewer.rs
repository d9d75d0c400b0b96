//! 全画面ビューア（ホイールで拡大縮小、ドラッグで移動、ダブルクリックで初期化）

use crate::app::AppState;
use gloo::events::{EventListener, EventListenerOptions};
use leptos::ev;
use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{MouseEvent, WheelEvent};

#[component]
pub fn FullscreenViewer(state: AppState) -> impl IntoView {
    let session = state.session;

    let src = Memo::new(move |_| session.with(|s| s.fullscreen().map(str::to_string)));
    let transform = Memo::new(move |_| session.with(|s| s.zoom().css_transform()));
    let dragging = Memo::new(move |_| session.with(|s| s.zoom().is_dragging()));

    // ホイールはページのスクロールを止めるため passive: false で登録する
    let overlay = NodeRef::<Div>::new();
    let wheel_listener = StoredValue::new_local(None::<EventListener>);
    Effect::new(move |_| {
        let listener = overlay.get().map(|el| {
            EventListener::new_with_options(
                &el,
                "wheel",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                        return;
                    };
                    wheel.prevent_default();
                    session.maybe_update(|s| s.zoom_wheel(wheel.delta_y()));
                },
            )
        });
        wheel_listener.set_value(listener);
    });

    // ドラッグは画像の外へ出ても追う
    let move_handle = window_event_listener(ev::mousemove, move |ev| {
        session.maybe_update(|s| s.drag_to(ev.client_x() as f64, ev.client_y() as f64));
    });
    let up_handle = window_event_listener(ev::mouseup, move |_| {
        if session.with_untracked(|s| s.zoom().is_dragging()) {
            session.update(|s| s.end_drag());
        }
    });
    on_cleanup(move || {
        move_handle.remove();
        up_handle.remove();
    });

    view! {
        <div
            id="fullscreen"
            class="fullscreen"
            node_ref=overlay
            style:display=move || if src.with(Option::is_some) { "flex" } else { "none" }
        >
            <span
                class="fullscreen-close"
                on:click=move |_| session.update(|s| s.close_fullscreen())
            >
                "×"
            </span>
            <img
                id="fullscreenImg"
                src=move || src.get().unwrap_or_default()
                draggable="false"
                style:transform=move || transform.get()
                style:cursor=move || if dragging.get() { "grabbing" } else { "grab" }
                on:mousedown=move |ev: MouseEvent| {
                    ev.prevent_default();
                    session.update(|s| s.begin_drag(ev.client_x() as f64, ev.client_y() as f64));
                }
                on:dblclick=move |_| session.update(|s| s.reset_zoom())
            />
        </div>
    }
}
