//! 展示モード切り替えボタン

use crate::app::AppState;
use leptos::prelude::*;

#[component]
pub fn KioskButton(state: AppState) -> impl IntoView {
    let label = Memo::new(move |_| state.session.with(|s| s.kiosk().label()));

    view! {
        <button
            id="kioskBtn"
            class="btn kiosk-btn"
            disabled=move || !state.is_ready()
            on:click=move |_| state.toggle_kiosk()
        >
            {move || label.get()}
        </button>
    }
}
