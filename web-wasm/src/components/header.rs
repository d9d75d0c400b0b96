//! ヘッダーコンポーネント

use crate::app::AppState;
use crate::components::kiosk_button::KioskButton;
use leptos::prelude::*;

#[component]
pub fn Header(state: AppState) -> impl IntoView {
    view! {
        <header class="header">
            <div class="header-title">
                <h1>"Colección de Minerales"</h1>
                <p class="subtitle">"Catálogo de ejemplares"</p>
            </div>
            <KioskButton state=state />
        </header>
    }
}
