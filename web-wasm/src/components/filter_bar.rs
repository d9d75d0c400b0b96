//! 検索・フィルタ・ステータス行

use crate::app::{AppState, LoadState};
use leptos::prelude::*;
use mineral_catalog_common::{FilterDimension, LOAD_ERROR_STATUS};

#[component]
pub fn FilterBar(state: AppState) -> impl IntoView {
    let session = state.session;

    let status = Memo::new(move |_| match state.load_state.get() {
        LoadState::Loading => "Cargando colección...".to_string(),
        LoadState::Failed => LOAD_ERROR_STATUS.to_string(),
        LoadState::Ready => session.with(|s| s.status_text()),
    });

    view! {
        <section class="controls">
            <input
                type="text"
                id="search"
                placeholder="Buscar por nombre, yacimiento, país o nº de inventario..."
                disabled=move || !state.is_ready()
                prop:value=move || session.with(|s| s.filter().query.clone())
                on:input=move |ev| {
                    let query = event_target_value(&ev);
                    session.update(|s| {
                        s.set_query(&query);
                    });
                }
            />
            <div class="filters">
                {FilterDimension::ALL
                    .into_iter()
                    .map(|dimension| view! { <FilterSelect state=state dimension=dimension /> })
                    .collect_view()}
            </div>
            <p id="stats" class="stats">{move || status.get()}</p>
        </section>
    }
}

/// 1項目分のセレクタ。空値は「すべて」
#[component]
fn FilterSelect(state: AppState, dimension: FilterDimension) -> impl IntoView {
    let session = state.session;
    let options = Memo::new(move |_| {
        session.with(|s| s.options().for_dimension(dimension).to_vec())
    });
    let selected = Memo::new(move |_| {
        session.with(|s| s.filter().selection(dimension).unwrap_or_default().to_string())
    });

    view! {
        <select
            disabled=move || !state.is_ready()
            prop:value=move || selected.get()
            on:change=move |ev| {
                let value = event_target_value(&ev);
                session.update(|s| {
                    s.select_filter(dimension, &value);
                });
            }
        >
            <option value="">{dimension.any_label()}</option>
            <For
                each=move || options.get()
                key=|option| option.clone()
                children=move |option| {
                    let value = option.clone();
                    view! { <option value=value>{option}</option> }
                }
            />
        </select>
    }
}
