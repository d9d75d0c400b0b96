//! データセット取得
//!
//! 起動時に一度だけ `catalogo_minerales.json` を取得する。再試行はしない。

use mineral_catalog_common::{parse_catalog, LoadError, MineralRecord};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// URLからレコード配列を取得してパース
pub async fn fetch_catalog(url: &str) -> Result<Vec<MineralRecord>, LoadError> {
    let body = fetch_text(url)
        .await
        .map_err(|e| LoadError::Unavailable(js_error_message(&e)))?;
    parse_catalog(&body)
}

async fn fetch_text(url: &str) -> Result<String, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url)).await?;
    let resp: Response = resp_value.dyn_into()?;

    if !resp.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", resp.status())));
    }

    let text = JsFuture::from(resp.text()?).await?;
    text.as_string()
        .ok_or_else(|| JsValue::from_str("response body is not text"))
}

fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| value.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
        .unwrap_or_else(|| format!("{:?}", value))
}
