//! 画像プローブ（HtmlImageElement で実際に読み込んでみる）

use futures::channel::oneshot;
use mineral_catalog_common::ImageProbe;
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::HtmlImageElement;

type SettleSlot = Rc<RefCell<Option<oneshot::Sender<bool>>>>;

/// onload/onerror のどちらか先に来た方だけを通知
fn settle(slot: &SettleSlot, loaded: bool) {
    if let Some(tx) = slot.borrow_mut().take() {
        let _ = tx.send(loaded);
    }
}

#[derive(Clone, Copy, Default)]
pub struct BrowserProbe;

impl ImageProbe for BrowserProbe {
    fn probe(&self, src: String) -> impl Future<Output = bool> {
        async move {
            let Ok(img) = HtmlImageElement::new() else {
                return false;
            };

            let (tx, rx) = oneshot::channel::<bool>();
            let tx: SettleSlot = Rc::new(RefCell::new(Some(tx)));
            let on_load = {
                let tx = tx.clone();
                Closure::<dyn FnMut()>::new(move || settle(&tx, true))
            };
            let on_error = {
                let tx = tx.clone();
                Closure::<dyn FnMut()>::new(move || settle(&tx, false))
            };
            img.set_onload(Some(on_load.as_ref().unchecked_ref()));
            img.set_onerror(Some(on_error.as_ref().unchecked_ref()));
            img.set_src(&src);

            // 送信側が落ちた場合も失敗扱い
            let loaded = rx.await.unwrap_or(false);

            img.set_onload(None);
            img.set_onerror(None);
            loaded
        }
    }
}
