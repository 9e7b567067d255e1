use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};

/// Copia texto al portapapeles del sistema (fire-and-forget)
pub fn copy_to_clipboard(text: &str) {
    let Some(window) = web_sys::window() else {
        log::warn!("⚠️ [CLIPBOARD] No hay window");
        return;
    };

    let promise = window.navigator().clipboard().write_text(text);
    spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            log::warn!("⚠️ [CLIPBOARD] Error copiando: {}", describe(&e));
        }
    });
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
