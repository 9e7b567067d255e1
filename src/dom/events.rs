// ============================================================================
// EVENT HANDLING - Sistema de eventos
// ============================================================================
// Los listeners sobre elementos se sueltan con closure.forget(): el navegador
// los libera junto con el elemento cuando el contenedor se vacía en cada render.
// Los listeners globales (window) se registran UNA sola vez al arrancar.
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, HtmlInputElement, HtmlSelectElement, InputEvent, MouseEvent};

fn listen<E, F>(target: &EventTarget, event_type: &str, handler: F) -> Result<(), JsValue>
where
    E: wasm_bindgen::convert::FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Click handler simple
pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    listen(element, "click", handler)
}

/// Input handler: entrega el valor actual del <input>
pub fn on_input<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(String) + 'static,
{
    listen(element, "input", move |e: InputEvent| {
        if let Some(input) = e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) {
            handler(input.value());
        }
    })
}

/// Change handler de <select>: entrega el value seleccionado
pub fn on_select_change<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(String) + 'static,
{
    listen(element, "change", move |e: Event| {
        if let Some(select) = e.target().and_then(|t| t.dyn_into::<HtmlSelectElement>().ok()) {
            handler(select.value());
        }
    })
}

/// Submit de formulario sin recargar la página
pub fn on_submit<F>(form: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    listen(form, "submit", move |e: Event| {
        e.prevent_default();
        handler();
    })
}

/// Listener global en window (registrar una sola vez)
pub fn on_window<F>(event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let win = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    listen(&win, event_type, handler)
}
