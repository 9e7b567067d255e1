use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::router::Route;
use crate::state::AppState;

/// Header del panel: logo + cerrar sesión
pub fn render_header(state: &AppState) -> Result<Element, JsValue> {
    let logo = {
        let state = state.clone();
        ElementBuilder::new("a")?
            .class("header-logo")
            .attr("href", Route::Login.path())?
            .text("Spagio")
            .on_click(move |e| {
                e.prevent_default();
                state.navigate(Route::Login);
            })?
            .build()
    };

    let logout = {
        let state = state.clone();
        ElementBuilder::new("button")?
            .class("btn-logout")
            .attr("type", "button")?
            .text("Cerrar sesión")
            .on_click(move |_| {
                log::info!("👋 [APP] Logout");
                state.clear_session();
                state.navigate(Route::Login);
            })?
            .build()
    };

    Ok(ElementBuilder::new("header")?
        .class("app-header")
        .children([logo, logout])?
        .build())
}
