// ============================================================================
// VIEWS - Funciones que renderizan DOM (sin lógica)
// ============================================================================

pub mod header;
pub mod login;
pub mod dashboard;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, ElementBuilder};
use crate::router::{write_history, Route};
use crate::state::AppState;
use crate::viewmodels::DashboardEffect;

pub use dashboard::render_dashboard;
pub use header::render_header;
pub use login::render_login;

/// Renderizar la ruta actual, pasando antes por el guard de sesión
pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    let requested = state.current_route();
    let route = state.guard.resolve(requested);
    if route != requested {
        // Redirect: reemplaza la entrada para que "atrás" no vuelva al dashboard
        write_history(route, true)?;
        state.set_route(route);
    }

    let shell = ElementBuilder::new("div")?.class("app-shell").build();
    match route {
        Route::Login => append_child(&shell, &render_login(state)?)?,
        Route::Dashboard => {
            append_child(&shell, &render_header(state)?)?;
            append_child(&shell, &render_dashboard(state)?)?;
        }
    }
    Ok(shell)
}

/// Aplicar el efecto de una operación remota del dashboard
pub(crate) fn apply_dashboard_effect(state: &AppState, effect: DashboardEffect) {
    match effect {
        DashboardEffect::SessionExpired => {
            log::warn!("🔒 [APP] Token rechazado por la API, cerrando sesión");
            state.clear_session();
            state.navigate(Route::Login);
        }
        DashboardEffect::None => state.notify_subscribers(),
    }
}
