// ============================================================================
// APP - Aplicación principal
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, clear_children, get_element_by_id};
use crate::router::current_route;
use crate::state::AppState;
use crate::stores::SessionStore;
use crate::views::render_app;

/// Aplicación principal
pub struct App {
    state: AppState,
    root: Element,
}

impl App {
    /// Crear nueva aplicación montada en #app
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let state = AppState::new(SessionStore::browser());
        state.enter(current_route());
        if state.session.is_authenticated() {
            log::info!("💾 [APP] Token encontrado en storage");
        }

        // Suscribirse a cambios de estado para re-renderizar automáticamente
        state.subscribe_to_changes(move || {
            // Timeout 0 para batchear múltiples updates
            Timeout::new(0, crate::rerender_app).forget();
        });

        Ok(Self { state, root })
    }

    /// Renderizar aplicación (re-render completo)
    pub fn render(&mut self) -> Result<(), JsValue> {
        clear_children(&self.root);
        let view = render_app(&self.state)?;
        append_child(&self.root, &view)
    }

    /// Back/forward del navegador: vuelve a pasar por el guard en el próximo render
    pub fn on_history_change(&self) {
        let route = current_route();
        log::debug!("🧭 [APP] popstate → {}", route.path());
        self.state.enter(route);
    }
}
