// ============================================================================
// SOLICITUDES ADMIN - FRONTEND MVVM (RUST PURO + WASM)
// ============================================================================
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Estado + Lógica UI
// - Services: SOLO comunicación API
// - Stores: Persistencia del token de sesión
// - State: State Management con Rc<RefCell>
// - Models: Estructuras compartidas con backend
// ============================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod stores;
pub mod state;
pub mod viewmodels;
pub mod router;
mod dom;
mod views;
mod app;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::config::CONFIG;

// Variable estática global para mantener la instancia de App
thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    // Inicializar logging (nada si ENABLE_LOGGING=false)
    if let Some(level) = CONFIG.effective_log_level().to_level() {
        wasm_logger::init(wasm_logger::Config::new(level));
    }
    log::info!("🚀 Solicitudes Admin - Rust Puro + MVVM");
    log::info!("🌐 [CONFIG] API: {} (timeout {} ms)", CONFIG.api_url, CONFIG.request_timeout_ms);
    for key in &CONFIG.fallbacks {
        log::warn!("⚠️ [CONFIG] Valor inválido para {}, usando el valor por defecto", key);
    }

    // Crear y renderizar app
    let mut app = App::new()?;
    app.render()?;

    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    // Listener global de historial: se registra UNA sola vez aquí
    dom::on_window("popstate", |_e| {
        APP.with(|app_cell| {
            if let Some(app) = app_cell.borrow().as_ref() {
                app.on_history_change();
            }
        });
        rerender_app();
    })?;

    Ok(())
}

/// Re-render completo de la app
pub fn rerender_app() {
    APP.with(|app_cell| {
        if let Some(app) = app_cell.borrow_mut().as_mut() {
            if let Err(e) = app.render() {
                log::error!("❌ Error re-renderizando: {:?}", e);
            }
        } else {
            log::warn!("⚠️ [RERENDER] App no está inicializada");
        }
    });
}
