// ============================================================================
// ROUTER - Rutas de la app y guard de sesión
// ============================================================================

use wasm_bindgen::JsValue;

use crate::models::SessionToken;
use crate::stores::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Dashboard => "/dashboard",
        }
    }

    /// Paths desconocidos van al login
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/dashboard" => Route::Dashboard,
            _ => Route::Login,
        }
    }

    pub fn requires_session(self) -> bool {
        matches!(self, Route::Dashboard)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCheck {
    Authenticated(SessionToken),
    Unauthenticated,
}

/// Decide si una ruta protegida puede montarse
#[derive(Clone)]
pub struct RouteGuard {
    session: SessionStore,
}

impl RouteGuard {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    /// Solo comprueba presencia local del token, no su validez
    pub fn check_session(&self) -> SessionCheck {
        match self.session.token() {
            Some(token) => SessionCheck::Authenticated(token),
            None => SessionCheck::Unauthenticated,
        }
    }

    /// Ruta que realmente se monta para la ruta pedida
    pub fn resolve(&self, requested: Route) -> Route {
        if requested.requires_session() && self.check_session() == SessionCheck::Unauthenticated {
            log::info!("🔒 [GUARD] Sin token, redirigiendo a login");
            return Route::Login;
        }
        requested
    }
}

/// Ruta del location actual del navegador
pub fn current_route() -> Route {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .map(|path| Route::from_path(&path))
        .unwrap_or(Route::Login)
}

/// Escribe la ruta en el historial (push) o la reemplaza (redirect)
pub fn write_history(route: Route, replace: bool) -> Result<(), JsValue> {
    let history = web_sys::window()
        .ok_or_else(|| JsValue::from_str("No window"))?
        .history()?;
    if replace {
        history.replace_state_with_url(&JsValue::NULL, "", Some(route.path()))
    } else {
        history.push_state_with_url(&JsValue::NULL, "", Some(route.path()))
    }
}
