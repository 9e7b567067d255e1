// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

use crate::config::CONFIG;
use crate::router::{write_history, Route, RouteGuard};
use crate::services::{AuthClient, GlooTransport, SolicitudClient};
use crate::stores::SessionStore;
use crate::viewmodels::{DashboardState, DashboardViewModel, LoginForm, LoginViewModel};

/// Estado global de la aplicación
#[derive(Clone)]
pub struct AppState {
    pub session: SessionStore,
    pub guard: RouteGuard,
    pub transport: Rc<GlooTransport>,

    pub route: Rc<RefCell<Route>>,
    pub login: Rc<RefCell<LoginForm>>,
    pub dashboard: Rc<RefCell<DashboardState>>,

    // Temporizadores "Copiado" por email; reemplazar uno cancela el anterior
    pub copy_timers: Rc<RefCell<HashMap<String, Timeout>>>,

    // Reactivity: callbacks para notificar cambios
    pub change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl AppState {
    /// Crear nuevo estado de aplicación (sesión respaldada por localStorage)
    pub fn new(session: SessionStore) -> Self {
        Self {
            guard: RouteGuard::new(session.clone()),
            session,
            transport: Rc::new(GlooTransport::new(CONFIG.request_timeout_ms)),
            route: Rc::new(RefCell::new(Route::Login)),
            login: Rc::new(RefCell::new(LoginForm::default())),
            dashboard: Rc::new(RefCell::new(DashboardState::default())),
            copy_timers: Rc::new(RefCell::new(HashMap::new())),
            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn login_viewmodel(&self) -> LoginViewModel<GlooTransport> {
        let client = AuthClient::new(self.transport.clone(), CONFIG.api_url.clone(), self.session.clone());
        LoginViewModel::new(client, self.login.clone())
    }

    pub fn dashboard_viewmodel(&self) -> DashboardViewModel<GlooTransport> {
        let client = SolicitudClient::new(self.transport.clone(), CONFIG.api_url.clone(), self.session.clone());
        DashboardViewModel::new(client, self.dashboard.clone())
    }

    pub fn current_route(&self) -> Route {
        *self.route.borrow()
    }

    pub fn set_route(&self, route: Route) {
        *self.route.borrow_mut() = route;
    }

    /// Montar una ruta; entrar al dashboard siempre parte de un listado nuevo
    pub fn enter(&self, route: Route) {
        if route == Route::Dashboard && self.current_route() != Route::Dashboard {
            self.dashboard.borrow_mut().reset();
        }
        self.set_route(route);
    }

    /// Navegación de la app: push al historial + re-render
    pub fn navigate(&self, route: Route) {
        log::info!("🧭 [APP] Navegando a {}", route.path());
        if let Err(e) = write_history(route, false) {
            log::error!("❌ [APP] Error escribiendo historial: {:?}", e);
        }
        self.enter(route);
        self.notify_subscribers();
    }

    /// Logout: borra el token y todo el estado de pantalla
    pub fn clear_session(&self) {
        if let Err(e) = self.session.clear() {
            log::error!("❌ [APP] Error limpiando sesión: {}", e);
        }
        self.login.borrow_mut().reset();
        self.dashboard.borrow_mut().reset();
        self.copy_timers.borrow_mut().clear();
    }

    /// Suscribirse a cambios de estado
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar a todos los subscribers
    pub fn notify_subscribers(&self) {
        let subscribers: Vec<Rc<dyn Fn()>> = self.change_subscribers.borrow().clone();
        for callback in subscribers {
            callback();
        }
    }
}
