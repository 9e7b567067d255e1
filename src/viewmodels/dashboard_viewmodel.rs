// ============================================================================
// DASHBOARD VIEWMODEL - Listado, borrado, paginación y feedback de copia
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{DeleteError, FetchError};
use crate::models::Solicitud;
use crate::services::{HttpTransport, SolicitudClient};
use crate::state::LoadState;
use crate::viewmodels::copy_feedback::CopyFeedback;
use crate::viewmodels::pagination::{PageError, PageSize, PageState, PageView};

/// Efecto que la vista debe aplicar después de una operación remota
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardEffect {
    None,
    /// La API rechazó el token: cerrar sesión y volver al login
    SessionExpired,
}

#[derive(Debug, Default)]
pub struct DashboardState {
    pub solicitudes: LoadState<Vec<Solicitud>, FetchError>,
    pub page: PageState,
    /// Borrados en curso o fallidos, por id de fila
    pub deletions: HashMap<u64, LoadState<(), DeleteError>>,
    pub copy_feedback: CopyFeedback,
    /// Sube en cada reset; respuestas de una generación anterior se descartan
    generation: u64,
}

impl DashboardState {
    pub fn records(&self) -> &[Solicitud] {
        self.solicitudes.value().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn page_view(&self) -> PageView<'_, Solicitud> {
        self.page.view(self.records())
    }

    pub fn begin_fetch(&mut self) -> bool {
        self.solicitudes.begin()
    }

    /// Un listado nuevo reemplaza la colección entera
    pub fn finish_fetch(&mut self, result: Result<Vec<Solicitud>, FetchError>) -> DashboardEffect {
        let effect = match &result {
            Err(e) if e.is_unauthorized() => DashboardEffect::SessionExpired,
            _ => DashboardEffect::None,
        };
        self.deletions.clear();
        self.solicitudes.finish(result);
        self.page.clamp(self.records().len());
        effect
    }

    /// Idle/Failure → Loading para la fila; false si ya hay un borrado en curso
    pub fn begin_delete(&mut self, id: u64) -> bool {
        self.deletions.entry(id).or_default().begin()
    }

    /// La fila sale de la colección solo tras la confirmación del servidor
    pub fn finish_delete(&mut self, id: u64, result: Result<(), DeleteError>) -> DashboardEffect {
        match result {
            Ok(()) => {
                self.deletions.remove(&id);
                if let Some(records) = self.solicitudes.value_mut() {
                    records.retain(|s| s.id != id);
                }
                self.page.clamp(self.records().len());
                DashboardEffect::None
            }
            Err(error) => {
                let effect = if error.is_unauthorized() {
                    DashboardEffect::SessionExpired
                } else {
                    DashboardEffect::None
                };
                self.deletions.entry(id).or_default().finish(Err(error));
                effect
            }
        }
    }

    pub fn is_deleting(&self, id: u64) -> bool {
        self.deletions.get(&id).is_some_and(LoadState::is_loading)
    }

    pub fn delete_error(&self, id: u64) -> Option<&DeleteError> {
        self.deletions.get(&id).and_then(LoadState::error)
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page.set_page_size(page_size);
    }

    pub fn previous_page(&mut self) -> Result<usize, PageError> {
        self.page.previous()
    }

    pub fn next_page(&mut self) -> Result<usize, PageError> {
        let count = self.records().len();
        self.page.next(count)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn reset(&mut self) {
        *self = Self {
            generation: self.generation + 1,
            ..Self::default()
        };
    }
}

/// ViewModel del dashboard - SOLO lógica
pub struct DashboardViewModel<T: HttpTransport> {
    client: SolicitudClient<T>,
    state: Rc<RefCell<DashboardState>>,
}

impl<T: HttpTransport> DashboardViewModel<T> {
    pub fn new(client: SolicitudClient<T>, state: Rc<RefCell<DashboardState>>) -> Self {
        Self { client, state }
    }

    pub fn state(&self) -> Rc<RefCell<DashboardState>> {
        self.state.clone()
    }

    /// Carga (o recarga) la colección completa
    pub async fn refresh(&self) -> DashboardEffect {
        let generation = {
            let mut state = self.state.borrow_mut();
            if !state.begin_fetch() {
                return DashboardEffect::None;
            }
            state.generation()
        };
        let result = self.client.fetch_all().await;

        let mut state = self.state.borrow_mut();
        if state.generation() != generation {
            log::debug!("[DASHBOARD] Listado de una sesión anterior descartado");
            return DashboardEffect::None;
        }
        state.finish_fetch(result)
    }

    /// Borra una fila; `on_pending` se llama cuando la fila pasa a "en curso"
    pub async fn delete(&self, id: u64, on_pending: impl FnOnce()) -> DashboardEffect {
        let generation = {
            let mut state = self.state.borrow_mut();
            if !state.begin_delete(id) {
                log::warn!("⚠️ [DASHBOARD] Borrado de {} ya en curso", id);
                return DashboardEffect::None;
            }
            state.generation()
        };
        on_pending();
        let result = self.client.delete(id).await;

        let mut state = self.state.borrow_mut();
        if state.generation() != generation {
            log::debug!("[DASHBOARD] Borrado de {} de una sesión anterior descartado", id);
            return DashboardEffect::None;
        }
        state.finish_delete(id, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RequestFailure, TransportError};
    use crate::services::http::testing::ScriptedTransport;
    use crate::stores::SessionStore;
    use async_trait::async_trait;
    use futures::executor::block_on;

    use crate::services::{ApiRequest, ApiResponse};

    /// Transporte que simula un logout mientras la petición está en vuelo
    struct ResetMidFlight {
        inner: ScriptedTransport,
        state: Rc<RefCell<DashboardState>>,
    }

    #[async_trait(?Send)]
    impl HttpTransport for ResetMidFlight {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
            self.state.borrow_mut().reset();
            self.inner.send(request).await
        }
    }

    fn solicitud(id: u64) -> Solicitud {
        Solicitud {
            id,
            name: format!("Nombre {}", id),
            company: format!("Empresa {}", id),
            email: format!("contacto{}@empresa.co", id),
            detail: String::new(),
        }
    }

    fn json(ids: &[u64]) -> String {
        serde_json::to_string(&ids.iter().map(|id| solicitud(*id)).collect::<Vec<_>>()).unwrap()
    }

    fn viewmodel(transport: ScriptedTransport) -> (DashboardViewModel<ScriptedTransport>, Rc<ScriptedTransport>) {
        let transport = Rc::new(transport);
        let client = SolicitudClient::new(transport.clone(), "http://api", SessionStore::in_memory());
        let vm = DashboardViewModel::new(client, Rc::new(RefCell::new(DashboardState::default())));
        (vm, transport)
    }

    fn ids(state: &DashboardState) -> Vec<u64> {
        state.records().iter().map(|s| s.id).collect()
    }

    #[test]
    fn refresh_replaces_the_collection() {
        let (vm, _) = viewmodel(
            ScriptedTransport::new()
                .respond(200, &json(&[1, 2, 3]))
                .respond(200, &json(&[7])),
        );

        block_on(vm.refresh());
        assert_eq!(ids(&vm.state().borrow()), vec![1, 2, 3]);

        block_on(vm.refresh());
        assert_eq!(ids(&vm.state().borrow()), vec![7]);
    }

    #[test]
    fn failed_fetch_leaves_empty_collection_and_failed_state() {
        let (vm, _) = viewmodel(ScriptedTransport::new().respond(500, ""));

        assert_eq!(block_on(vm.refresh()), DashboardEffect::None);

        let state = vm.state();
        let state = state.borrow();
        assert!(state.records().is_empty());
        assert_eq!(
            state.solicitudes.error(),
            Some(&FetchError(RequestFailure::Status(500)))
        );
        assert_eq!(state.page_view().total_pages, 0);
    }

    #[test]
    fn unauthorized_fetch_expires_session() {
        let (vm, _) = viewmodel(ScriptedTransport::new().respond(401, ""));
        assert_eq!(block_on(vm.refresh()), DashboardEffect::SessionExpired);
    }

    #[test]
    fn delete_removes_row_only_on_200() {
        let (vm, _) = viewmodel(
            ScriptedTransport::new()
                .respond(200, &json(&[1, 2, 3]))
                .respond(500, "")
                .respond(200, ""),
        );
        block_on(vm.refresh());

        block_on(vm.delete(2, || {}));
        {
            let state = vm.state();
            let state = state.borrow();
            assert_eq!(ids(&state), vec![1, 2, 3]);
            assert_eq!(
                state.delete_error(2),
                Some(&DeleteError { id: 2, cause: RequestFailure::Status(500) })
            );
        }

        block_on(vm.delete(2, || {}));
        let state = vm.state();
        let state = state.borrow();
        assert_eq!(ids(&state), vec![1, 3]);
        assert_eq!(state.delete_error(2), None);
        assert!(state.deletions.is_empty());
    }

    #[test]
    fn network_failure_on_delete_keeps_row() {
        let (vm, _) = viewmodel(
            ScriptedTransport::new()
                .respond(200, &json(&[1]))
                .fail(TransportError::Timeout(30_000)),
        );
        block_on(vm.refresh());

        block_on(vm.delete(1, || {}));

        assert_eq!(ids(&vm.state().borrow()), vec![1]);
    }

    #[test]
    fn row_is_still_present_while_delete_is_pending() {
        let (vm, _) = viewmodel(
            ScriptedTransport::new()
                .respond(200, &json(&[1, 2]))
                .respond(200, ""),
        );
        block_on(vm.refresh());
        let state = vm.state();

        block_on(vm.delete(1, || {
            let state = state.borrow();
            assert!(state.is_deleting(1));
            assert_eq!(ids(&state), vec![1, 2]);
        }));

        assert_eq!(ids(&state.borrow()), vec![2]);
    }

    #[test]
    fn out_of_order_completions_are_independent() {
        let mut state = DashboardState::default();
        state.begin_fetch();
        state.finish_fetch(Ok(vec![solicitud(1), solicitud(2), solicitud(3)]));

        assert!(state.begin_delete(1));
        assert!(state.begin_delete(3));
        assert!(!state.begin_delete(1), "same row cannot be deleted twice concurrently");

        state.finish_delete(3, Ok(()));
        state.finish_delete(1, Err(DeleteError { id: 1, cause: RequestFailure::Status(502) }));

        assert_eq!(ids(&state), vec![1, 2]);
        assert!(!state.is_deleting(1));
        assert!(state.delete_error(1).is_some());
    }

    #[test]
    fn deleting_last_row_of_last_page_moves_back_a_page() {
        let mut state = DashboardState::default();
        state.begin_fetch();
        state.finish_fetch(Ok((1..=5).map(solicitud).collect()));
        state.next_page().unwrap();
        assert_eq!(state.page_view().visible.len(), 1);

        state.begin_delete(5);
        state.finish_delete(5, Ok(()));

        let view = state.page_view();
        assert_eq!(view.current_page, 1);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.visible.len(), 4);
    }

    #[test]
    fn unauthorized_delete_expires_session() {
        let mut state = DashboardState::default();
        state.begin_delete(9);
        let effect = state.finish_delete(9, Err(DeleteError { id: 9, cause: RequestFailure::Status(401) }));
        assert_eq!(effect, DashboardEffect::SessionExpired);
    }

    #[test]
    fn fetch_finishing_after_reset_is_discarded() {
        let state = Rc::new(RefCell::new(DashboardState::default()));
        let transport = Rc::new(ResetMidFlight {
            inner: ScriptedTransport::new().respond(401, ""),
            state: state.clone(),
        });
        let client = SolicitudClient::new(transport, "http://api", SessionStore::in_memory());
        let vm = DashboardViewModel::new(client, state.clone());

        assert_eq!(block_on(vm.refresh()), DashboardEffect::None);

        let state = state.borrow();
        assert!(state.solicitudes.is_idle());
        assert_eq!(state.generation(), 1);
    }

    #[test]
    fn delete_finishing_after_reset_is_discarded() {
        let state = Rc::new(RefCell::new(DashboardState::default()));
        state.borrow_mut().finish_fetch(Ok(vec![solicitud(1)]));
        let transport = Rc::new(ResetMidFlight {
            inner: ScriptedTransport::new().respond(401, ""),
            state: state.clone(),
        });
        let client = SolicitudClient::new(transport, "http://api", SessionStore::in_memory());
        let vm = DashboardViewModel::new(client, state.clone());

        assert_eq!(block_on(vm.delete(1, || {})), DashboardEffect::None);
        assert!(state.borrow().deletions.is_empty());
    }

    #[test]
    fn reset_keeps_counting_generations() {
        let mut state = DashboardState::default();
        state.reset();
        state.reset();
        assert_eq!(state.generation(), 2);
        assert!(state.solicitudes.is_idle());
    }

    #[test]
    fn page_size_change_resets_page() {
        let mut state = DashboardState::default();
        state.begin_fetch();
        state.finish_fetch(Ok((1..=12).map(solicitud).collect()));
        state.next_page().unwrap();
        state.next_page().unwrap();

        state.set_page_size(PageSize::Ten);

        let view = state.page_view();
        assert_eq!(view.current_page, 1);
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.visible.len(), 10);
    }
}
