// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod load_state;
pub mod app_state;

pub use load_state::LoadState;
pub use app_state::AppState;
