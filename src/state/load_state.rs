// ============================================================================
// LOAD STATE - Idle → Loading → Success | Failure
// ============================================================================

/// Estado de una operación remota (login, listado, borrado)
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T, E> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Failure(E),
}

impl<T, E> LoadState<T, E> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, LoadState::Idle)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            LoadState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn value_mut(&mut self) -> Option<&mut T> {
        match self {
            LoadState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            LoadState::Failure(error) => Some(error),
            _ => None,
        }
    }

    /// Pasa a Loading; devuelve false si ya había una operación en curso
    pub fn begin(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        *self = LoadState::Loading;
        true
    }

    /// Resuelve la operación en curso con su resultado
    pub fn finish(&mut self, result: Result<T, E>) {
        *self = match result {
            Ok(value) => LoadState::Success(value),
            Err(error) => LoadState::Failure(error),
        };
    }
}
