// ============================================================================
// ERRORES - Tipos de error por operación
// ============================================================================

use thiserror::Error;

/// Fallo a nivel de transporte HTTP (antes de tener un status)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0} ms")]
    Timeout(u32),

    #[error("Request build error: {0}")]
    Build(String),
}

/// Causa de un fallo de una petición a la API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestFailure {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("HTTP error {0}")]
    Status(u16),

    #[error("Parse error: {0}")]
    Decode(String),
}

impl RequestFailure {
    /// El servidor rechazó el token (sesión expirada o revocada)
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, RequestFailure::Status(401))
    }
}

/// Error de acceso a localStorage
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("localStorage no disponible")]
    Unavailable,

    #[error("Error escribiendo la clave '{0}' en localStorage")]
    Write(String),

    #[error("Error leyendo la clave '{0}' de localStorage")]
    Read(String),
}

/// Error de login
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Credenciales incorrectas")]
    InvalidCredentials,

    #[error("Error desconocido en login: {0}")]
    Unknown(#[from] RequestFailure),

    #[error("No se pudo guardar la sesión: {0}")]
    Session(#[from] StorageError),
}

/// Error al listar solicitudes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error cargando solicitudes: {0}")]
pub struct FetchError(#[from] pub RequestFailure);

/// Error al eliminar una solicitud
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error eliminando la solicitud {id}: {cause}")]
pub struct DeleteError {
    pub id: u64,
    pub cause: RequestFailure,
}

impl FetchError {
    pub fn is_unauthorized(&self) -> bool {
        self.0.is_unauthorized()
    }
}

impl DeleteError {
    pub fn is_unauthorized(&self) -> bool {
        self.cause.is_unauthorized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_401_counts_as_unauthorized() {
        assert!(RequestFailure::Status(401).is_unauthorized());
        assert!(!RequestFailure::Status(403).is_unauthorized());
        assert!(!RequestFailure::Transport(TransportError::Timeout(10)).is_unauthorized());
        assert!(FetchError(RequestFailure::Status(401)).is_unauthorized());
    }

    #[test]
    fn delete_error_message_names_the_row() {
        let err = DeleteError { id: 7, cause: RequestFailure::Status(500) };
        assert_eq!(err.to_string(), "Error eliminando la solicitud 7: HTTP error 500");
    }
}
