// ============================================================================
// SESSION STORE - Token de sesión persistido en localStorage
// ============================================================================
// Contexto explícito: se crea una vez al iniciar la app y se pasa al
// AuthClient, al RouteGuard y a los clientes autenticados.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::StorageError;
use crate::models::SessionToken;

/// Clave de localStorage donde vive el token
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Almacenamiento clave/valor de strings crudos
pub trait TokenStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// localStorage del navegador (valores crudos, sin JSON)
pub struct BrowserStorage;

impl BrowserStorage {
    fn raw() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)
    }
}

impl TokenStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::raw()?
            .get_item(key)
            .map_err(|_| StorageError::Read(key.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::raw()?
            .set_item(key, value)
            .map_err(|_| StorageError::Write(key.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::raw()?
            .remove_item(key)
            .map_err(|_| StorageError::Write(key.to_string()))
    }
}

/// Almacenamiento en memoria (tests)
#[derive(Default)]
pub struct MemoryStorage {
    values: RefCell<HashMap<String, String>>,
}

impl TokenStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

/// Contexto de sesión compartido (Rc, un solo hilo)
#[derive(Clone)]
pub struct SessionStore {
    storage: Rc<dyn TokenStorage>,
}

impl SessionStore {
    pub fn new(storage: Rc<dyn TokenStorage>) -> Self {
        Self { storage }
    }

    /// Sesión respaldada por localStorage
    pub fn browser() -> Self {
        Self::new(Rc::new(BrowserStorage))
    }

    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStorage::default()))
    }

    /// Lee el token actual; un error de lectura cuenta como "sin sesión"
    pub fn token(&self) -> Option<SessionToken> {
        match self.storage.get(TOKEN_STORAGE_KEY) {
            Ok(Some(value)) if !value.is_empty() => Some(SessionToken::new(value)),
            Ok(_) => None,
            Err(e) => {
                log::error!("❌ [SESSION] {}", e);
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn persist(&self, token: &SessionToken) -> Result<(), StorageError> {
        self.storage.set(TOKEN_STORAGE_KEY, token.as_str())?;
        log::info!("💾 [SESSION] Token guardado");
        Ok(())
    }

    /// Logout: borra el token
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(TOKEN_STORAGE_KEY)?;
        log::info!("🗑️ [SESSION] Token eliminado");
        Ok(())
    }
}
