pub mod session_store;

pub use session_store::{BrowserStorage, MemoryStorage, SessionStore, TokenStorage, TOKEN_STORAGE_KEY};
