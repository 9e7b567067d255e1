pub mod auth;
pub mod solicitud;

pub use auth::{Credentials, LoginRequest, LoginResponse, SessionToken};
pub use solicitud::Solicitud;
