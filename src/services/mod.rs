pub mod http;
pub mod auth_service;
pub mod solicitud_service;
pub mod clipboard;

pub use http::{ApiRequest, ApiResponse, GlooTransport, HttpTransport, Method};
pub use auth_service::AuthClient;
pub use solicitud_service::SolicitudClient;
