use std::rc::Rc;

use crate::error::{AuthError, RequestFailure};
use crate::models::{Credentials, LoginRequest, LoginResponse, SessionToken};
use crate::services::http::{ApiRequest, HttpTransport};
use crate::stores::SessionStore;

const LOGIN_PATH: &str = "usuarios/login";

/// Cliente de autenticación: intercambia credenciales por un token
pub struct AuthClient<T: HttpTransport> {
    transport: Rc<T>,
    base_url: String,
    session: SessionStore,
}

impl<T: HttpTransport> AuthClient<T> {
    pub fn new(transport: Rc<T>, base_url: impl Into<String>, session: SessionStore) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            session,
        }
    }

    /// POST /usuarios/login; en 2xx guarda el token en la sesión
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionToken, AuthError> {
        let url = format!("{}/{}", self.base_url, LOGIN_PATH);
        let body = serde_json::to_value(LoginRequest::from(credentials))
            .map_err(|e| RequestFailure::Decode(e.to_string()))?;

        log::info!("🔐 [AUTH] Iniciando login para usuario: {}", credentials.username);

        let response = self
            .transport
            .send(ApiRequest::post(url, body))
            .await
            .map_err(|e| {
                log::error!("❌ [AUTH] Login fallido: {}", e);
                RequestFailure::from(e)
            })?;

        if response.status == 401 {
            log::warn!("⚠️ [AUTH] Credenciales rechazadas (401)");
            // Un token anterior no sobrevive a un login rechazado
            if let Err(e) = self.session.clear() {
                log::error!("❌ [AUTH] {}", e);
            }
            return Err(AuthError::InvalidCredentials);
        }

        if !response.ok() {
            log::error!("❌ [AUTH] Login fallido: HTTP {}", response.status);
            return Err(RequestFailure::Status(response.status).into());
        }

        let login: LoginResponse = response.json().map_err(|e| {
            log::error!("❌ [AUTH] Respuesta de login inválida: {}", e);
            e
        })?;

        let token = SessionToken::new(login.token);
        self.session.persist(&token)?;

        log::info!("✅ [AUTH] Login exitoso");
        Ok(token)
    }
}
