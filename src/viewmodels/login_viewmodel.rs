// ============================================================================
// LOGIN VIEWMODEL - Estado del formulario + envío
// ============================================================================
// Devuelve valores; la vista decide cómo re-renderizar y navegar.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::AuthError;
use crate::models::{Credentials, SessionToken};
use crate::services::{AuthClient, HttpTransport};
use crate::state::LoadState;

pub const USERNAME_REQUIRED: &str = "Digite el usuario";
pub const PASSWORD_REQUIRED: &str = "Digite la clave";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Credenciales incorrectas";
pub const GENERIC_LOGIN_ERROR: &str = "No se pudo iniciar sesión. Intente de nuevo.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    pub username: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

/// Resultado de un envío, para que la vista navegue
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// Token guardado: ir al dashboard
    Authenticated,
    /// Se queda en el login (error visible en el formulario)
    Rejected,
    /// No se envió nada (validación o envío en curso)
    NotSubmitted,
}

#[derive(Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub show_password: bool,
    pub field_errors: FieldErrors,
    pub status: LoadState<(), AuthError>,
}

impl LoginForm {
    pub fn set_username(&mut self, value: String) {
        self.username = value;
        if !self.username.is_empty() {
            self.field_errors.username = None;
        }
    }

    pub fn set_password(&mut self, value: String) {
        self.password = value;
        if !self.password.is_empty() {
            self.field_errors.password = None;
        }
    }

    pub fn toggle_show_password(&mut self) {
        self.show_password = !self.show_password;
    }

    pub fn validate(&self) -> FieldErrors {
        FieldErrors {
            username: self.username.is_empty().then_some(USERNAME_REQUIRED),
            password: self.password.is_empty().then_some(PASSWORD_REQUIRED),
        }
    }

    /// Idle/Failure → Loading. None si hay campos vacíos o ya se está enviando.
    pub fn begin_submit(&mut self) -> Option<Credentials> {
        if self.status.is_loading() {
            log::warn!("⚠️ [LOGIN] Envío ignorado: ya hay uno en curso");
            return None;
        }

        self.field_errors = self.validate();
        if !self.field_errors.is_empty() {
            return None;
        }

        self.status.begin();
        Some(Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }

    /// Loading → Success | Failure
    pub fn finish_submit(&mut self, result: Result<SessionToken, AuthError>) -> LoginOutcome {
        match result {
            Ok(_) => {
                self.password.clear();
                self.status.finish(Ok(()));
                LoginOutcome::Authenticated
            }
            Err(error) => {
                if error == AuthError::InvalidCredentials {
                    self.username.clear();
                    self.password.clear();
                }
                self.status.finish(Err(error));
                LoginOutcome::Rejected
            }
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.status.is_loading()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            "Enviando"
        } else {
            "Entrar"
        }
    }

    /// Mensaje de error general del formulario
    pub fn error_message(&self) -> Option<&'static str> {
        match self.status.error()? {
            AuthError::InvalidCredentials => Some(INVALID_CREDENTIALS_MESSAGE),
            AuthError::Unknown(_) | AuthError::Session(_) => Some(GENERIC_LOGIN_ERROR),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// ViewModel de login - SOLO lógica
pub struct LoginViewModel<T: HttpTransport> {
    auth_client: AuthClient<T>,
    form: Rc<RefCell<LoginForm>>,
}

impl<T: HttpTransport> LoginViewModel<T> {
    pub fn new(auth_client: AuthClient<T>, form: Rc<RefCell<LoginForm>>) -> Self {
        Self { auth_client, form }
    }

    pub fn form(&self) -> Rc<RefCell<LoginForm>> {
        self.form.clone()
    }

    /// Valida, envía y aplica el resultado al formulario.
    /// `on_loading` se llama cuando el botón pasa a "Enviando".
    pub async fn submit(&self, on_loading: impl FnOnce()) -> LoginOutcome {
        let Some(credentials) = self.form.borrow_mut().begin_submit() else {
            return LoginOutcome::NotSubmitted;
        };
        on_loading();

        let result = self.auth_client.login(&credentials).await;
        if let Err(e) = &result {
            log::error!("❌ [LOGIN] {}", e);
        }
        self.form.borrow_mut().finish_submit(result)
    }
}
