use serde::{Deserialize, Serialize};
use std::fmt;

/// Token de sesión opaco emitido por la API
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Nunca imprimir el token en logs
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Credenciales del formulario; solo viven durante el envío
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a Credentials> for LoginRequest<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            username: &credentials.username,
            password: &credentials.password,
        }
    }
}

/// Respuesta de `/usuarios/login`; el resto de campos se ignora
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}
