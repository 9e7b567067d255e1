// ============================================================================
// HTTP TRANSPORT - SOLO comunicación HTTP (stateless)
// ============================================================================
// Los clientes de la API hablan con este trait; en el navegador se usa
// gloo_net y en los tests un transporte en memoria.
// ============================================================================

use std::future::Future;

use async_trait::async_trait;
use futures::future::{self, Either};
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;

use crate::error::{RequestFailure, TransportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

/// Petición HTTP ya resuelta (URL absoluta)
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            bearer: None,
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            bearer: None,
            body: Some(body),
        }
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            url: url.into(),
            bearer: None,
            body: None,
        }
    }

    pub fn with_bearer(mut self, token: Option<&str>) -> Self {
        self.bearer = token.map(str::to_string);
        self
    }
}

/// Respuesta HTTP con el cuerpo ya leído como texto
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, RequestFailure> {
        serde_json::from_str(&self.body).map_err(|e| RequestFailure::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Transporte del navegador (fetch) con timeout por petición
#[derive(Clone)]
pub struct GlooTransport {
    timeout_ms: u32,
}

impl GlooTransport {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }

    fn builder(request: &ApiRequest, signal: Option<&web_sys::AbortSignal>) -> RequestBuilder {
        let builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        let builder = builder.abort_signal(signal);
        match &request.bearer {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn fetch(
        request: &ApiRequest,
        signal: Option<&web_sys::AbortSignal>,
    ) -> Result<ApiResponse, TransportError> {
        let builder = Self::builder(request, signal);
        let sent = match &request.body {
            Some(body) => builder
                .json(body)
                .map_err(|e| TransportError::Build(e.to_string()))?
                .send()
                .await,
            None => builder.send().await,
        };
        let response = sent.map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        // Un cuerpo ilegible no invalida el status (DELETE suele venir vacío)
        let body = response.text().await.unwrap_or_default();
        Ok(ApiResponse { status, body })
    }
}

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let controller = web_sys::AbortController::new().ok();
        let signal = controller.as_ref().map(|c| c.signal());

        let outcome = race_deadline(
            Self::fetch(&request, signal.as_ref()),
            TimeoutFuture::new(self.timeout_ms),
            self.timeout_ms,
        )
        .await;

        if let Err(TransportError::Timeout(_)) = &outcome {
            if let Some(controller) = &controller {
                controller.abort();
            }
            log::warn!("⏱️ [HTTP] {:?} {} abortada tras {} ms", request.method, request.url, self.timeout_ms);
        }
        outcome
    }
}

/// Corre la petición contra un plazo; si el plazo vence primero, Timeout
async fn race_deadline<F, D>(request: F, deadline: D, timeout_ms: u32) -> Result<ApiResponse, TransportError>
where
    F: Future<Output = Result<ApiResponse, TransportError>>,
    D: Future<Output = ()>,
{
    match future::select(Box::pin(request), Box::pin(deadline)).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => Err(TransportError::Timeout(timeout_ms)),
    }
}

#[cfg(test)]
pub mod testing {
    //! Transporte en memoria con respuestas guionizadas

    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    #[derive(Default)]
    pub struct ScriptedTransport {
        responses: RefCell<VecDeque<Result<ApiResponse, TransportError>>>,
        pub requests: RefCell<Vec<ApiRequest>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(self, status: u16, body: &str) -> Self {
            self.responses.borrow_mut().push_back(Ok(ApiResponse {
                status,
                body: body.to_string(),
            }));
            self
        }

        pub fn fail(self, error: TransportError) -> Self {
            self.responses.borrow_mut().push_back(Err(error));
            self
        }

        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }

        pub fn last_request(&self) -> Option<ApiRequest> {
            self.requests.borrow().last().cloned()
        }
    }

    #[async_trait(?Send)]
    impl HttpTransport for ScriptedTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
            self.requests.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Network("no scripted response".into())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn only_2xx_is_ok() {
        assert!(ApiResponse { status: 200, body: String::new() }.ok());
        assert!(ApiResponse { status: 204, body: String::new() }.ok());
        assert!(!ApiResponse { status: 401, body: String::new() }.ok());
    }

    #[test]
    fn json_decode_failure_is_reported() {
        let response = ApiResponse { status: 200, body: "<html>".into() };
        let decoded: Result<serde_json::Value, _> = response.json();
        assert!(matches!(decoded, Err(RequestFailure::Decode(_))));
    }

    #[test]
    fn hung_request_loses_to_the_deadline() {
        let outcome = block_on(race_deadline(future::pending(), future::ready(()), 50));
        assert_eq!(outcome, Err(TransportError::Timeout(50)));
    }

    #[test]
    fn response_before_the_deadline_is_returned() {
        let response = ApiResponse { status: 200, body: "[]".into() };
        let outcome = block_on(race_deadline(future::ready(Ok(response.clone())), future::pending(), 50));
        assert_eq!(outcome, Ok(response));
    }

    #[test]
    fn bearer_is_optional() {
        let request = ApiRequest::get("http://x/solicitudes").with_bearer(None);
        assert!(request.bearer.is_none());
        let request = ApiRequest::delete("http://x/solicitudes/1").with_bearer(Some("tok"));
        assert_eq!(request.bearer.as_deref(), Some("tok"));
        assert_eq!(request.method, Method::Delete);
    }
}
