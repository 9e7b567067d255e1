use std::rc::Rc;

use crate::error::{DeleteError, FetchError, RequestFailure};
use crate::models::Solicitud;
use crate::services::http::{ApiRequest, HttpTransport};
use crate::stores::SessionStore;

const SOLICITUDES_PATH: &str = "solicitudes";

/// Cliente de la colección de solicitudes (listar y eliminar)
pub struct SolicitudClient<T: HttpTransport> {
    transport: Rc<T>,
    base_url: String,
    session: SessionStore,
}

impl<T: HttpTransport> SolicitudClient<T> {
    pub fn new(transport: Rc<T>, base_url: impl Into<String>, session: SessionStore) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            session,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, SOLICITUDES_PATH)
    }

    fn bearer(&self) -> Option<String> {
        self.session.token().map(|t| t.as_str().to_string())
    }

    /// GET /solicitudes
    pub async fn fetch_all(&self) -> Result<Vec<Solicitud>, FetchError> {
        let request = ApiRequest::get(self.collection_url()).with_bearer(self.bearer().as_deref());

        log::info!("📋 [SOLICITUDES] Obteniendo solicitudes...");

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| FetchError(RequestFailure::from(e)))
            .and_then(|response| {
                if response.ok() {
                    response.json::<Vec<Solicitud>>().map_err(FetchError)
                } else {
                    Err(FetchError(RequestFailure::Status(response.status)))
                }
            });

        match &response {
            Ok(solicitudes) => log::info!("✅ [SOLICITUDES] {} solicitudes recibidas", solicitudes.len()),
            Err(e) => log::error!("❌ [SOLICITUDES] {}", e),
        }
        response
    }

    /// DELETE /solicitudes/{id}; solo HTTP 200 cuenta como éxito
    pub async fn delete(&self, id: u64) -> Result<(), DeleteError> {
        let url = format!("{}/{}", self.collection_url(), id);
        let request = ApiRequest::delete(url).with_bearer(self.bearer().as_deref());

        log::info!("🗑️ [SOLICITUDES] Eliminando solicitud {}", id);

        let result = match self.transport.send(request).await {
            Ok(response) if response.status == 200 => Ok(()),
            Ok(response) => Err(DeleteError {
                id,
                cause: RequestFailure::Status(response.status),
            }),
            Err(e) => Err(DeleteError {
                id,
                cause: e.into(),
            }),
        };

        match &result {
            Ok(()) => log::info!("✅ [SOLICITUDES] Solicitud {} eliminada", id),
            Err(e) => log::error!("❌ [SOLICITUDES] {}", e),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::models::SessionToken;
    use crate::services::http::testing::ScriptedTransport;
    use crate::services::http::Method;
    use futures::executor::block_on;

    const TWO_RECORDS: &str = r#"[
        {"id":1,"nombre":"Ana","empresa":"Acme","email":"ana@acme.co","detalle":"100"},
        {"id":2,"nombre":"Luis","empresa":"Initech","email":"luis@initech.co","detalle":"250"}
    ]"#;

    fn client(transport: ScriptedTransport, session: SessionStore) -> (SolicitudClient<ScriptedTransport>, Rc<ScriptedTransport>) {
        let transport = Rc::new(transport);
        (SolicitudClient::new(transport.clone(), "http://api", session), transport)
    }

    #[test]
    fn fetch_all_decodes_collection_and_sends_bearer() {
        let session = SessionStore::in_memory();
        session.persist(&SessionToken::new("tok")).unwrap();
        let (client, transport) = client(ScriptedTransport::new().respond(200, TWO_RECORDS), session);

        let solicitudes = block_on(client.fetch_all()).unwrap();

        assert_eq!(solicitudes.len(), 2);
        assert_eq!(solicitudes[1].company, "Initech");
        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.url, "http://api/solicitudes");
        assert_eq!(request.bearer.as_deref(), Some("tok"));
    }

    #[test]
    fn fetch_all_without_session_sends_no_bearer() {
        let (client, transport) =
            client(ScriptedTransport::new().respond(200, "[]"), SessionStore::in_memory());

        assert!(block_on(client.fetch_all()).unwrap().is_empty());
        assert_eq!(transport.last_request().unwrap().bearer, None);
    }

    #[test]
    fn fetch_all_reports_status_and_parse_failures() {
        let (client, _) = client(
            ScriptedTransport::new().respond(503, "").respond(200, "{not json"),
            SessionStore::in_memory(),
        );

        assert_eq!(
            block_on(client.fetch_all()).unwrap_err(),
            FetchError(RequestFailure::Status(503))
        );
        assert!(matches!(
            block_on(client.fetch_all()).unwrap_err(),
            FetchError(RequestFailure::Decode(_))
        ));
    }

    #[test]
    fn delete_targets_record_url() {
        let (client, transport) =
            client(ScriptedTransport::new().respond(200, ""), SessionStore::in_memory());

        block_on(client.delete(42)).unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.url, "http://api/solicitudes/42");
    }

    #[test]
    fn delete_only_accepts_exactly_200() {
        let (client, _) = client(
            ScriptedTransport::new()
                .respond(204, "")
                .respond(404, "")
                .fail(TransportError::Network("offline".into())),
            SessionStore::in_memory(),
        );

        assert_eq!(
            block_on(client.delete(1)).unwrap_err(),
            DeleteError { id: 1, cause: RequestFailure::Status(204) }
        );
        assert_eq!(
            block_on(client.delete(1)).unwrap_err().cause,
            RequestFailure::Status(404)
        );
        assert_eq!(
            block_on(client.delete(1)).unwrap_err().cause,
            RequestFailure::Transport(TransportError::Network("offline".into()))
        );
    }
}
