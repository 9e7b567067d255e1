use serde::{Deserialize, Serialize};

/// Solicitud de una empresa (cotización de boletería NFT)
///
/// Los nombres de campo en el JSON siguen los de la API remota.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solicitud {
    pub id: u64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "empresa")]
    pub company: String,
    pub email: String,
    #[serde(rename = "detalle")]
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_api_field_names_and_ignores_extra_fields() {
        let json = r#"{
            "id": 3,
            "nombre": "Ana",
            "empresa": "Acme",
            "email": "ana@acme.co",
            "detalle": "200 entradas",
            "createdAt": "2023-10-01"
        }"#;
        let solicitud: Solicitud = serde_json::from_str(json).unwrap();
        assert_eq!(solicitud.id, 3);
        assert_eq!(solicitud.name, "Ana");
        assert_eq!(solicitud.company, "Acme");
        assert_eq!(solicitud.detail, "200 entradas");
    }
}
