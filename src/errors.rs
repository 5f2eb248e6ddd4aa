use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use derive_more::Display;
use validator::ValidationErrors;

pub const INCOMPLETE_FIELDS: &str = "Por favor completa todos los campos obligatorios";
pub const MISSING_TOKEN: &str = "Token no proporcionado";
pub const INTERNAL_ERROR: &str = "Error interno del servidor";

/// Every failure the proxy layer can hand back to the UI.
#[derive(Debug, Display)]
pub enum ProxyError {
    #[display("Token no proporcionado")]
    MissingAuth,

    #[display("{_0}")]
    MissingFields(String),

    #[display("{message}")]
    BackendRejected { status: u16, message: String },

    /// Detail is for logs only; the response body carries a fixed message.
    #[display("Internal error: {_0}")]
    Internal(String),
}

impl ProxyError {
    pub fn incomplete() -> Self {
        ProxyError::MissingFields(INCOMPLETE_FIELDS.to_string())
    }

    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        ProxyError::BackendRejected {
            status,
            message: message.into(),
        }
    }

    fn public_message(&self) -> String {
        match self {
            ProxyError::Internal(_) => INTERNAL_ERROR.to_string(),
            _ => self.to_string(),
        }
    }

    pub fn to_http_response(&self) -> HttpResponse {
        self.error_response()
    }
}

impl ResponseError for ProxyError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(serde_json::json!({ "error": self.public_message() }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::MissingAuth => StatusCode::UNAUTHORIZED,
            ProxyError::MissingFields(_) => StatusCode::BAD_REQUEST,
            ProxyError::BackendRejected { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for ProxyError {
    fn from(errors: ValidationErrors) -> Self {
        tracing::debug!("Validation failed: {}", errors);

        // Fields are visited by name so the reported message is stable.
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .into_iter()
            .flat_map(|(_, errs)| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| INCOMPLETE_FIELDS.to_string());

        ProxyError::MissingFields(message)
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        ProxyError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for ProxyError {
    fn from(err: serde_json::Error) -> Self {
        ProxyError::Internal(format!("Malformed backend payload: {}", err))
    }
}

/// Failures seen by the UI-side form and list state.
#[derive(Debug, Display, PartialEq)]
pub enum ClientError {
    #[display("Por favor completa todos los campos obligatorios")]
    IncompleteFields,

    #[display("Falta la descripción del cambio")]
    MissingDescription,

    #[display("No hay un egresado cargado")]
    NothingLoaded,

    #[display("Valor inválido para {_0}")]
    InvalidValue(String),

    #[display("Campo desconocido: {_0}")]
    UnknownField(String),

    #[display("Error {status}: {message}")]
    Request { status: u16, message: String },

    #[display("Respuesta inválida: {_0}")]
    InvalidPayload(String),
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Request {
            status: err.status().map(|s| s.as_u16()).unwrap_or(0),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::InvalidPayload(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::user::NewUser;
    use serde_json::json;
    use validator::Validate;

    #[derive(Validate)]
    struct TwoMessages {
        #[validate(length(min = 1, message = "zeta vacía"))]
        zeta: String,
        #[validate(length(min = 1, message = "alfa vacía"))]
        alfa: String,
    }

    #[test]
    fn message_comes_from_the_first_field_by_name() {
        for _ in 0..20 {
            let errors = TwoMessages { zeta: String::new(), alfa: String::new() }
                .validate()
                .unwrap_err();
            assert_eq!(ProxyError::from(errors).to_string(), "alfa vacía");
        }
    }

    #[test]
    fn bad_phone_with_missing_fields_reports_missing_data() {
        let user = NewUser {
            nombre: String::new(),
            telefono: json!("abc"),
            rol: String::new(),
            ..Default::default()
        };

        let err = ProxyError::from(user.validate().unwrap_err());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Faltan datos");
    }

    #[test]
    fn internal_detail_stays_out_of_the_body() {
        let err = ProxyError::Internal("connection refused".into());
        assert_eq!(err.public_message(), INTERNAL_ERROR);
    }
}
