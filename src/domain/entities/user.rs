use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

pub const ADMIN_ROLE: &str = "ADMINISTRADOR";
pub const ADMIN_LANDING: &str = "/dashboard";
pub const DEFAULT_LANDING: &str = "/resources";

// ───── Login ────────────────────────────────────────────────────────

/// Credentials as typed into the login form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginUser {
    #[validate(length(min = 1, message = "Campos incompletos"))]
    #[serde(default)]
    pub correo: String,

    #[validate(length(min = 1, message = "Campos incompletos"))]
    #[serde(rename = "contraseña", default)]
    pub contrasena: String,
}

impl LoginUser {
    pub fn new(correo: impl Into<String>, contrasena: impl Into<String>) -> Self {
        LoginUser {
            correo: correo.into(),
            contrasena: contrasena.into(),
        }
    }

    pub fn to_backend(&self) -> BackendLogin {
        BackendLogin {
            email: self.correo.trim().to_string(),
            contrasena: self.contrasena.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BackendLogin {
    pub email: String,
    #[serde(rename = "contraseña")]
    pub contrasena: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenEnvelope {
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendLoginResponse {
    pub token: TokenEnvelope,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub apellido: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telefono: Value,
    #[serde(default)]
    pub rol: String,
}

impl BackendLoginResponse {
    pub fn into_session(self) -> (String, SessionUser) {
        let user = SessionUser {
            id: self.id,
            nombre: self.nombre,
            apellido: self.apellido,
            correo: self.email,
            telefono: self.telefono,
            rol: self.rol,
        };
        (self.token.token, user)
    }
}

/// Display info kept in the UI-readable `userInfo` cookie. Never used for
/// authorization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nombre: String,
    pub apellido: String,
    pub correo: String,
    #[serde(default)]
    pub telefono: Value,
    pub rol: String,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.rol == ADMIN_ROLE
    }

    pub fn landing_page(&self) -> &'static str {
        if self.is_admin() { ADMIN_LANDING } else { DEFAULT_LANDING }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "redirectTo")]
    pub redirect_to: String,
}

// ───── User registration ────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, message = "Faltan datos"))]
    #[serde(default)]
    pub nombre: String,

    #[validate(length(min = 1, message = "Faltan datos"))]
    #[serde(default)]
    pub apellido: String,

    /// Accepts either a number or a numeric string. A bad value reports the
    /// same message as a missing one.
    #[validate(custom(function = "validate_phone"))]
    #[serde(default)]
    pub telefono: Value,

    #[validate(length(min = 1, message = "Faltan datos"))]
    #[serde(default)]
    pub correo: String,

    #[validate(length(min = 1, message = "Faltan datos"))]
    #[serde(rename = "contraseña", default)]
    pub contrasena: String,

    #[validate(length(min = 1, message = "Faltan datos"))]
    #[serde(default)]
    pub rol: String,
}

fn validate_phone(telefono: &Value) -> Result<(), ValidationError> {
    match phone_number(telefono) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("telefono").with_message("Faltan datos".into())),
    }
}

fn phone_number(telefono: &Value) -> Option<i64> {
    match telefono {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl NewUser {
    /// Backend shape. Call after `validate()`.
    pub fn to_backend(&self) -> Option<BackendNewUser> {
        Some(BackendNewUser {
            nombre: self.nombre.clone(),
            apellido: self.apellido.clone(),
            email: self.correo.clone(),
            contrasena: self.contrasena.clone(),
            telefono: phone_number(&self.telefono)?,
            rol: self.rol.clone(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BackendNewUser {
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    #[serde(rename = "contraseña")]
    pub contrasena: String,
    pub telefono: i64,
    pub rol: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUserResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_with_empty_email_fails_validation() {
        let login: LoginUser = serde_json::from_value(json!({"correo": "", "contraseña": "x"})).unwrap();
        assert!(login.validate().is_err());
    }

    #[test]
    fn login_email_is_trimmed_for_backend() {
        let body = serde_json::to_value(LoginUser::new("  ana@example.com ", "pw").to_backend()).unwrap();
        assert_eq!(body, json!({"email": "ana@example.com", "contraseña": "pw"}));
    }

    #[test]
    fn admin_lands_on_dashboard() {
        let mut user = SessionUser { rol: ADMIN_ROLE.into(), ..Default::default() };
        assert_eq!(user.landing_page(), "/dashboard");
        user.rol = "EGRESADO".into();
        assert_eq!(user.landing_page(), "/resources");
    }

    #[test]
    fn phone_string_is_sent_as_number() {
        let user: NewUser = serde_json::from_value(json!({
            "nombre": "Rosa",
            "apellido": "Díaz",
            "telefono": "987654321",
            "correo": "rosa@example.com",
            "contraseña": "secreta",
            "rol": "ADMINISTRADOR"
        }))
        .unwrap();

        assert!(user.validate().is_ok());
        let body = serde_json::to_value(user.to_backend().unwrap()).unwrap();
        assert_eq!(body["telefono"], 987654321);
        assert_eq!(body["email"], "rosa@example.com");
    }

    #[test]
    fn non_numeric_phone_is_rejected() {
        let user = NewUser {
            nombre: "Rosa".into(),
            apellido: "Díaz".into(),
            telefono: json!("abc"),
            correo: "rosa@example.com".into(),
            contrasena: "secreta".into(),
            rol: "ADMINISTRADOR".into(),
        };
        assert!(user.validate().is_err());
        assert!(user.to_backend().is_none());
    }
}
