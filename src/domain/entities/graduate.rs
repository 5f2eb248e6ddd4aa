use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

pub const ACTIVE_LABEL: &str = "Activo";

// ───── Work Experience ──────────────────────────────────────────────

/// One employment-history entry. `id` is assigned by the backend and is
/// absent on entries that have not been submitted yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[validate(length(min = 1))]
    #[serde(default)]
    pub empresa: String,

    #[validate(length(min = 1))]
    #[serde(default)]
    pub cargo: String,

    #[validate(length(min = 1))]
    #[serde(default)]
    pub fecha_ingreso: String,

    /// `None` means the graduate still works there.
    #[serde(default)]
    pub fecha_salida: Option<String>,
}

impl WorkExperience {
    pub fn is_active(&self) -> bool {
        self.fecha_salida.is_none()
    }

    /// "Activo" for an open stint, the formatted end date otherwise.
    pub fn end_date_label(&self) -> String {
        match &self.fecha_salida {
            Some(date) => format_date(date),
            None => ACTIVE_LABEL.to_string(),
        }
    }
}

// ───── Graduate ─────────────────────────────────────────────────────

/// A graduate as returned by the backend. Missing or `null` scalars read
/// as empty so one incomplete record does not spoil a whole list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Graduate {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub nombre: String,
    #[serde(deserialize_with = "null_as_default")]
    pub apellido: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub carrera: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fecha_nacimiento: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fecha_ingreso: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fecha_egreso: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ponderado: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub id_experiencia_laboral: Vec<WorkExperience>,
    /// Append-only change log owned by the backend.
    #[serde(deserialize_with = "null_as_default")]
    pub historial_actualizacion: Vec<Value>,
}

impl Graduate {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }
}

/// Creation draft, posted to the backend without an id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewGraduate {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub nombre: String,

    #[validate(length(min = 1))]
    #[serde(default)]
    pub apellido: String,

    #[validate(length(min = 1))]
    #[serde(default)]
    pub email: String,

    #[validate(length(min = 1))]
    #[serde(default)]
    pub carrera: String,

    #[validate(length(min = 1))]
    #[serde(default)]
    pub fecha_nacimiento: String,

    #[validate(length(min = 1))]
    #[serde(default)]
    pub fecha_ingreso: String,

    #[validate(length(min = 1))]
    #[serde(default)]
    pub fecha_egreso: String,

    #[validate(range(exclusive_min = 0.0, max = 20.0))]
    #[serde(default)]
    pub ponderado: f64,

    #[validate(nested)]
    #[serde(rename = "experienciaLaboralDTO", default)]
    pub experiencia_laboral_dto: Vec<WorkExperience>,
}

// ───── Update ───────────────────────────────────────────────────────

/// The change-log entry submitted with every update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    #[serde(rename = "idUsuario", default)]
    pub id_usuario: Option<i64>,

    #[serde(rename = "descripción", default)]
    pub descripcion: Option<String>,
}

impl ChangeRecord {
    pub fn new(id_usuario: i64, descripcion: impl Into<String>) -> Self {
        ChangeRecord {
            id_usuario: Some(id_usuario),
            descripcion: Some(descripcion.into()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.id_usuario.is_some_and(|id| id != 0)
            && self.descripcion.as_deref().is_some_and(|d| !d.trim().is_empty())
    }
}

/// Update payload as sent by the UI. Fields other than `id` and the change
/// record are forwarded to the backend untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateGraduateRequest {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(rename = "historialActualizaciones", default)]
    pub historial_actualizaciones: Option<ChangeRecord>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl UpdateGraduateRequest {
    pub fn has_required_fields(&self) -> bool {
        self.id.is_some_and(|id| id != 0)
            && self
                .historial_actualizaciones
                .as_ref()
                .is_some_and(ChangeRecord::is_complete)
    }
}

/// Typed update body built by the edit form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraduateUpdate {
    #[serde(flatten)]
    pub graduate: Graduate,

    #[serde(rename = "historialActualizaciones")]
    pub historial_actualizaciones: ChangeRecord,
}

// ───── Payload helpers ──────────────────────────────────────────────

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The backend sometimes wraps a JSON document inside a JSON string.
/// Strings that parse as JSON are replaced by the parsed value.
pub fn unwrap_double_encoded(value: Value) -> Value {
    match value {
        Value::String(raw) => match serde_json::from_str::<Value>(&raw) {
            Ok(inner @ (Value::Object(_) | Value::Array(_))) => inner,
            _ => Value::String(raw),
        },
        other => other,
    }
}

/// Date inputs take the calendar part of an ISO datetime.
pub fn date_input_value(date: &str) -> &str {
    date.split('T').next().unwrap_or_default()
}

/// Formats a backend date as `dd/mm/yyyy`. Unparseable input is returned as-is.
pub fn format_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date_input_value(date), "%Y-%m-%d") {
        Ok(d) => d.format("%d/%m/%Y").to_string(),
        Err(_) => date.to_string(),
    }
}
