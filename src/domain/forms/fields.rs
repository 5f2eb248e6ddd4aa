use std::str::FromStr;

use crate::entities::graduate::{Graduate, NewGraduate, WorkExperience};
use crate::errors::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraduateField {
    Nombre,
    Apellido,
    Email,
    Carrera,
    FechaNacimiento,
    FechaIngreso,
    FechaEgreso,
    Ponderado,
}

impl FromStr for GraduateField {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nombre" => Ok(GraduateField::Nombre),
            "apellido" => Ok(GraduateField::Apellido),
            "email" => Ok(GraduateField::Email),
            "carrera" => Ok(GraduateField::Carrera),
            "fechaNacimiento" => Ok(GraduateField::FechaNacimiento),
            "fechaIngreso" => Ok(GraduateField::FechaIngreso),
            "fechaEgreso" => Ok(GraduateField::FechaEgreso),
            "ponderado" => Ok(GraduateField::Ponderado),
            other => Err(ClientError::UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceField {
    Empresa,
    Cargo,
    FechaIngreso,
    FechaSalida,
}

impl FromStr for ExperienceField {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "empresa" => Ok(ExperienceField::Empresa),
            "cargo" => Ok(ExperienceField::Cargo),
            "fechaIngreso" => Ok(ExperienceField::FechaIngreso),
            "fechaSalida" => Ok(ExperienceField::FechaSalida),
            other => Err(ClientError::UnknownField(other.to_string())),
        }
    }
}

/// A record a form can edit field by field.
pub trait Draft {
    fn text_mut(&mut self, field: GraduateField) -> Option<&mut String>;
    fn ponderado_mut(&mut self) -> &mut f64;
    fn experiences_mut(&mut self) -> &mut Vec<WorkExperience>;

    fn set_field(&mut self, field: GraduateField, value: &str) -> Result<(), ClientError> {
        match self.text_mut(field) {
            Some(slot) => *slot = value.to_string(),
            None => {
                let parsed = value
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| ClientError::InvalidValue("ponderado".to_string()))?;
                *self.ponderado_mut() = parsed;
            }
        }
        Ok(())
    }

    fn add_experience(&mut self) {
        self.experiences_mut().push(WorkExperience::default());
    }

    /// Out-of-range indexes are ignored.
    fn remove_experience(&mut self, index: usize) {
        let list = self.experiences_mut();
        if index < list.len() {
            list.remove(index);
        }
    }

    fn set_experience_field(&mut self, index: usize, field: ExperienceField, value: &str) {
        if let Some(exp) = self.experiences_mut().get_mut(index) {
            set_experience(exp, field, value);
        }
    }
}

/// An empty end date means the stint is still open.
fn set_experience(exp: &mut WorkExperience, field: ExperienceField, value: &str) {
    match field {
        ExperienceField::Empresa => exp.empresa = value.to_string(),
        ExperienceField::Cargo => exp.cargo = value.to_string(),
        ExperienceField::FechaIngreso => exp.fecha_ingreso = value.to_string(),
        ExperienceField::FechaSalida => {
            exp.fecha_salida = (!value.is_empty()).then(|| value.to_string());
        }
    }
}

macro_rules! text_fields {
    ($record:ident, $field:ident) => {
        match $field {
            GraduateField::Nombre => Some(&mut $record.nombre),
            GraduateField::Apellido => Some(&mut $record.apellido),
            GraduateField::Email => Some(&mut $record.email),
            GraduateField::Carrera => Some(&mut $record.carrera),
            GraduateField::FechaNacimiento => Some(&mut $record.fecha_nacimiento),
            GraduateField::FechaIngreso => Some(&mut $record.fecha_ingreso),
            GraduateField::FechaEgreso => Some(&mut $record.fecha_egreso),
            GraduateField::Ponderado => None,
        }
    };
}

impl Draft for NewGraduate {
    fn text_mut(&mut self, field: GraduateField) -> Option<&mut String> {
        text_fields!(self, field)
    }

    fn ponderado_mut(&mut self) -> &mut f64 {
        &mut self.ponderado
    }

    fn experiences_mut(&mut self) -> &mut Vec<WorkExperience> {
        &mut self.experiencia_laboral_dto
    }
}

impl Draft for Graduate {
    fn text_mut(&mut self, field: GraduateField) -> Option<&mut String> {
        text_fields!(self, field)
    }

    fn ponderado_mut(&mut self) -> &mut f64 {
        &mut self.ponderado
    }

    fn experiences_mut(&mut self) -> &mut Vec<WorkExperience> {
        &mut self.id_experiencia_laboral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_parse_from_form_keys() {
        assert_eq!("fechaEgreso".parse::<GraduateField>(), Ok(GraduateField::FechaEgreso));
        assert_eq!("fechaSalida".parse::<ExperienceField>(), Ok(ExperienceField::FechaSalida));
        assert_eq!(
            "edad".parse::<GraduateField>(),
            Err(ClientError::UnknownField("edad".into()))
        );
    }

    #[test]
    fn ponderado_is_parsed_as_number() {
        let mut draft = NewGraduate::default();
        draft.set_field(GraduateField::Ponderado, "16.5").unwrap();
        assert_eq!(draft.ponderado, 16.5);

        assert!(draft.set_field(GraduateField::Ponderado, "dieciséis").is_err());
        assert_eq!(draft.ponderado, 16.5);
    }

    #[test]
    fn clearing_end_date_reopens_the_stint() {
        let mut draft = NewGraduate::default();
        draft.add_experience();
        draft.set_experience_field(0, ExperienceField::FechaSalida, "2022-01-31");
        assert_eq!(draft.experiencia_laboral_dto[0].fecha_salida.as_deref(), Some("2022-01-31"));

        draft.set_experience_field(0, ExperienceField::FechaSalida, "");
        assert!(draft.experiencia_laboral_dto[0].is_active());
    }
}
