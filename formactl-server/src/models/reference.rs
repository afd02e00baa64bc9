//! Reference records and the aggregate snapshot
//!
//! JSON field names follow the admin frontend's contract (`nombre`,
//! `descripcion`, `numeroFicha`), Rust names stay English.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User role (administrator, instructor, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Role {
    pub id: i32,
    pub nombre: String,
}

/// Identity document type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DocumentType {
    pub id: i32,
    pub nombre: String,
}

/// Student enrollment state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StudentState {
    pub id: i32,
    pub descripcion: String,
}

/// Gender reference row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Gender {
    pub id: i32,
    pub descripcion: String,
}

/// Training program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TrainingProgram {
    pub id: i32,
    pub nombre: String,
}

/// Program reference embedded in a cohort
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramRef {
    pub id: i32,
    pub nombre: String,
}

impl From<&TrainingProgram> for ProgramRef {
    fn from(p: &TrainingProgram) -> Self {
        Self {
            id: p.id,
            nombre: p.nombre.clone(),
        }
    }
}

/// Cohort ("ficha"): a numbered intake group within one program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cohort {
    pub id: i32,
    pub numero_ficha: String,
    pub programa: ProgramRef,
}

/// All six reference collections read at one point in time.
///
/// Serializes to exactly six keys; never built partially.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceSnapshot {
    pub roles: Vec<Role>,
    pub tipos_documento: Vec<DocumentType>,
    pub estados_estudiante: Vec<StudentState>,
    pub fichas: Vec<Cohort>,
    pub generos: Vec<Gender>,
    pub programas_formacion: Vec<TrainingProgram>,
}

impl ReferenceSnapshot {
    /// Row count per collection, keyed by its JSON name
    pub fn counts(&self) -> [(&'static str, usize); 6] {
        [
            ("roles", self.roles.len()),
            ("tiposDocumento", self.tipos_documento.len()),
            ("estadosEstudiante", self.estados_estudiante.len()),
            ("fichas", self.fichas.len()),
            ("generos", self.generos.len()),
            ("programasFormacion", self.programas_formacion.len()),
        ]
    }
}
