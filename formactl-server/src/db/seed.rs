//! Default reference rows
//!
//! Safe to run repeatedly: every insert is `ON CONFLICT DO NOTHING` on the
//! table's unique display column, and the whole seed is one transaction.

use serde::Serialize;
use sqlx::PgPool;

use super::repos::DbError;

const ROLES: &[&str] = &["Administrador", "Aprendiz", "Coordinador", "Instructor"];

const DOCUMENT_TYPES: &[&str] = &[
    "Cédula de ciudadanía",
    "Cédula de extranjería",
    "Pasaporte",
    "Permiso por protección temporal",
    "Tarjeta de identidad",
];

const STUDENT_STATES: &[&str] = &[
    "Cancelado",
    "Certificado",
    "En formación",
    "Retiro voluntario",
    "Trasladado",
];

const GENDERS: &[&str] = &["Femenino", "Masculino", "No binario", "Prefiere no decir"];

const PROGRAMS: &[&str] = &[
    "Análisis y Desarrollo de Software",
    "Contabilidad y Finanzas",
    "Gestión Administrativa",
    "Mantenimiento de Equipos de Cómputo",
];

/// (cohort number, program name)
const COHORTS: &[(&str, &str)] = &[
    ("2675859", "Análisis y Desarrollo de Software"),
    ("2758374", "Análisis y Desarrollo de Software"),
    ("2690412", "Gestión Administrativa"),
    ("2711203", "Contabilidad y Finanzas"),
    ("2720948", "Mantenimiento de Equipos de Cómputo"),
];

/// Rows inserted per table by one seed run
#[derive(Debug, Default, Clone, Serialize)]
pub struct SeedReport {
    pub roles: u64,
    pub tipos_documento: u64,
    pub estados_estudiante: u64,
    pub programas_formacion: u64,
    pub fichas: u64,
    pub generos: u64,
}

impl SeedReport {
    pub fn total(&self) -> u64 {
        self.roles
            + self.tipos_documento
            + self.estados_estudiante
            + self.programas_formacion
            + self.fichas
            + self.generos
    }
}

/// Insert the default reference rows that are missing
pub async fn run(pool: &PgPool) -> Result<SeedReport, DbError> {
    let mut tx = pool.begin().await?;
    let mut report = SeedReport::default();

    report.roles = insert_names(&mut tx, "roles", "nombre", ROLES).await?;
    report.tipos_documento =
        insert_names(&mut tx, "tipos_documento", "nombre", DOCUMENT_TYPES).await?;
    report.estados_estudiante =
        insert_names(&mut tx, "estados_estudiante", "descripcion", STUDENT_STATES).await?;
    report.generos = insert_names(&mut tx, "generos", "descripcion", GENDERS).await?;
    report.programas_formacion =
        insert_names(&mut tx, "programas_formacion", "nombre", PROGRAMS).await?;

    for (numero, programa) in COHORTS {
        // Program looked up by name inside the insert, so no ids are hardcoded
        let result = sqlx::query(
            r#"
            INSERT INTO fichas (numero_ficha, programa_id)
            SELECT $1, p.id FROM programas_formacion p WHERE p.nombre = $2
            ON CONFLICT (numero_ficha) DO NOTHING
            "#,
        )
        .bind(numero)
        .bind(programa)
        .execute(&mut *tx)
        .await?;
        report.fichas += result.rows_affected();
    }

    tx.commit().await?;

    tracing::info!(inserted = report.total(), "Seed complete");
    Ok(report)
}

async fn insert_names(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    table: &'static str,
    column: &'static str,
    values: &[&str],
) -> Result<u64, DbError> {
    // table/column come from the constants above, never from input
    let sql = format!("INSERT INTO {table} ({column}) VALUES ($1) ON CONFLICT ({column}) DO NOTHING");

    let mut inserted = 0;
    for value in values {
        let result = sqlx::query(&sql).bind(*value).execute(&mut **tx).await?;
        inserted += result.rows_affected();
    }

    tracing::debug!(table, inserted, "Seeded table");
    Ok(inserted)
}
