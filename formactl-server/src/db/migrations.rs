//! Schema for the reference tables
//!
//! Every statement is idempotent so `run` can be called on each start.

use sqlx::PgPool;

use super::repos::DbError;

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS roles (
        id SERIAL PRIMARY KEY,
        nombre TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tipos_documento (
        id SERIAL PRIMARY KEY,
        nombre TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS estados_estudiante (
        id SERIAL PRIMARY KEY,
        descripcion TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS programas_formacion (
        id SERIAL PRIMARY KEY,
        nombre TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS fichas (
        id SERIAL PRIMARY KEY,
        numero_ficha TEXT NOT NULL UNIQUE CHECK (numero_ficha ~ '^[1-9][0-9]*$'),
        programa_id INTEGER NOT NULL REFERENCES programas_formacion(id) ON DELETE RESTRICT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS generos (
        id SERIAL PRIMARY KEY,
        descripcion TEXT NOT NULL UNIQUE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_fichas_programa ON fichas(programa_id)",
];

/// Create all reference tables if missing
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running reference schema migrations...");

    for statement in STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::info!(statements = STATEMENTS.len(), "Migrations complete");
    Ok(())
}
