//! Reference store trait and implementations
//!
//! Provides a trait for reading the reference tables, with:
//! - Postgres implementation (`crate::db::PgReferenceStore`)
//! - In-memory implementation for tests and demos

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::db::DbError;
use crate::models::{
    Cohort, DocumentType, Gender, ProgramRef, ReferenceSnapshot, Role, StudentState,
    TrainingProgram,
};

/// Read-only access to the six reference collections.
///
/// Every method returns its rows sorted ascending by the display field,
/// ties broken by ascending `id`.
#[async_trait]
pub trait ReferenceStore: Send + Sync {
    async fn roles(&self) -> Result<Vec<Role>, DbError>;
    async fn document_types(&self) -> Result<Vec<DocumentType>, DbError>;
    async fn student_states(&self) -> Result<Vec<StudentState>, DbError>;
    /// Cohorts ordered numerically by cohort number, program embedded
    async fn cohorts(&self) -> Result<Vec<Cohort>, DbError>;
    async fn genders(&self) -> Result<Vec<Gender>, DbError>;
    async fn programs(&self) -> Result<Vec<TrainingProgram>, DbError>;
}

/// In-memory store for testing
#[derive(Default)]
pub struct MemoryReferenceStore {
    data: Mutex<ReferenceSnapshot>,
    queries: AtomicUsize,
    failing: AtomicBool,
    stall: Mutex<Option<Duration>>,
}

impl MemoryReferenceStore {
    pub fn new(data: ReferenceSnapshot) -> Self {
        Self {
            data: Mutex::new(data),
            ..Default::default()
        }
    }

    /// Small data set resembling a freshly seeded database
    pub fn with_sample_data() -> Self {
        let programs = vec![
            TrainingProgram {
                id: 1,
                nombre: "Gestión Administrativa".into(),
            },
            TrainingProgram {
                id: 2,
                nombre: "Análisis y Desarrollo de Software".into(),
            },
            TrainingProgram {
                id: 3,
                nombre: "Contabilidad y Finanzas".into(),
            },
        ];
        let cohort = |id, numero: &str, program: &TrainingProgram| Cohort {
            id,
            numero_ficha: numero.into(),
            programa: ProgramRef::from(program),
        };
        let fichas = vec![
            cohort(1, "2758374", &programs[1]),
            cohort(2, "2690412", &programs[0]),
            cohort(3, "2711203", &programs[2]),
            cohort(4, "2675859", &programs[1]),
        ];

        Self::new(ReferenceSnapshot {
            roles: vec![
                Role { id: 1, nombre: "Instructor".into() },
                Role { id: 2, nombre: "Administrador".into() },
                Role { id: 3, nombre: "Aprendiz".into() },
            ],
            tipos_documento: vec![
                DocumentType { id: 1, nombre: "Tarjeta de identidad".into() },
                DocumentType { id: 2, nombre: "Cédula de ciudadanía".into() },
                DocumentType { id: 3, nombre: "Pasaporte".into() },
            ],
            estados_estudiante: vec![
                StudentState { id: 1, descripcion: "En formación".into() },
                StudentState { id: 2, descripcion: "Cancelado".into() },
                StudentState { id: 3, descripcion: "Certificado".into() },
            ],
            fichas,
            generos: vec![
                Gender { id: 1, descripcion: "Masculino".into() },
                Gender { id: 2, descripcion: "Femenino".into() },
            ],
            programas_formacion: programs,
        })
    }

    /// Replace the stored rows wholesale
    pub fn replace(&self, data: ReferenceSnapshot) {
        *lock(&self.data) = data;
    }

    /// Make every read fail until reset
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Delay every read by `stall` (simulates a hung connection)
    pub fn set_stall(&self, stall: Option<Duration>) {
        *lock(&self.stall) = stall;
    }

    /// Number of collection reads issued so far
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    async fn read<T, K, O, F>(&self, select: F, key: K) -> Result<Vec<T>, DbError>
    where
        F: FnOnce(&ReferenceSnapshot) -> Vec<T>,
        K: Fn(&T) -> O,
        O: Ord,
    {
        self.queries.fetch_add(1, Ordering::SeqCst);

        let stall = *lock(&self.stall);
        if let Some(stall) = stall {
            tokio::time::sleep(stall).await;
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(DbError::Unavailable("memory store set to fail".into()));
        }

        let mut rows = select(&lock(&self.data));
        rows.sort_by_key(|r| key(r));
        Ok(rows)
    }
}

/// Lock, recovering the data from a poisoned mutex
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl ReferenceStore for MemoryReferenceStore {
    async fn roles(&self) -> Result<Vec<Role>, DbError> {
        self.read(|d| d.roles.clone(), |r: &Role| (r.nombre.clone(), r.id))
            .await
    }

    async fn document_types(&self) -> Result<Vec<DocumentType>, DbError> {
        self.read(|d| d.tipos_documento.clone(), |r: &DocumentType| (r.nombre.clone(), r.id))
            .await
    }

    async fn student_states(&self) -> Result<Vec<StudentState>, DbError> {
        self.read(|d| d.estados_estudiante.clone(), |r: &StudentState| {
            (r.descripcion.clone(), r.id)
        })
        .await
    }

    async fn cohorts(&self) -> Result<Vec<Cohort>, DbError> {
        self.read(|d| d.fichas.clone(), |r: &Cohort| {
            (r.numero_ficha.len(), r.numero_ficha.clone(), r.id)
        })
        .await
    }

    async fn genders(&self) -> Result<Vec<Gender>, DbError> {
        self.read(|d| d.generos.clone(), |r: &Gender| (r.descripcion.clone(), r.id))
            .await
    }

    async fn programs(&self) -> Result<Vec<TrainingProgram>, DbError> {
        self.read(|d| d.programas_formacion.clone(), |r: &TrainingProgram| (r.nombre.clone(), r.id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_are_sorted_with_id_tie_break() {
        let store = MemoryReferenceStore::new(ReferenceSnapshot {
            roles: vec![
                Role { id: 9, nombre: "Instructor".into() },
                Role { id: 4, nombre: "Instructor".into() },
                Role { id: 1, nombre: "Administrador".into() },
            ],
            ..Default::default()
        });

        let ids: Vec<_> = store.roles().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 4, 9]);
    }

    #[tokio::test]
    async fn cohorts_sorted_numerically() {
        let program = ProgramRef {
            id: 1,
            nombre: "Gestión Administrativa".into(),
        };
        let cohort = |id, numero: &str| Cohort {
            id,
            numero_ficha: numero.into(),
            programa: program.clone(),
        };
        let store = MemoryReferenceStore::new(ReferenceSnapshot {
            fichas: vec![cohort(1, "1000"), cohort(2, "999"), cohort(3, "2758374")],
            ..Default::default()
        });

        let numbers: Vec<_> = store
            .cohorts()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.numero_ficha)
            .collect();
        assert_eq!(numbers, vec!["999", "1000", "2758374"]);
    }

    #[test]
    fn poisoned_lock_still_usable() {
        let store = std::sync::Arc::new(MemoryReferenceStore::with_sample_data());
        let poisoner = std::sync::Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.data.lock().unwrap();
            panic!("poison the data lock");
        })
        .join();
        assert!(store.data.is_poisoned());

        store.replace(ReferenceSnapshot::default());
        store.set_stall(None);
    }

    #[tokio::test]
    async fn failing_store_errors_and_counts() {
        let store = MemoryReferenceStore::with_sample_data();
        store.set_failing(true);

        assert!(store.genders().await.is_err());
        assert_eq!(store.queries(), 1);

        store.set_failing(false);
        assert_eq!(store.genders().await.unwrap().len(), 2);
        assert_eq!(store.queries(), 2);
    }

    #[tokio::test]
    async fn sample_cohorts_reference_sample_programs() {
        let store = MemoryReferenceStore::with_sample_data();
        let programs = store.programs().await.unwrap();
        for cohort in store.cohorts().await.unwrap() {
            assert!(programs.iter().any(|p| ProgramRef::from(p) == cohort.programa));
        }
    }
}
