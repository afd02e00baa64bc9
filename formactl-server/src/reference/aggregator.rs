//! Snapshot fetch - six concurrent reads, all-or-nothing
//!
//! Each read gets its own timeout. The first failure (or timeout) aborts the
//! remaining reads and the whole fetch fails; a partial snapshot is never
//! returned.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::db::DbError;
use crate::models::ReferenceSnapshot;

use super::store::ReferenceStore;

/// Default per-read timeout in seconds
pub const QUERY_TIMEOUT_SECS: u64 = 10;

/// One of the six reference collections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Roles,
    DocumentTypes,
    StudentStates,
    Cohorts,
    Genders,
    Programs,
}

impl Collection {
    /// Key used in the JSON payload
    pub fn key(self) -> &'static str {
        match self {
            Self::Roles => "roles",
            Self::DocumentTypes => "tiposDocumento",
            Self::StudentStates => "estadosEstudiante",
            Self::Cohorts => "fichas",
            Self::Genders => "generos",
            Self::Programs => "programasFormacion",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Why a snapshot could not be built
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("failed to read {collection}: {source}")]
    Store {
        collection: Collection,
        source: DbError,
    },

    #[error("reading {collection} timed out after {timeout:?}")]
    Timeout {
        collection: Collection,
        timeout: Duration,
    },

    /// Outcome of one refresh attempt handed to every request that waited on it
    #[error(transparent)]
    Shared(Arc<RefreshError>),
}

impl RefreshError {
    pub fn collection(&self) -> Collection {
        match self {
            Self::Store { collection, .. } | Self::Timeout { collection, .. } => *collection,
            Self::Shared(inner) => inner.collection(),
        }
    }
}

/// Read all six collections concurrently and assemble one snapshot.
pub async fn fetch_snapshot(
    store: &dyn ReferenceStore,
    query_timeout: Duration,
) -> Result<ReferenceSnapshot, RefreshError> {
    let (
        roles,
        tipos_documento,
        estados_estudiante,
        fichas,
        generos,
        programas_formacion,
    ) = tokio::try_join!(
        bounded(Collection::Roles, query_timeout, store.roles()),
        bounded(Collection::DocumentTypes, query_timeout, store.document_types()),
        bounded(Collection::StudentStates, query_timeout, store.student_states()),
        bounded(Collection::Cohorts, query_timeout, store.cohorts()),
        bounded(Collection::Genders, query_timeout, store.genders()),
        bounded(Collection::Programs, query_timeout, store.programs()),
    )?;

    Ok(ReferenceSnapshot {
        roles,
        tipos_documento,
        estados_estudiante,
        fichas,
        generos,
        programas_formacion,
    })
}

/// Run one read with a timeout, tagging failures with the collection
pub(crate) async fn bounded<T, F>(
    collection: Collection,
    timeout: Duration,
    read: F,
) -> Result<Vec<T>, RefreshError>
where
    F: Future<Output = Result<Vec<T>, DbError>>,
{
    match tokio::time::timeout(timeout, read).await {
        Ok(Ok(rows)) => {
            tracing::trace!(%collection, rows = rows.len(), "collection read");
            Ok(rows)
        }
        Ok(Err(source)) => Err(RefreshError::Store { collection, source }),
        Err(_) => Err(RefreshError::Timeout {
            collection,
            timeout,
        }),
    }
}
