//! Application state and dependency injection.

mod config;
mod error;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use vitals_core::{DocumentKind, DocumentRepository, DocumentStore, SharedStore};

pub use crate::service::config::ServiceConfig;
pub use crate::service::error::{Result, ServiceError};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    /// Shared handle to the document store.
    pub store: SharedStore,
    /// Cancelled once the graceful shutdown period runs out.
    pub shutdown: CancellationToken,
}

impl ServiceState {
    /// Creates state around an already connected store.
    pub fn new(store: impl DocumentStore + 'static) -> Self {
        Self::from_shared(Arc::new(store))
    }

    /// Creates state around a shared store handle.
    pub fn from_shared(store: SharedStore) -> Self {
        Self {
            store,
            shutdown: CancellationToken::new(),
        }
    }

    /// Initializes application state from configuration.
    ///
    /// Connects to PostgreSQL and applies pending migrations.
    pub async fn from_config(service_config: &ServiceConfig) -> Result<Self> {
        service_config.validate()?;
        let store = service_config.connect_store().await?;
        Ok(Self::from_shared(store))
    }

    /// Builds a per-request repository for `kind`.
    ///
    /// The repository observes a child of the shutdown token, so in-flight
    /// reads stop when the server gives up waiting for them.
    pub fn repository(&self, kind: DocumentKind) -> DocumentRepository {
        DocumentRepository::new(self.store.clone(), kind)
            .with_cancellation(self.shutdown.child_token())
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(store: SharedStore);
impl_di!(shutdown: CancellationToken);

#[cfg(test)]
mod tests {
    use axum::extract::FromRef;
    use vitals_core::MemoryStore;

    use super::*;

    #[test]
    fn repositories_follow_shutdown() {
        let state = ServiceState::new(MemoryStore::new());
        let repository = state.repository(DocumentKind::Sleep);
        assert_eq!(repository.kind(), DocumentKind::Sleep);

        let shutdown = CancellationToken::from_ref(&state);
        shutdown.cancel();
        assert!(state.shutdown.is_cancelled());
    }
}
