//! # Brentwatch Dashboard
//!
//! Wires the api-client to the analytics pipeline. A [`Snapshot`] is everything
//! fetched in one refresh; a [`DashboardView`] is what gets rendered, derived
//! from a snapshot and the current [`FilterParams`].
//!
//! Each collection is fetched independently. A failed fetch degrades that
//! collection to an empty sequence plus a recorded failure, so the view can
//! always be built.

pub mod error;
pub mod snapshot;
pub mod view;

pub use error::DashboardError;
pub use snapshot::{fetch_snapshot, ApiStatus, Collection, CollectionState, Snapshot};
pub use view::{build_view, CollectionFailure, DashboardView, FilterParams};

use api_client::ApiClient;
use std::sync::Arc;

/// Holds the current snapshot and filter parameters, and recomputes the view on demand.
pub struct Dashboard {
    client: Arc<dyn ApiClient>,
    params: FilterParams,
    snapshot: Option<Snapshot>,
}

impl Dashboard {
    pub fn new(client: Arc<dyn ApiClient>, params: FilterParams) -> Self {
        Self {
            client,
            params,
            snapshot: None,
        }
    }

    /// Fetches a fresh snapshot, replacing the previous one wholesale.
    pub async fn refresh(&mut self) -> &Snapshot {
        let snapshot = fetch_snapshot(self.client.as_ref()).await;
        self.snapshot.insert(snapshot)
    }

    /// Replaces the filter parameters. The next `view()` reflects them without refetching.
    pub fn set_params(&mut self, params: FilterParams) {
        self.params = params;
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn view(&self) -> Result<DashboardView, DashboardError> {
        let snapshot = self.snapshot.as_ref().ok_or(DashboardError::NotLoaded)?;
        Ok(build_view(snapshot, &self.params))
    }
}
