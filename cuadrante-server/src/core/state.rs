//! Application state

use std::sync::Arc;

use shared::AppResult;

use super::Config;
use crate::records::http::RecordStoreClient;
use crate::records::{ActivityStore, HistoryConfigSource, StoreDirectory, TrafficSource};

/// Shared application state
///
/// The four collaborators are trait objects so tests (and any future
/// second backend) can swap implementations without touching the core.
/// In production all four are the same [`RecordStoreClient`].
#[derive(Clone)]
pub struct AppState {
    /// Parsed server configuration
    pub config: Config,
    /// Store parameter lookup
    pub stores: Arc<dyn StoreDirectory>,
    /// Historical comparison configuration lookup
    pub history: Arc<dyn HistoryConfigSource>,
    /// Raw traffic counter fetch
    pub traffic: Arc<dyn TrafficSource>,
    /// Activity grid read/update
    pub activity: Arc<dyn ActivityStore>,
}

impl AppState {
    /// Create state backed by the record-store HTTP client
    pub fn new(config: Config) -> AppResult<Self> {
        let records = Arc::new(RecordStoreClient::new(&config)?);

        Ok(Self {
            config,
            stores: records.clone(),
            history: records.clone(),
            traffic: records.clone(),
            activity: records,
        })
    }

    /// Create state over explicit collaborators (tests)
    pub fn with_collaborators(
        config: Config,
        stores: Arc<dyn StoreDirectory>,
        history: Arc<dyn HistoryConfigSource>,
        traffic: Arc<dyn TrafficSource>,
        activity: Arc<dyn ActivityStore>,
    ) -> Self {
        Self {
            config,
            stores,
            history,
            traffic,
            activity,
        }
    }
}
