use std::sync::{Mutex, MutexGuard};

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::store::BookingStore;

pub struct AppState {
    pub store: Mutex<BookingStore>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            store: Mutex::new(BookingStore::new()),
            config,
        }
    }

    /// Locks the store, turning a poisoned lock into an internal error
    /// carrying `context` as the client-facing message.
    pub fn lock_store(&self, context: &'static str) -> Result<MutexGuard<'_, BookingStore>, AppError> {
        self.store
            .lock()
            .map_err(|e| AppError::internal(context, e))
    }
}
