use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::errors::AppError;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(conn: Connection, config: AppConfig) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            config,
        }
    }

    /// Borrows the shared connection for the duration of one operation.
    /// The guard releases it on drop, whichever way the caller returns.
    pub fn conn(&self) -> Result<MutexGuard<'_, Connection>, AppError> {
        self.db
            .lock()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("database mutex poisoned")))
    }
}

#[cfg(test)]
impl AppState {
    pub(crate) fn in_memory() -> Self {
        let conn = crate::db::init_db(":memory:").expect("in-memory database");
        let config = AppConfig {
            port: 0,
            database_url: ":memory:".to_string(),
            secret_key: "test-secret".to_string(),
            locale: crate::i18n::Locale::El,
            cookie_secure: false,
        };
        Self::new(conn, config)
    }
}
