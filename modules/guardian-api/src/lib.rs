pub mod error;
pub mod rest;
pub mod routes;

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use guardian_common::Config;
use guardian_core::Session;

pub use error::ApiError;
pub use routes::build_router;

/// Everything a request may touch. One lock covers a whole request,
/// backend call included, so requests are applied strictly one at a time.
pub struct ServerInner {
    pub session: Session,
    pub config: Config,
}

#[derive(Clone)]
pub struct AppState {
    inner: Arc<Mutex<ServerInner>>,
}

impl AppState {
    pub fn new(session: Session, config: Config) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ServerInner { session, config })),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, ServerInner> {
        self.inner.lock().await
    }
}
