use std::sync::Arc;

use axum::Router;

use crate::context::Context;

mod api;
pub mod config;
mod context;
pub mod db;
mod error;
mod server;
mod util;

pub use crate::{
    api::validation::ValidationError,
    config::DbConfig,
    db::Backend,
    error::Error,
    server::Server,
    util::graceful_shutdown,
};

#[derive(Clone, Default)]
pub struct Builder {
    backend: Option<Arc<dyn Backend>>,
    base_path: String,
}

impl Builder {
    pub fn with_backend(self, backend: impl Backend) -> Self {
        self.with_shared_backend(Arc::new(backend))
    }

    pub fn with_shared_backend(mut self, backend: Arc<dyn Backend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Uses Postgres, opening a fresh connection for every request.
    pub fn with_db(self, config: &DbConfig) -> Self {
        self.with_backend(db::PgBackend::from_config(config))
    }

    /// Prefix the collection endpoint is mounted at, e.g. `/webapp/api`.
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn build(self) -> Result<Router<()>, Error> {
        let backend = self
            .backend
            .ok_or_else(|| Error::Config("no database backend provided".to_owned()))?;
        let base_path = config::parse_base_path(&self.base_path).map_err(Error::Config)?;

        let context = Context::new(backend);

        Ok(crate::api::router(&base_path).with_state(context))
    }
}
