use std::sync::Arc;

use chrono::{
    DateTime,
    Utc,
};

use crate::db::Backend;

#[derive(Clone)]
pub struct Context {
    pub up_since: DateTime<Utc>,
    backend: Arc<dyn Backend>,
}

impl Context {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            up_since: Utc::now(),
            backend,
        }
    }

    pub fn backend(&self) -> &dyn Backend {
        &*self.backend
    }
}
