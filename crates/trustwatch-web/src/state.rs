//! Shared application state for the web server.

use std::sync::Arc;

use trustwatch_api::Backend;

use crate::scope::ViewScope;

/// Shared state injected into every Axum handler.
///
/// Holds no fetched data: every mount goes back to the backend.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
    /// Parent of every view scope; cancelled on shutdown.
    root: Arc<ViewScope>,
}

impl AppState {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend, root: Arc::new(ViewScope::root()) }
    }

    /// Scope for one page mount.
    pub fn open_view(&self) -> ViewScope {
        self.root.child()
    }

    pub fn root_scope(&self) -> Arc<ViewScope> {
        Arc::clone(&self.root)
    }
}

pub type SharedState = Arc<AppState>;
