//! Shared application state for axum handlers.

use std::sync::Arc;

use skillhub_app::router::DirectiveRouter;

/// Application state shared across all axum handlers.
///
/// `Clone` is implemented manually so the gateway and authority themselves do
/// not need to be `Clone`; only the `Arc` is cloned.
pub struct AppState<G, A> {
    pub router: Arc<DirectiveRouter<G, A>>,
}

impl<G, A> Clone for AppState<G, A> {
    fn clone(&self) -> Self {
        Self {
            router: Arc::clone(&self.router),
        }
    }
}

impl<G, A> AppState<G, A> {
    pub fn new(router: DirectiveRouter<G, A>) -> Self {
        Self {
            router: Arc::new(router),
        }
    }
}
