use crate::service::FxService;

/// Shared application state available to all route handlers via Axum's
/// `State` extractor. Holds no per-request data.
pub struct AppState {
    pub service: FxService,
}
