mod healthcheck;
mod slots;

use salvo::Router;

// Re-export route constants from core
pub use tatami_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, SLOTS_ROUTE_COMPONENT, SLOTS_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the main API router.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .push(healthcheck::routes())
        .push(slots::routes())
}
