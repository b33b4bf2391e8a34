// storefront/src/web/mod.rs

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod session;

pub use middleware::admin_gate;
pub use routes::configure_app_routes;
