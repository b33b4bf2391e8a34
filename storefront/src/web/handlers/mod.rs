// storefront/src/web/handlers/mod.rs

pub mod auth_handlers;
pub mod catalog_handlers;
pub mod dashboard_handlers;
pub mod order_handlers;
pub mod webhook_handlers;
