// storefront/src/services/mod.rs
pub mod auth_service;
pub mod email_service;
