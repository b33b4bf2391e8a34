// storefront/src/db/mod.rs

//! Postgres implementation of the vetclinic client traits.

pub mod pg_client;
pub mod rows;

pub use pg_client::PgClient;
