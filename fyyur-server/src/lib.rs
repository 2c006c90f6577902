//! fyyur-server: venue, artist and show booking directory
//!
//! Layers, leaves first:
//! - `models`: form inputs validated at the boundary, derived views
//! - `db`: schema, store traits, PostgreSQL and in-memory catalogs
//! - `http`: axum routes rendering pages against an injected catalog
//! - `seed`: demo dataset

pub mod db;
pub mod http;
pub mod models;
pub mod seed;

pub use db::{create_pool, Catalog, DbError, MemoryCatalog, PgCatalog};
pub use http::{run_server, ServerConfig};
pub use seed::{seed, SeedReport};
