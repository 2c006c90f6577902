//! Database layer - connection pool, schema, repositories, catalogs
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections by default) - no Arc<Mutex<Connection>>
//! - Listings count upcoming shows with a LEFT JOIN - no N+1 queries
//! - Rely on DB constraints, handle violations - no check-then-insert
//! - Transactions for multi-step writes (row + genres)

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod postgres;
pub mod repos;
mod store;

pub use memory::MemoryCatalog;
pub use pool::{create_pool, create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
pub use postgres::PgCatalog;
pub use repos::{ArtistRepo, ShowRepo, VenueRepo};
pub use store::{ArtistStore, Catalog, DbError, ShowStore, VenueStore};
