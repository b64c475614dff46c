//! Módulo de base de datos
//!
//! Maneja la conexión, el schema declarado y la auto-reparación de SQLite

pub mod connection;
pub mod schema;
pub mod schema_repair;

pub use connection::{run_migrations, DatabaseConnection};
