//! Storage layer
//!
//! SQLite (embedded) via sqlx. Handlers never touch rows directly; every
//! read and mutation goes through [`Database`].

pub mod db;

pub use db::Database;
