//! SQLite database module for the Acme mirror engine.

mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
