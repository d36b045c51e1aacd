//! SeaORM entities backing the PostgreSQL store.

pub mod document;
