//! Store implementations: SeaORM over PostgreSQL, and an in-memory one.

pub mod memory;
pub mod seaorm;
