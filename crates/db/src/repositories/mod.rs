//! Repository abstractions for data access.
//!
//! Repositories hide the `SeaORM` details behind the engine's persistence port.

pub mod statement;

pub use statement::{StatementRepoError, StatementRepository};
