//! Persistence layer abstractions and implementations.
//!
//! # Responsibility
//! - Define the durable keyed-store contract the entity store depends on.
//! - Isolate SQLite and JSON codec details from service orchestration.
//!
//! # Invariants
//! - Store reads degrade to the caller's fallback; writes are swallowed
//!   with a logged warning. Neither ever surfaces to domain operations.

pub mod keyed_store;
