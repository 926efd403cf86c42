//! Declarative transaction demarcation for services backed by Postgres.
//!
//! Operations are declared transactional per type or per operation; the
//! [`core::transactional`] module resolves those declarations and wraps each
//! call with begin/commit/rollback on the current database session.

pub mod adapter;
pub mod core;
pub mod error;

#[cfg(test)]
mod test_support;
