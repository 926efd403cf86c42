//! Declarative transaction demarcation.
//!
//! [`PolicyResolver`] decides which operations are transactional and under
//! which declaration, [`TransactionalInterceptor`] enforces a declaration
//! around one call, and [`TransactionalExecutor`] chains the two the way an
//! interception layer would.

pub mod executor;
pub mod interceptor;
pub mod resolver;

pub use executor::TransactionalExecutor;
pub use interceptor::TransactionalInterceptor;
pub use resolver::PolicyResolver;
