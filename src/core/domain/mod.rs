pub mod command;
pub mod declaration;
pub mod entity;
pub mod error_kind;
pub mod invocation;
pub mod policy;
pub mod transaction;
pub mod transactional_config;
