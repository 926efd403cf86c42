pub mod command;
pub mod session;
pub mod session_registry;
